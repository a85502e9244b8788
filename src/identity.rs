//! Lookup of user and group names through the system identity database.

use std::ffi::CStr;

/// Upper bound for the scratch buffer handed to the `*_r` lookups.
const MAX_BUFFER_LEN: usize = 1 << 20;
const INITIAL_BUFFER_LEN: usize = 1024;

/// Maps numeric owner ids to names.
pub trait IdentityDatabase {
    fn user_name(&self, uid: u32) -> Option<String>;

    fn group_name(&self, gid: u32) -> Option<String>;
}

/// `passwd`/`group` lookups via the reentrant libc calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemIdentity;

impl IdentityDatabase for SystemIdentity {
    fn user_name(&self, uid: u32) -> Option<String> {
        let mut buffer = vec![0 as libc::c_char; INITIAL_BUFFER_LEN];
        loop {
            // SAFETY: `passwd` is plain old data and is only read after
            // getpwuid_r reports a hit through `result`. Its string fields
            // point into `buffer`, which outlives the read below.
            let mut passwd: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = std::ptr::null_mut();
            let code = unsafe {
                libc::getpwuid_r(
                    uid as libc::uid_t,
                    &mut passwd,
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut result,
                )
            };
            if code == libc::ERANGE && buffer.len() < MAX_BUFFER_LEN {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if code != 0 || result.is_null() || passwd.pw_name.is_null() {
                return None;
            }
            let name = unsafe { CStr::from_ptr(passwd.pw_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }

    fn group_name(&self, gid: u32) -> Option<String> {
        let mut buffer = vec![0 as libc::c_char; INITIAL_BUFFER_LEN];
        loop {
            // SAFETY: same contract as `user_name`, for `struct group`.
            let mut group: libc::group = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::group = std::ptr::null_mut();
            let code = unsafe {
                libc::getgrgid_r(
                    gid as libc::gid_t,
                    &mut group,
                    buffer.as_mut_ptr(),
                    buffer.len(),
                    &mut result,
                )
            };
            if code == libc::ERANGE && buffer.len() < MAX_BUFFER_LEN {
                buffer.resize(buffer.len() * 2, 0);
                continue;
            }
            if code != 0 || result.is_null() || group.gr_name.is_null() {
                return None;
            }
            let name = unsafe { CStr::from_ptr(group.gr_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }
}
