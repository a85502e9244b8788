use crate::errors::RevealError;
use crate::models::{EntryKind, ResolvedMetadata};
use chrono::{DateTime, TimeZone, Utc};
use std::ffi::OsString;
use std::fs::{self, File, Metadata};
use std::io::{self, Read};
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

/// Directory children in the order the OS yields them. Read errors surface
/// per item, after the names that came before them.
pub type DirNames = Box<dyn Iterator<Item = io::Result<OsString>>>;

/// Filesystem boundary used by the resolver and the contents formatters.
///
/// Everything crossing it is plain data or a boxed stream, so tests can hand
/// in a fake that fails halfway through a read.
pub trait FileSystem {
    /// Stats the entry, following symlinks.
    fn metadata(&self, path: &Path) -> io::Result<ResolvedMetadata>;

    /// Stats the entry itself.
    fn symlink_metadata(&self, path: &Path) -> io::Result<ResolvedMetadata>;

    /// Absolute path with every symlink resolved.
    fn canonicalize(&self, path: &Path) -> crate::Result<PathBuf>;

    /// Opens a regular file for reading.
    fn open_file(&self, path: &Path) -> crate::Result<Box<dyn Read>>;

    /// Opens a directory for listing.
    fn read_dir_names(&self, path: &Path) -> crate::Result<DirNames>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> io::Result<ResolvedMetadata> {
        fs::metadata(path).map(|metadata| snapshot(&metadata))
    }

    fn symlink_metadata(&self, path: &Path) -> io::Result<ResolvedMetadata> {
        fs::symlink_metadata(path).map(|metadata| snapshot(&metadata))
    }

    fn canonicalize(&self, path: &Path) -> crate::Result<PathBuf> {
        fs::canonicalize(path).map_err(|err| RevealError::PathResolution(path.to_path_buf(), err))
    }

    fn open_file(&self, path: &Path) -> crate::Result<Box<dyn Read>> {
        File::open(path)
            .map(|file| Box::new(file) as Box<dyn Read>)
            .map_err(|err| RevealError::OpenFile(path.to_path_buf(), err))
    }

    fn read_dir_names(&self, path: &Path) -> crate::Result<DirNames> {
        let entries = fs::read_dir(path).map_err(|err| RevealError::OpenDirectory(path.to_path_buf(), err))?;
        Ok(Box::new(entries.map(|entry| entry.map(|v| v.file_name()))))
    }
}

/// Copies the fields every formatter needs out of a std `Metadata`.
pub fn snapshot(metadata: &Metadata) -> ResolvedMetadata {
    ResolvedMetadata {
        kind: EntryKind::from_mode(metadata.mode()),
        size: metadata.size(),
        uid: metadata.uid(),
        gid: metadata.gid(),
        mode: metadata.mode(),
        inode: metadata.ino(),
        modified: modification_time(metadata.mtime(), metadata.mtime_nsec()),
    }
}

fn modification_time(seconds: i64, nanoseconds: i64) -> DateTime<Utc> {
    let nanoseconds = u32::try_from(nanoseconds).unwrap_or(0);
    Utc.timestamp_opt(seconds, nanoseconds).single().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_child_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let mut names = RealFileSystem
            .read_dir_names(dir.path())
            .unwrap()
            .collect::<io::Result<Vec<OsString>>>()
            .unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("a.txt"), OsString::from("nested")]);
    }

    #[test]
    fn open_failures_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let err = RealFileSystem.open_file(&missing).err().unwrap();
        assert!(matches!(err, RevealError::OpenFile(ref path, _) if path == &missing));

        let err = RealFileSystem.read_dir_names(&missing).err().unwrap();
        assert!(matches!(err, RevealError::OpenDirectory(..)));

        let err = RealFileSystem.canonicalize(&missing).unwrap_err();
        assert!(matches!(err, RevealError::PathResolution(..)));
    }

    #[test]
    fn snapshots_copy_the_stat_fields() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sized");
        fs::write(&file, b"12345").unwrap();
        let raw = fs::metadata(&file).unwrap();

        let resolved = RealFileSystem.metadata(&file).unwrap();
        assert_eq!(resolved.kind, EntryKind::File);
        assert_eq!(resolved.size, 5);
        assert_eq!(resolved.inode, raw.ino());
        assert_eq!(resolved.uid, raw.uid());
        assert_eq!(resolved.modified.timestamp(), raw.mtime());
    }

    #[test]
    fn out_of_range_timestamps_fall_back_to_the_epoch() {
        assert_eq!(modification_time(0, -1), DateTime::<Utc>::default());
        assert_eq!(modification_time(60, 0).timestamp(), 60);
    }
}
