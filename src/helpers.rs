//! Pure renderers for the metadata facets.

use crate::models::ResolvedMetadata;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// ctime-like layout used for modification dates.
pub const MODIFIED_DATE_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Decimal units tried from largest to smallest by [`human_size`].
const SIZE_UNITS: [(f64, &str); 3] = [(1e9, "GB"), (1e6, "MB"), (1e3, "KB")];

/// Read, write and execute, in display order.
const PERMISSION_CHARS: [(u32, char); 3] = [(0o4, 'r'), (0o2, 'w'), (0o1, 'x')];

/// Owner, group and other shifts into the permission field.
const PERMISSION_CLASSES: [u32; 3] = [6, 3, 0];

/// Renders a byte count with the largest unit whose truncated quotient is
/// nonzero, e.g. `1.5GB`. Anything under a kilobyte stays exact: `999B`.
pub fn human_size(bytes: u64) -> String {
    for (divisor, suffix) in SIZE_UNITS {
        let quotient = bytes as f64 / divisor;
        if quotient.trunc() != 0.0 {
            return format!("{quotient:.1}{suffix}");
        }
    }
    format!("{bytes}B")
}

/// Octal permission bits without a leading zero, e.g. `644`.
pub fn octal_permissions(mode: u32) -> String {
    format!("{:o}", mode & 0o7777)
}

/// Nine characters, `rwx` for owner, group and other.
pub fn human_permissions(mode: u32) -> String {
    let mut rendered = String::with_capacity(9);
    for shift in PERMISSION_CLASSES {
        let class = (mode >> shift) & 0o7;
        for (bit, symbol) in PERMISSION_CHARS {
            rendered.push(if class & bit != 0 { symbol } else { '-' });
        }
    }
    rendered
}

/// Formats a timestamp in the given zone with [`MODIFIED_DATE_FORMAT`].
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(MODIFIED_DATE_FORMAT).to_string()
}

/// Modification date of the snapshot in local time.
pub fn modified_date(metadata: &ResolvedMetadata) -> String {
    format_date(&metadata.modified.with_timezone(&Local))
}

/// Joins an absolute directory path and a child name, avoiding a doubled
/// separator at the root.
pub fn join_listing(absolute: &[u8], name: &[u8]) -> Vec<u8> {
    let mut line = Vec::with_capacity(absolute.len() + name.len() + 2);
    line.extend_from_slice(absolute);
    if absolute != b"/" {
        line.push(b'/');
    }
    line.extend_from_slice(name);
    line.push(b'\n');
    line
}
