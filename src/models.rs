use chrono::{DateTime, Utc};
use std::ffi::OsString;

/// Facet of an entry that gets revealed. Selected by the most recent data
/// type flag on the command line.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum DataType {
    #[default]
    Contents,
    Type,
    Size,
    HumanSize,
    User,
    UserId,
    Group,
    GroupId,
    Permissions,
    HumanPermissions,
    Inode,
    ModifiedDate,
}

impl DataType {
    pub const ALL: [DataType; 12] = [
        Self::Contents,
        Self::Type,
        Self::Size,
        Self::HumanSize,
        Self::User,
        Self::UserId,
        Self::Group,
        Self::GroupId,
        Self::Permissions,
        Self::HumanPermissions,
        Self::Inode,
        Self::ModifiedDate,
    ];

    pub fn flag(&self) -> &'static str {
        match self {
            Self::Contents => "--contents",
            Self::Type => "--type",
            Self::Size => "--size",
            Self::HumanSize => "--human-size",
            Self::User => "--user",
            Self::UserId => "--user-id",
            Self::Group => "--group",
            Self::GroupId => "--group-id",
            Self::Permissions => "--permissions",
            Self::HumanPermissions => "--human-permissions",
            Self::Inode => "--inode",
            Self::ModifiedDate => "--modified-date",
        }
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|data_type| data_type.flag() == flag)
    }
}

/// Whether symlinks are followed when resolving an entry.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub enum TranspassMode {
    /// Inspect the symlink itself.
    #[default]
    Untranspassing,
    /// Follow every level of symlinks to the final target.
    Transpassing,
}

impl TranspassMode {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Untranspassing => "--untranspass",
            Self::Transpassing => "--transpass",
        }
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        [Self::Untranspassing, Self::Transpassing]
            .into_iter()
            .find(|mode| mode.flag() == flag)
    }
}

/// Kind of filesystem entry, decoded from the `S_IFMT` bits of a mode.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum EntryKind {
    Block,
    Character,
    Directory,
    Fifo,
    Symlink,
    File,
    Socket,
    Unknown,
}

impl EntryKind {
    const FORMAT_MASK: u32 = 0o170_000;

    pub fn from_mode(mode: u32) -> Self {
        match mode & Self::FORMAT_MASK {
            0o060_000 => Self::Block,
            0o020_000 => Self::Character,
            0o040_000 => Self::Directory,
            0o010_000 => Self::Fifo,
            0o120_000 => Self::Symlink,
            0o100_000 => Self::File,
            0o140_000 => Self::Socket,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Block => "Block",
            Self::Character => "Character",
            Self::Directory => "Directory",
            Self::Fifo => "Fifo",
            Self::Symlink => "Symlink",
            Self::File => "File",
            Self::Socket => "Socket",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Stat snapshot of a single entry. Built fresh for every path.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub kind: EntryKind,
    pub size: u64,
    pub uid: u32,
    pub gid: u32,
    /// Raw `st_mode`, file type bits included.
    pub mode: u32,
    pub inode: u64,
    pub modified: DateTime<Utc>,
}

impl ResolvedMetadata {
    /// Permission bits plus setuid, setgid and sticky.
    pub fn permission_bits(&self) -> u32 {
        self.mode & 0o7777
    }
}

/// Settings in effect at a given point of the argument list.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Selection {
    pub data_type: DataType,
    pub transpass: TranspassMode,
}

/// One path paired with the selection that was active when it appeared.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RevealRequest {
    pub path: OsString,
    pub selection: Selection,
}

/// Aggregate outcome of a batch. Moves from `Success` to `Failure` only.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum RunStatus {
    #[default]
    Success,
    Failure,
}

impl RunStatus {
    pub fn as_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }

    /// Combines two statuses; a failure on either side sticks.
    pub fn merge(self, other: RunStatus) -> RunStatus {
        match (self, other) {
            (Self::Success, Self::Success) => Self::Success,
            _ => Self::Failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_data_type_flag_maps_back_to_itself() {
        for data_type in DataType::ALL {
            assert_eq!(DataType::from_flag(data_type.flag()), Some(data_type));
        }
        assert_eq!(DataType::from_flag("--Size"), None);
        assert_eq!(DataType::from_flag("--transpass"), None);
    }

    #[test]
    fn transpass_flags_map_back_to_their_mode() {
        for mode in [TranspassMode::Untranspassing, TranspassMode::Transpassing] {
            assert_eq!(TranspassMode::from_flag(mode.flag()), Some(mode));
        }
        assert_eq!(TranspassMode::from_flag("--Transpass"), None);
    }

    #[test]
    fn entry_kind_decodes_format_bits() {
        assert_eq!(EntryKind::from_mode(0o100_644), EntryKind::File);
        assert_eq!(EntryKind::from_mode(0o040_755), EntryKind::Directory);
        assert_eq!(EntryKind::from_mode(0o120_777), EntryKind::Symlink);
        assert_eq!(EntryKind::from_mode(0o020_666), EntryKind::Character);
        assert_eq!(EntryKind::from_mode(0o060_660), EntryKind::Block);
        assert_eq!(EntryKind::from_mode(0o010_644), EntryKind::Fifo);
        assert_eq!(EntryKind::from_mode(0o140_755), EntryKind::Socket);
        assert_eq!(EntryKind::from_mode(0o000_644), EntryKind::Unknown);
        assert_eq!(EntryKind::from_mode(0o170_000), EntryKind::Unknown);
    }

    #[test]
    fn failure_is_sticky() {
        let status = RunStatus::Success.merge(RunStatus::Failure).merge(RunStatus::Success);
        assert_eq!(status, RunStatus::Failure);
        assert_eq!(status.as_code(), 1);
        assert_eq!(RunStatus::default().as_code(), 0);
    }
}
