use std::{
    io,
    path::{Path, PathBuf},
};

/// Per-entry failure raised while revealing a path.
///
/// Every variant is non-fatal: the batch reports it and moves on to the next
/// path. The `Display` text is the body of the diagnostic line, without the
/// program prefix or the trailing period.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// The entry could not be stat-ed under the active transpass mode.
    #[error("the path \"{}\" does not point to anything", .0.display())]
    NotFound(PathBuf, #[source] io::Error),

    /// The owning uid has no entry in the user database.
    #[error("could not get user that owns \"{}\"", .0.display())]
    UnknownUser(PathBuf),

    /// The owning gid has no entry in the group database.
    #[error("could not get group that owns \"{}\"", .0.display())]
    UnknownGroup(PathBuf),

    /// Contents were requested for something that is neither a file nor a directory.
    #[error("can not reveal the contents of \"{}\" type", .0.display())]
    UnsupportedContents(PathBuf),

    #[error("could not open file \"{}\"", .0.display())]
    OpenFile(PathBuf, #[source] io::Error),

    #[error("could not read file \"{}\"", .0.display())]
    ReadFile(PathBuf, #[source] io::Error),

    #[error("could not open directory \"{}\"", .0.display())]
    OpenDirectory(PathBuf, #[source] io::Error),

    /// The directory opened but listing its entries failed partway.
    #[error("could not read directory \"{}\"", .0.display())]
    ReadDirectory(PathBuf, #[source] io::Error),

    #[error("could not resolve absolute path of \"{}\"", .0.display())]
    PathResolution(PathBuf, #[source] io::Error),

    /// Writing revealed data to the output stream failed.
    #[error("could not write the data revealed from \"{}\"", .0.display())]
    Output(PathBuf, #[source] io::Error),
}

impl RevealError {
    pub fn not_found(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::NotFound(path.into(), error)
    }

    pub fn output(path: impl Into<PathBuf>, error: io::Error) -> Self {
        Self::Output(path.into(), error)
    }

    /// The reader of stdout went away; nothing more can be delivered.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Self::Output(_, err) if err.kind() == io::ErrorKind::BrokenPipe)
    }

    /// Path of the entry the failure belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path, _)
            | Self::UnknownUser(path)
            | Self::UnknownGroup(path)
            | Self::UnsupportedContents(path)
            | Self::OpenFile(path, _)
            | Self::ReadFile(path, _)
            | Self::OpenDirectory(path, _)
            | Self::ReadDirectory(path, _)
            | Self::PathResolution(path, _)
            | Self::Output(path, _) => path,
        }
    }
}

/// Shared result alias for the core crate.
pub type Result<T> = std::result::Result<T, RevealError>;
