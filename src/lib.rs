//! Core engine of `reveal`: resolves each path named on the command line,
//! renders one selected facet of it, and keeps going past per-entry failures.

pub mod args;
pub mod batch;
pub mod dispatch;
pub mod errors;
pub mod fs;
pub mod helpers;
pub mod identity;
pub mod models;
pub mod report;
pub mod resolver;

pub use args::{classify_all, first_metadata_flag, plan, Argument, MetadataFlag};
pub use batch::Batch;
pub use dispatch::Dispatcher;
pub use errors::{Result, RevealError};
pub use fs::{DirNames, FileSystem, RealFileSystem};
pub use helpers::{human_permissions, human_size, octal_permissions, MODIFIED_DATE_FORMAT};
pub use identity::{IdentityDatabase, SystemIdentity};
pub use models::{
    DataType,
    EntryKind,
    ResolvedMetadata,
    RevealRequest,
    RunStatus,
    Selection,
    TranspassMode,
};
pub use report::{Reporter, PROGRAM_NAME};
pub use resolver::resolve;

/// Re-export the stable API surface for the binary crate.
pub mod prelude {
    pub use crate::{
        batch::Batch,
        errors::{Result, RevealError},
        fs::{FileSystem, RealFileSystem},
        identity::{IdentityDatabase, SystemIdentity},
        models::*,
    };
}
