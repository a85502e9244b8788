use crate::errors::RevealError;
use crate::fs::FileSystem;
use crate::helpers::{human_permissions, human_size, join_listing, modified_date, octal_permissions};
use crate::identity::IdentityDatabase;
use crate::models::{DataType, EntryKind, ResolvedMetadata};
use std::io::{self, Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{debug, trace};

const COPY_BUFFER_LEN: usize = 64 * 1024;

/// Routes a resolved snapshot to the formatter of the selected data type and
/// writes the rendering to `out`.
pub struct Dispatcher<F, I> {
    fs: F,
    identities: I,
}

impl<F: FileSystem, I: IdentityDatabase> Dispatcher<F, I> {
    pub fn new(fs: F, identities: I) -> Self {
        Self { fs, identities }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn dispatch(
        &self,
        data_type: DataType,
        metadata: &ResolvedMetadata,
        path: &Path,
        out: &mut dyn Write,
    ) -> crate::Result<()> {
        debug!(path = %path.display(), ?data_type, "dispatching");
        let line = match data_type {
            DataType::Contents => return self.reveal_contents(metadata, path, out),
            DataType::Type => metadata.kind.label().to_string(),
            DataType::Size => metadata.size.to_string(),
            DataType::HumanSize => human_size(metadata.size),
            DataType::User => self
                .identities
                .user_name(metadata.uid)
                .ok_or_else(|| RevealError::UnknownUser(path.to_path_buf()))?,
            DataType::UserId => metadata.uid.to_string(),
            DataType::Group => self
                .identities
                .group_name(metadata.gid)
                .ok_or_else(|| RevealError::UnknownGroup(path.to_path_buf()))?,
            DataType::GroupId => metadata.gid.to_string(),
            DataType::Permissions => octal_permissions(metadata.permission_bits()),
            DataType::HumanPermissions => human_permissions(metadata.mode),
            DataType::Inode => metadata.inode.to_string(),
            DataType::ModifiedDate => modified_date(metadata),
        };
        writeln!(out, "{line}").map_err(|err| RevealError::output(path, err))
    }

    fn reveal_contents(&self, metadata: &ResolvedMetadata, path: &Path, out: &mut dyn Write) -> crate::Result<()> {
        match metadata.kind {
            EntryKind::File => self.reveal_file(path, out),
            EntryKind::Directory => self.reveal_directory(path, out),
            EntryKind::Block
            | EntryKind::Character
            | EntryKind::Fifo
            | EntryKind::Symlink
            | EntryKind::Socket
            | EntryKind::Unknown => Err(RevealError::UnsupportedContents(path.to_path_buf())),
        }
    }

    fn reveal_file(&self, path: &Path, out: &mut dyn Write) -> crate::Result<()> {
        let mut file = self.fs.open_file(path)?;
        let copied = copy_contents(&mut file, out, path)?;
        trace!(path = %path.display(), bytes = copied, "streamed file");
        Ok(())
    }

    fn reveal_directory(&self, path: &Path, out: &mut dyn Write) -> crate::Result<()> {
        let absolute = self.fs.canonicalize(path)?;
        let absolute = absolute.as_os_str().as_bytes();
        let mut listed = 0usize;
        for name in self.fs.read_dir_names(path)? {
            let name = name.map_err(|err| RevealError::ReadDirectory(path.to_path_buf(), err))?;
            if name == "." || name == ".." {
                continue;
            }
            out.write_all(&join_listing(absolute, name.as_bytes()))
                .map_err(|err| RevealError::output(path, err))?;
            listed += 1;
        }
        trace!(path = %path.display(), entries = listed, "listed directory");
        Ok(())
    }
}

/// Streams `reader` into `out`, telling read failures apart from write ones.
fn copy_contents(reader: &mut dyn Read, out: &mut dyn Write, path: &Path) -> crate::Result<u64> {
    let mut buffer = [0u8; COPY_BUFFER_LEN];
    let mut copied = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(copied),
            Ok(read) => read,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(RevealError::ReadFile(path.to_path_buf(), err)),
        };
        out.write_all(&buffer[..read])
            .map_err(|err| RevealError::output(path, err))?;
        copied += read as u64;
    }
}
