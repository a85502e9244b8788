use crate::errors::RevealError;
use crate::fs::FileSystem;
use crate::models::{ResolvedMetadata, TranspassMode};
use std::path::Path;
use tracing::debug;

/// Stats `path` under the given transpass mode.
///
/// Untranspassing inspects a terminal symlink itself; transpassing follows the
/// whole chain, so a dangling link is reported as not found.
pub fn resolve<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    transpass: TranspassMode,
) -> crate::Result<ResolvedMetadata> {
    let resolved = match transpass {
        TranspassMode::Untranspassing => fs.symlink_metadata(path),
        TranspassMode::Transpassing => fs.metadata(path),
    }
    .map_err(|err| RevealError::not_found(path, err))?;

    debug!(path = %path.display(), ?transpass, kind = %resolved.kind, "resolved entry");
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RealFileSystem;
    use crate::models::EntryKind;
    use std::os::unix::fs::symlink;

    #[test]
    fn untranspassing_reports_the_link_itself() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        std::fs::write(&target, b"twelve bytes").unwrap();
        let link = dir.path().join("link");
        symlink(&target, &link).unwrap();

        let own = resolve(&RealFileSystem, &link, TranspassMode::Untranspassing).unwrap();
        assert_eq!(own.kind, EntryKind::Symlink);

        let followed = resolve(&RealFileSystem, &link, TranspassMode::Transpassing).unwrap();
        assert_eq!(followed.kind, EntryKind::File);
        assert_eq!(followed.size, 12);
    }

    #[test]
    fn dangling_links_only_fail_when_transpassing() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("dangling");
        symlink(dir.path().join("nowhere"), &link).unwrap();

        assert!(resolve(&RealFileSystem, &link, TranspassMode::Untranspassing).is_ok());
        let err = resolve(&RealFileSystem, &link, TranspassMode::Transpassing).unwrap_err();
        assert!(matches!(err, RevealError::NotFound(..)));
    }

    #[test]
    fn chains_are_followed_to_the_end() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        symlink(dir.path(), &second).unwrap();
        symlink(&second, &first).unwrap();

        let followed = resolve(&RealFileSystem, &first, TranspassMode::Transpassing).unwrap();
        assert_eq!(followed.kind, EntryKind::Directory);
    }

    #[test]
    fn missing_paths_are_not_found() {
        let err = resolve(&RealFileSystem, Path::new("/definitely/not/here"), TranspassMode::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "the path \"/definitely/not/here\" does not point to anything");
    }
}
