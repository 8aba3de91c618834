use crate::error::{Result, WorkspaceError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Reads file contents for the analyzer
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// `tokio::fs` backed reader
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

#[async_trait]
impl FileReader for FsReader {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// Resolve `path` against `root` and reject anything that could escape it.
///
/// Relative paths are joined to `root`. The result must not contain NUL bytes
/// or `..` components and must lie under `root`.
pub fn guard_path(root: &Path, path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    if raw.contains('\0') {
        return Err(WorkspaceError::PathRejected {
            path: raw.replace('\0', "\\0"),
            reason: "contains NUL byte",
        });
    }
    if raw.trim().is_empty() {
        return Err(WorkspaceError::PathRejected {
            path: raw.into_owned(),
            reason: "empty path",
        });
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(WorkspaceError::PathRejected {
            path: raw.into_owned(),
            reason: "parent directory traversal",
        });
    }

    let resolved = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };

    if !resolved.starts_with(root) {
        return Err(WorkspaceError::PathRejected {
            path: raw.into_owned(),
            reason: "outside workspace root",
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn relative_paths_resolve_under_root() {
        let root = Path::new("/work/app");
        assert_eq!(
            guard_path(root, Path::new("src/index.ts")).unwrap(),
            PathBuf::from("/work/app/src/index.ts")
        );
        assert_eq!(
            guard_path(root, Path::new("/work/app/src/index.ts")).unwrap(),
            PathBuf::from("/work/app/src/index.ts")
        );
    }

    #[test]
    fn rejects_traversal_nul_and_foreign_roots() {
        let root = Path::new("/work/app");
        for (input, reason) in [
            ("../secrets.ts", "parent directory traversal"),
            ("src/../../etc/passwd", "parent directory traversal"),
            ("/etc/passwd", "outside workspace root"),
            ("/work/application/x.ts", "outside workspace root"),
            ("src/a\0.ts", "contains NUL byte"),
            ("", "empty path"),
        ] {
            match guard_path(root, Path::new(input)) {
                Err(WorkspaceError::PathRejected { reason: r, .. }) => assert_eq!(r, reason, "{input}"),
                other => panic!("{input}: expected rejection, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn fs_reader_reads_content() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.ts");
        std::fs::write(&file, "export const a = 1;\n").unwrap();

        let reader = FsReader;
        assert_eq!(reader.read_to_string(&file).await.unwrap(), "export const a = 1;\n");

        let err = reader
            .read_to_string(&temp.path().join("missing.ts"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
