//! Static file resolution module
//!
//! Opens the resolved candidate path with a single open attempt and
//! branches on the error instead of checking existence first, so a file
//! deleted between a check and a read cannot surface as anything other
//! than a clean 404/500.

use crate::handler::{path, ServeError};
use crate::http::mime;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Implicit index file for directory requests
const INDEX_FILE: &str = "index.html";

/// A file resolved and opened for serving
pub struct ResolvedFile {
    pub file: File,
    pub len: u64,
    pub content_type: &'static str,
}

/// Resolve a raw request path and open the file it maps to.
///
/// Directories are rewritten to their `index.html`; the traversal guard
/// runs before any filesystem access.
pub async fn open(root: &Path, raw_path: &str) -> Result<ResolvedFile, ServeError> {
    let candidate = path::resolve(root, raw_path)?;
    let (file, len, served_path) = open_with_index_rewrite(candidate).await?;

    let extension = served_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    Ok(ResolvedFile {
        file,
        len,
        content_type: mime::content_type(extension.as_deref()),
    })
}

/// Open the candidate, rewriting a directory to its index file.
///
/// The metadata comes from the opened handle, not a separate stat of the
/// path, so the answer always describes the file actually being served.
async fn open_with_index_rewrite(candidate: PathBuf) -> Result<(File, u64, PathBuf), ServeError> {
    let file = File::open(&candidate).await?;
    let metadata = file.metadata().await?;

    if !metadata.is_dir() {
        return Ok((file, metadata.len(), candidate));
    }

    let index = candidate.join(INDEX_FILE);
    let file = File::open(&index).await?;
    let metadata = file.metadata().await?;
    if metadata.is_dir() {
        // index.html exists but is itself a directory
        return Err(ServeError::NotFound);
    }

    Ok((file, metadata.len(), index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/style.css"), "body{}").unwrap();
        fs::write(dir.path().join("assets/index.html"), "<h1>assets</h1>").unwrap();
        fs::write(dir.path().join("data.bin"), [0u8, 1, 2, 3]).unwrap();
        dir
    }

    #[tokio::test]
    async fn serves_existing_file_with_mapped_type() {
        let dir = site();
        let resolved = open(dir.path(), "/assets/style.css").await.unwrap();
        assert_eq!(resolved.content_type, "text/css; charset=utf-8");
        assert_eq!(resolved.len, 6);
    }

    #[tokio::test]
    async fn unmapped_extension_gets_default_type() {
        let dir = site();
        let resolved = open(dir.path(), "/data.bin").await.unwrap();
        assert_eq!(resolved.content_type, "application/octet-stream");
        assert_eq!(resolved.len, 4);
    }

    #[tokio::test]
    async fn root_serves_index() {
        let dir = site();
        let resolved = open(dir.path(), "/").await.unwrap();
        assert_eq!(resolved.content_type, "text/html; charset=utf-8");
        assert_eq!(resolved.len, 13);
    }

    #[tokio::test]
    async fn directory_with_and_without_slash_serve_index() {
        let dir = site();
        let with_slash = open(dir.path(), "/assets/").await.unwrap();
        let without_slash = open(dir.path(), "/assets").await.unwrap();
        assert_eq!(with_slash.len, without_slash.len);
        assert_eq!(with_slash.content_type, "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = site();
        assert!(matches!(
            open(dir.path(), "/nonexistent.xyz").await,
            Err(ServeError::NotFound)
        ));
    }

    #[tokio::test]
    async fn directory_without_index_is_not_found() {
        let dir = site();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(matches!(
            open(dir.path(), "/empty/").await,
            Err(ServeError::NotFound)
        ));
    }

    #[tokio::test]
    async fn traversal_is_forbidden_without_any_read() {
        let dir = site();
        assert!(matches!(
            open(dir.path(), "/../../etc/passwd").await,
            Err(ServeError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn encoded_space_in_name_resolves() {
        let dir = site();
        fs::write(dir.path().join("my file.txt"), "x").unwrap();
        let resolved = open(dir.path(), "/my%20file.txt").await.unwrap();
        assert_eq!(resolved.len, 1);
    }
}
