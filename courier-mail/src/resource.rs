//! Template and stylesheet loading.

use async_trait::async_trait;
use std::path::Path;

use crate::{MailError, Result};

/// Reads template and stylesheet resources.
#[async_trait]
pub trait ResourceReader: Send + Sync {
    /// Read the resource at `locator` as UTF-8 text.
    async fn read(&self, locator: &Path) -> Result<String>;
}

/// Reads resources from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

#[async_trait]
impl ResourceReader for FsReader {
    async fn read(&self, locator: &Path) -> Result<String> {
        tokio::fs::read_to_string(locator)
            .await
            .map_err(|source| MailError::Resource {
                path: locator.to_path_buf(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_existing_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/welcome.hbs");
        let content = FsReader.read(&path).await.unwrap();
        assert!(content.contains("{{name}}"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let err = FsReader
            .read(Path::new("does/not/exist.hbs"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("does/not/exist.hbs"));
    }
}
