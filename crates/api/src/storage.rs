//! Local-disk object storage for uploaded images.
//!
//! Objects live at `{root}/{bucket}/{object_path}` and are served back
//! read-only under `/assets/{bucket}/{object_path}`.

use std::io;
use std::path::{Component, Path, PathBuf};

use techhub_core::storage::public_url;

/// Writes objects below a root directory and builds their public URLs.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
    public_base_url: String,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` as `{bucket}/{object_path}`, creating parent directories.
    ///
    /// Rejects paths that would escape the bucket directory.
    pub async fn put(&self, bucket: &str, object_path: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let relative = Path::new(bucket).join(object_path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid object path '{}'", relative.display()),
            ));
        }

        let full = self.root.join(relative);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await?;
        Ok(full)
    }

    /// Public URL of a stored object.
    pub fn public_url(&self, bucket: &str, object_path: &str) -> String {
        public_url(&self.public_base_url, bucket, object_path)
    }
}
