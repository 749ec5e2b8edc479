//! Filesystem-backed storage for post images.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::application::assets::{AssetStore, AssetStoreError};

/// Writes images under a single directory and hands back their public URL path.
///
/// Names are flat leaf names; the same name always maps to the same file, so a
/// second write replaces the first.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    public_prefix: String,
}

impl ContentStore {
    /// Root the store at `root`, creating the directory if necessary.
    pub fn new(root: PathBuf, public_prefix: &str) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            public_prefix: normalize_prefix(public_prefix),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// URL prefix assets are served under, without a trailing slash.
    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    pub fn public_path(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix, name)
    }

    /// Read a previously stored asset into memory.
    pub async fn read(&self, name: &str) -> Result<Bytes, AssetStoreError> {
        let absolute = self.resolve(name)?;
        let data = fs::read(absolute).await?;
        Ok(Bytes::from(data))
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, AssetStoreError> {
        let relative = Path::new(name);
        let mut components = relative.components();
        let leaf_only = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if name.is_empty() || name.contains(['/', '\\']) || !leaf_only {
            return Err(AssetStoreError::InvalidName {
                name: name.to_string(),
            });
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStore for ContentStore {
    async fn store(&self, name: &str, bytes: Bytes) -> Result<String, AssetStoreError> {
        let absolute = self.resolve(name)?;
        fs::write(&absolute, &bytes).await?;
        Ok(self.public_path(name))
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
