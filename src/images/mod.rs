//! Uploaded image storage
//!
//! Only PNG and JPEG payloads are accepted; anything else is silently
//! dropped (no URL is returned, no error is raised). Releasing an image is
//! best-effort: failures are logged and swallowed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::StoreError;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist uploaded bytes under a derived name. Returns the public URL,
    /// or `None` when the payload is not PNG/JPEG.
    async fn store(&self, bytes: &[u8], suggested_name: &str)
    -> Result<Option<String>, StoreError>;

    /// Best-effort removal of a previously stored image.
    async fn release(&self, url: &str);

    /// Read back stored bytes by file name; `None` when absent.
    async fn load(&self, _name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }
}

fn is_png_or_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G']) || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Filesystem-backed image storage
pub struct FsImageStore {
    dir: PathBuf,
    public_base: String,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base: public_base.into(),
        }
    }

    /// Map a public URL back to the stored file name, refusing anything
    /// that would escape the storage directory.
    fn file_name_of(url: &str) -> Option<&str> {
        let name = url.rsplit('/').next()?;
        if name.is_empty() || name.contains("..") || name.contains('\\') {
            return None;
        }
        Some(name)
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(
        &self,
        bytes: &[u8],
        suggested_name: &str,
    ) -> Result<Option<String>, StoreError> {
        if !is_png_or_jpeg(bytes) {
            tracing::debug!(name = suggested_name, "rejected non-image upload");
            return Ok(None);
        }

        tokio::fs::create_dir_all(&self.dir).await?;

        let file_name = format!("{}-{}", Uuid::new_v4(), sanitize_name(suggested_name));
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        Ok(Some(format!(
            "{}/{}",
            self.public_base.trim_end_matches('/'),
            file_name
        )))
    }

    async fn release(&self, url: &str) {
        let Some(name) = Self::file_name_of(url) else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(self.dir.join(name)).await {
            tracing::warn!(url, error = %e, "failed to release image");
        }
    }

    async fn load(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let Some(name) = Self::file_name_of(name) else {
            return Ok(None);
        };
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Guess a content type for serving a stored image.
pub fn content_type_for(name: &str) -> &'static str {
    match Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
