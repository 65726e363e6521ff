//! Product image files.
//!
//! Uploads are written to `UPLOAD_DIR/products-uploads` as
//! `<uuid>-<original stem>.<ext>`; the product keeps only the file names.

use async_trait::async_trait;
use core_config::env_or_default;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

pub const UPLOAD_SUBDIR: &str = "products-uploads";

const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
];

/// One file from a multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub fn extension_for(content_type: &str) -> Option<&'static str> {
    ALLOWED_IMAGE_TYPES
        .iter()
        .find(|(mime, _)| mime.eq_ignore_ascii_case(content_type.trim()))
        .map(|(_, ext)| *ext)
}

fn sanitize_stem(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match base.rfind('.') {
        Some(pos) if pos > 0 => &base[..pos],
        _ => base,
    };

    let cleaned: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect();
    let cleaned = cleaned.trim_matches('-');

    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Unique stored name for an upload; rejects non-image content types.
pub fn stored_name(upload: &ImageUpload) -> ProductResult<String> {
    let ext = extension_for(&upload.content_type)
        .ok_or_else(|| ProductError::UnsupportedImageType(upload.content_type.clone()))?;
    Ok(format!(
        "{}-{}.{}",
        Uuid::new_v4(),
        sanitize_stem(&upload.file_name),
        ext
    ))
}

/// Stored names are flat file names, never paths.
fn check_name(name: &str) -> ProductResult<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ProductError::Validation(format!("Invalid image name: {name}")));
    }
    Ok(())
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn save(&self, name: &str, bytes: &[u8]) -> ProductResult<()>;

    /// Returns `false` when the file did not exist.
    async fn remove(&self, name: &str) -> ProductResult<bool>;
}

/// Images on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    dir: PathBuf,
}

impl LocalImageStorage {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: upload_dir.into().join(UPLOAD_SUBDIR),
        }
    }

    /// `UPLOAD_DIR`, default `./uploads`
    pub fn from_env() -> Self {
        Self::new(env_or_default("UPLOAD_DIR", "./uploads"))
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn save(&self, name: &str, bytes: &[u8]) -> ProductResult<()> {
        check_name(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(name), bytes).await?;
        tracing::debug!(file = %name, size = bytes.len(), "Saved product image");
        Ok(())
    }

    async fn remove(&self, name: &str) -> ProductResult<bool> {
        check_name(name)?;
        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Images kept in memory (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryImageStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.files.read().await.contains_key(name)
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn save(&self, name: &str, bytes: &[u8]) -> ProductResult<()> {
        check_name(name)?;
        self.files
            .write()
            .await
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, name: &str) -> ProductResult<bool> {
        check_name(name)?;
        Ok(self.files.write().await.remove(name).is_some())
    }
}
