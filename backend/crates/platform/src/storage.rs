//! Image Storage
//!
//! Flat-directory file store for user and game images. Filenames follow
//! the `{prefix}_{id}.{ext}` convention and the owning row records the
//! filename, so the directory needs no index of its own.
//!
//! The file write and the database column update are two separate steps;
//! a crash between them can leave the two out of sync. That window is
//! accepted and documented, not papered over.

use std::path::{Path, PathBuf};

/// Image content types accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    Png,
    Jpeg,
    Gif,
}

impl ImageType {
    /// Parse an upload's Content-Type header value
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type.trim() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Map a stored filename back to its content type via the extension.
    ///
    /// Returns `None` for unmappable extensions; callers treat that as a
    /// data-integrity error, not a client error.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename).extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// MIME type for the Content-Type response header
    pub fn mime(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }

    /// Canonical file extension (no dot)
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
        }
    }
}

/// Build the canonical filename for an entity's image
pub fn image_filename(prefix: &str, id: i64, image_type: ImageType) -> String {
    format!("{}_{}.{}", prefix, id, image_type.extension())
}

/// Flat-directory image store
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Read an image's bytes
    pub async fn read(&self, filename: &str) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.dir.join(filename)).await
    }

    /// Write an image's bytes, replacing any existing file
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(self.dir.join(filename), bytes).await
    }

    /// Remove an image file
    pub async fn delete(&self, filename: &str) -> std::io::Result<()> {
        tokio::fs::remove_file(self.dir.join(filename)).await
    }
}
