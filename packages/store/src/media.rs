//! Media upload gate and blob store
//!
//! Accepts a binary blob plus its declared content type and size, rejects
//! anything over 10 MiB or outside the allowlist, and hands back a stable
//! identifier, the inferred category, and a retrievable location.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Video,
    Document,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Image => "image",
            MediaCategory::Video => "video",
            MediaCategory::Document => "document",
        }
    }
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("upload of {size} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit")]
    TooLarge { size: u64 },

    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("media storage failure: {0}")]
    Io(#[from] io::Error),
}

/// Allowlisted content types with their category and on-disk extension.
const ALLOWED_TYPES: &[(&str, MediaCategory, &str)] = &[
    ("image/jpeg", MediaCategory::Image, "jpg"),
    ("image/jpg", MediaCategory::Image, "jpg"),
    ("image/png", MediaCategory::Image, "png"),
    ("image/gif", MediaCategory::Image, "gif"),
    ("image/webp", MediaCategory::Image, "webp"),
    ("video/mp4", MediaCategory::Video, "mp4"),
    ("video/mov", MediaCategory::Video, "mov"),
    ("video/avi", MediaCategory::Video, "avi"),
    ("application/pdf", MediaCategory::Document, "pdf"),
    ("application/msword", MediaCategory::Document, "doc"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        MediaCategory::Document,
        "docx",
    ),
];

fn lookup(content_type: &str) -> Option<(MediaCategory, &'static str)> {
    ALLOWED_TYPES
        .iter()
        .find(|(ct, _, _)| *ct == content_type)
        .map(|(_, category, ext)| (*category, *ext))
}

/// Gate an upload by declared content type and size.
pub fn check_upload(content_type: &str, size: u64) -> Result<MediaCategory, MediaError> {
    let (category, _) =
        lookup(content_type).ok_or_else(|| MediaError::UnsupportedType(content_type.to_string()))?;
    if size > MAX_UPLOAD_BYTES {
        return Err(MediaError::TooLarge { size });
    }
    Ok(category)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub id: String,
    pub category: MediaCategory,
    pub location: PathBuf,
}

/// Disk-backed blob store. Blobs land under the root directory as
/// `<id>.<ext>`.
pub struct DiskMediaStore {
    root: PathBuf,
}

impl DiskMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn save(&self, data: &[u8], content_type: &str) -> Result<StoredMedia, MediaError> {
        let (category, extension) = lookup(content_type)
            .ok_or_else(|| MediaError::UnsupportedType(content_type.to_string()))?;
        let size = data.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(MediaError::TooLarge { size });
        }

        let id = Uuid::new_v4().to_string();
        let location = self.root.join(format!("{}.{}", id, extension));
        std::fs::write(&location, data)?;
        tracing::debug!(%id, content_type, bytes = data.len(), "media stored");

        Ok(StoredMedia {
            id,
            category,
            location,
        })
    }
}
