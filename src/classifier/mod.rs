pub mod http;

use crate::error::IngestError;
use crate::wildwatch::entry::MediaType;
use crate::wildwatch::record::SpeciesRecord;
use std::path::{Path, PathBuf};

/// A media file accepted for classification.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub path: PathBuf,
    pub media_type: MediaType,
}

impl MediaFile {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let Some(media_type) = MediaType::from_path(path) else {
            return Err(IngestError::UnsupportedMedia(path.display().to_string()));
        };
        Ok(Self {
            path: path.to_path_buf(),
            media_type,
        })
    }

    /// Fails with `UnreadableMedia` when the file cannot be opened.
    pub fn ensure_readable(&self) -> Result<(), IngestError> {
        std::fs::File::open(&self.path)
            .map(drop)
            .map_err(|source| IngestError::UnreadableMedia {
                path: self.path.display().to_string(),
                source,
            })
    }

    /// Reference stored in the journal: the absolute path when resolvable.
    pub fn media_url(&self) -> String {
        std::fs::canonicalize(&self.path)
            .unwrap_or_else(|_| self.path.clone())
            .display()
            .to_string()
    }

    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            "heic" => "image/heic",
            "heif" => "image/heif",
            "avif" => "image/avif",
            "mp4" | "m4v" => "video/mp4",
            "mov" => "video/quicktime",
            "avi" => "video/x-msvideo",
            "mkv" => "video/x-matroska",
            "webm" => "video/webm",
            "mpg" | "mpeg" => "video/mpeg",
            "3gp" => "video/3gpp",
            "wmv" => "video/x-ms-wmv",
            _ => match self.media_type {
                MediaType::Image => "image/*",
                MediaType::Video => "video/*",
            },
        }
    }
}

/// Species recognition service boundary.
pub trait Classifier {
    fn submit(&self, media: &MediaFile) -> Result<SpeciesRecord, IngestError>;
}
