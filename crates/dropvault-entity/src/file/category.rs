//! File category derived from the file name's extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse content category used for icons and filtering.
///
/// The mapping from extension is total: anything unrecognized is
/// [`FileCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    /// Raster and vector images.
    Image,
    /// Video containers.
    Video,
    /// Audio formats.
    Audio,
    /// PDF documents.
    Pdf,
    /// Word-processor and plain-text documents.
    Document,
    /// Compressed archives.
    Archive,
    /// Anything else.
    Other,
}

impl FileCategory {
    /// Every category, in display order.
    pub const ALL: [FileCategory; 7] = [
        Self::Image,
        Self::Video,
        Self::Audio,
        Self::Pdf,
        Self::Document,
        Self::Archive,
        Self::Other,
    ];

    /// Categorize a lowercase-insensitive extension (without the dot).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "svg" | "webp" => Self::Image,
            "mp4" | "avi" | "mov" | "wmv" | "flv" | "webm" => Self::Video,
            "mp3" | "wav" | "flac" | "aac" | "ogg" => Self::Audio,
            "pdf" => Self::Pdf,
            "doc" | "docx" | "txt" | "rtf" => Self::Document,
            "zip" | "rar" | "7z" | "tar" | "gz" => Self::Archive,
            _ => Self::Other,
        }
    }

    /// Categorize a file name by its last extension. Names without a dot are `Other`.
    pub fn from_file_name(name: &str) -> Self {
        extension_of(name).map_or(Self::Other, Self::from_extension)
    }

    /// Name of the icon the presentation layer renders for this category.
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Audio => "Music",
            Self::Pdf | Self::Document => "FileText",
            Self::Archive => "Archive",
            Self::Other => "File",
        }
    }

    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Document => "document",
            Self::Archive => "archive",
            Self::Other => "other",
        }
    }
}

/// The text after the last dot of `name`, if there is one.
pub(crate) fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = dropvault_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                dropvault_core::AppError::validation(format!("Invalid file category: '{s}'"))
            })
    }
}
