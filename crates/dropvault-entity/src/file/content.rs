//! Raw file handles and local preview references.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::{FileCategory, extension_of};

/// A file handed over by a picker or a drop, before any upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFile {
    /// The file name, including extension.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type reported by the host, if any.
    pub mime_type: Option<String>,
}

impl RawFile {
    /// Create a raw file handle.
    pub fn new(name: impl Into<String>, size: u64, mime_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type,
        }
    }

    /// Create a raw file handle, guessing the MIME type from the extension.
    pub fn with_guessed_mime(name: impl Into<String>, size: u64) -> Self {
        let name = name.into();
        let mime_type = guess_mime(&name);
        Self {
            name,
            size,
            mime_type,
        }
    }

    /// Whether the host reports an image; only images get a thumbnail.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
    }
}

fn guess_mime(name: &str) -> Option<String> {
    let ext = extension_of(name)?.to_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "png" | "gif" | "webp" => return Some(format!("image/{ext}")),
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => match FileCategory::from_extension(&ext) {
            FileCategory::Video => return Some(format!("video/{ext}")),
            FileCategory::Audio => return Some(format!("audio/{ext}")),
            _ => return None,
        },
    };
    Some(mime.to_string())
}

/// Opaque reference to locally held content, like a browser object URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    /// Mint a fresh object URL.
    pub fn object_url() -> Self {
        Self(format!("blob:dropvault/{}", Uuid::new_v4()))
    }

    /// Borrow the URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_detection() {
        let photo = RawFile::new("cat.png", 10, Some("image/png".to_string()));
        let doc = RawFile::new("cv.pdf", 10, Some("application/pdf".to_string()));
        let unknown = RawFile::new("blob", 10, None);
        assert!(photo.is_image());
        assert!(!doc.is_image());
        assert!(!unknown.is_image());
    }

    #[test]
    fn test_guessed_mime() {
        assert_eq!(
            RawFile::with_guessed_mime("a.JPG", 1).mime_type.as_deref(),
            Some("image/jpeg")
        );
        assert_eq!(
            RawFile::with_guessed_mime("a.mp3", 1).mime_type.as_deref(),
            Some("audio/mp3")
        );
        assert_eq!(RawFile::with_guessed_mime("a.docx", 1).mime_type, None);
    }

    #[test]
    fn test_object_urls_are_unique() {
        let a = ContentRef::object_url();
        let b = ContentRef::object_url();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("blob:dropvault/"));
    }
}
