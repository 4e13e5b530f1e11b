use crate::error::Result;
use std::path::Path;

/// MIME types accepted for upload, compared by exact string match.
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// A file chosen by the user for a single upload attempt.
///
/// The MIME type is whatever was declared for the file. It is never checked
/// against the actual content.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    /// Original file name, sent along with the multipart part.
    pub name: String,
    /// Declared MIME type, possibly empty when nothing could be declared.
    pub mime_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Creates a file from its name, declared MIME type and content.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk and declares its MIME type from the extension,
    /// the same way a file picker does.
    ///
    /// # Arguments
    /// * `path` - The path of the file to read
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            mime_type: declared_mime_type(path).to_string(),
            bytes,
        })
    }

    /// Returns the same file declaring another MIME type.
    pub fn with_mime_type(self, mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            ..self
        }
    }

    /// Returns true if the declared type is in [`ALLOWED_MIME_TYPES`].
    pub fn is_allowed(&self) -> bool {
        is_allowed_mime_type(&self.mime_type)
    }
}

/// Checks a declared MIME type against the allow-list, case-sensitively.
pub fn is_allowed_mime_type(mime_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type)
}

/// Maps a file extension to the MIME type a browser would declare for it.
///
/// Unknown or missing extensions declare an empty type.
pub fn declared_mime_type(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
        return "";
    };

    match extension.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" | "jpe" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "",
    }
}
