//! Client for a face recognition endpoint: picks up an image, checks its
//! declared type, posts it as multipart form data and turns the JSON answer
//! into lines for a result region.

pub mod client;
pub mod error;
pub mod file;
pub mod handler;
pub mod render;

pub use client::{DEFAULT_ENDPOINT, FILE_FIELD, RecognitionClient, RecognitionResult};
pub use error::{Result, UploadError};
pub use file::{ALLOWED_MIME_TYPES, SelectedFile, is_allowed_mime_type};
pub use handler::{ResultSurface, UploadHandler, UploadState};
pub use render::{DisplayLine, LineClass, Outcome, render};
