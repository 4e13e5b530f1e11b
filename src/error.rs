/// Errors produced while running an upload attempt.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    // User input errors, recovered locally with an alert
    #[error("no file selected")]
    NoFileSelected,

    #[error("unsupported MIME type: {0:?}")]
    UnsupportedMimeType(String),

    /// Another attempt is still waiting for the server.
    #[error("an upload attempt is already in progress")]
    AttemptInProgress,

    // Transport errors
    #[error("server responded with {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    // Decode errors
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response carries neither an error nor recognized faces")]
    MissingFaces,

    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl UploadError {
    /// Returns true for errors caused by the user's selection rather than by
    /// the transport or the server.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            UploadError::NoFileSelected | UploadError::UnsupportedMimeType(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_input_errors_are_distinguished() {
        assert!(UploadError::NoFileSelected.is_user_input());
        assert!(UploadError::UnsupportedMimeType("image/gif".into()).is_user_input());
        assert!(!UploadError::AttemptInProgress.is_user_input());
        assert!(!UploadError::MissingFaces.is_user_input());
        assert!(
            !UploadError::Status {
                status: 500,
                reason: "Internal Server Error".into()
            }
            .is_user_input()
        );
    }

    #[test]
    fn status_error_mentions_reason() {
        let err = UploadError::Status {
            status: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "server responded with 404: Not Found");
    }
}
