use crate::{
    error::{Result, UploadError},
    file::SelectedFile,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The recognition endpoint every upload is sent to.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9999/upload";

/// Name of the multipart part carrying the image.
pub const FILE_FIELD: &str = "file";

/// Decoded answer of the recognition endpoint.
///
/// When `error` is set it takes precedence over the labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecognitionResult {
    /// Cause reported by the server, if any.
    pub error: Option<String>,
    /// Recognized-face labels, in the order the server sent them.
    pub recognized_faces: Vec<String>,
}

// Wire shape, both fields optional.
#[derive(Deserialize)]
struct RecognitionResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    recognized_faces: Option<Vec<String>>,
}

impl RecognitionResult {
    /// Builds a result carrying only recognized-face labels.
    pub fn faces(labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            error: None,
            recognized_faces: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a result carrying a server-reported error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            recognized_faces: Vec::new(),
        }
    }

    /// Decodes a response body, which must be a JSON object.
    ///
    /// An empty or null `error` counts as absent. Without an error the body
    /// must carry `recognized_faces`.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        // Derived struct decoding also accepts arrays; only objects are valid.
        let object: Map<String, Value> = serde_json::from_slice(body)?;
        let response: RecognitionResponse = serde_json::from_value(Value::Object(object))?;

        match (response.error, response.recognized_faces) {
            (Some(error), _) if !error.is_empty() => Ok(Self::error(error)),
            (_, Some(recognized_faces)) => Ok(Self {
                error: None,
                recognized_faces,
            }),
            (_, None) => Err(UploadError::MissingFaces),
        }
    }
}

/// HTTP client posting images to the recognition endpoint.
#[derive(Clone, Debug)]
pub struct RecognitionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for RecognitionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RecognitionClient {
    /// Creates a client targeting [`DEFAULT_ENDPOINT`].
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Targets another endpoint, e.g. a server bound to an ephemeral port in tests.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Returns the URL uploads are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the file as a single multipart part and decodes the answer.
    ///
    /// No timeout and no retry are applied: the call waits as long as the
    /// server does.
    ///
    /// # Arguments
    /// * `file` - A file whose declared type has already been validated
    ///
    /// # Returns
    /// The decoded result, or a transport/decode error. A status outside
    /// 200-299 is an error even if the body is valid JSON.
    pub async fn upload(&self, file: &SelectedFile) -> Result<RecognitionResult> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        log::debug!("Sending {} to {}", file.name, self.endpoint);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();

        log::debug!("Response received from the server: {}", status);

        if !status.is_success() {
            log::error!("HTTP error: {}", status.as_u16());
            return Err(UploadError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        RecognitionResult::from_slice(&body)
    }
}
