use crate::{
    client::RecognitionClient,
    error::{Result, UploadError},
    file::SelectedFile,
    render::{DisplayLine, INVALID_TYPE_ALERT, NO_FILE_ALERT, Outcome, render},
};
use std::sync::{Mutex, PoisonError};

/// The user interface an activation writes to.
pub trait ResultSurface {
    /// Shows a blocking message to the user.
    fn alert(&mut self, message: &str);

    /// Clears the result region and fills it with `lines`.
    fn replace(&mut self, lines: Vec<DisplayLine>);
}

/// Progress of the attempt currently owned by the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadState {
    /// Ready for a new activation.
    Idle,
    /// The attempt owns the handler and the selection is being checked.
    FileChecked,
    /// The declared type is in the allow-list.
    Validated,
    /// Waiting for the server.
    Uploading,
}

impl UploadState {
    /// Returns the state as a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Idle => "idle",
            UploadState::FileChecked => "file-checked",
            UploadState::Validated => "validated",
            UploadState::Uploading => "uploading",
        }
    }
}

// Owns the handler state for one attempt and hands it back on drop.
struct Attempt<'a> {
    state: &'a Mutex<UploadState>,
}

impl Attempt<'_> {
    fn advance(&self, next: UploadState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        self.advance(UploadState::Idle);
    }
}

/// Runs the select, validate, upload and render flow for each activation.
///
/// Only one attempt may be outstanding at a time: an activation arriving
/// while another is still waiting for the server is ignored, as if the
/// trigger were disabled.
pub struct UploadHandler {
    client: RecognitionClient,
    state: Mutex<UploadState>,
}

impl UploadHandler {
    /// Creates an idle handler uploading through `client`.
    pub fn new(client: RecognitionClient) -> Self {
        Self {
            client,
            state: Mutex::new(UploadState::Idle),
        }
    }

    /// Returns the current state of the handler.
    pub fn state(&self) -> UploadState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn try_begin(&self) -> Result<Attempt<'_>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != UploadState::Idle {
            return Err(UploadError::AttemptInProgress);
        }
        *state = UploadState::FileChecked;
        Ok(Attempt { state: &self.state })
    }

    /// Runs one attempt for the current selection.
    ///
    /// Missing or mistyped files are reported with an alert and never reach
    /// the network. Otherwise the region shows the loading line, then the
    /// rendered outcome. Transport and decoding failures are logged and
    /// rendered as a generic failure; they do not surface as `Err`.
    ///
    /// # Arguments
    /// * `selection` - The file currently picked by the user, if any
    /// * `surface` - Where alerts and the result region are written
    ///
    /// # Returns
    /// The outcome rendered last, or the reason the attempt halted before
    /// any network activity.
    pub async fn activate<S: ResultSurface>(
        &self,
        selection: Option<SelectedFile>,
        surface: &mut S,
    ) -> Result<Outcome> {
        // Claimed before looking at the selection: a busy trigger raises no alert.
        let attempt = self.try_begin().inspect_err(|_| {
            log::debug!("An upload is still in progress");
        })?;

        let Some(file) = selection else {
            log::warn!("No file selected");
            surface.alert(NO_FILE_ALERT);
            return Err(UploadError::NoFileSelected);
        };

        log::debug!(
            "File selected: {} ({:?}, {} bytes)",
            file.name,
            file.mime_type,
            file.bytes.len()
        );

        if !file.is_allowed() {
            log::warn!("Invalid file type {:?}, accepted types: JPEG, PNG", file.mime_type);
            surface.alert(INVALID_TYPE_ALERT);
            return Err(UploadError::UnsupportedMimeType(file.mime_type));
        }
        attempt.advance(UploadState::Validated);

        surface.replace(render(&Outcome::Loading));
        attempt.advance(UploadState::Uploading);

        log::debug!("Uploading the image to {}", self.client.endpoint());

        let outcome = match self.client.upload(&file).await {
            Ok(result) => {
                log::info!("Result received: {:?}", result);
                Outcome::Completed(result)
            }
            Err(err) => {
                log::error!("Error while sending the request or decoding the answer: {err}");
                Outcome::Failed
            }
        };

        surface.replace(render(&outcome));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        alerts: Vec<String>,
        regions: Vec<Vec<DisplayLine>>,
    }

    impl ResultSurface for Recorder {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn replace(&mut self, lines: Vec<DisplayLine>) {
            self.regions.push(lines);
        }
    }

    // Nothing listens there; any request would fail with a network error.
    fn unreachable_handler() -> UploadHandler {
        UploadHandler::new(RecognitionClient::with_endpoint("http://127.0.0.1:1/upload"))
    }

    #[tokio::test]
    async fn missing_file_alerts_without_touching_the_region() {
        let handler = unreachable_handler();
        let mut surface = Recorder::default();

        let err = handler.activate(None, &mut surface).await.unwrap_err();

        assert!(matches!(err, UploadError::NoFileSelected));
        assert_eq!(surface.alerts, ["Veuillez sélectionner une image."]);
        assert!(surface.regions.is_empty());
        assert_eq!(handler.state(), UploadState::Idle);
    }

    #[tokio::test]
    async fn wrong_type_alerts_and_returns_to_idle() {
        let handler = unreachable_handler();
        let mut surface = Recorder::default();
        let file = SelectedFile::new("face.gif", "image/gif", vec![0x47, 0x49, 0x46]);

        let err = handler.activate(Some(file), &mut surface).await.unwrap_err();

        assert!(matches!(err, UploadError::UnsupportedMimeType(ref mime) if mime == "image/gif"));
        assert_eq!(
            surface.alerts,
            ["Veuillez télécharger une image au format JPEG ou PNG."]
        );
        assert!(surface.regions.is_empty());
        assert_eq!(handler.state(), UploadState::Idle);
    }

    #[tokio::test]
    async fn unreachable_server_renders_generic_failure() {
        let handler = unreachable_handler();
        let mut surface = Recorder::default();
        let file = SelectedFile::new("face.png", "image/png", vec![0x89, b'P', b'N', b'G']);

        let outcome = handler.activate(Some(file), &mut surface).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert!(surface.alerts.is_empty());
        assert_eq!(surface.regions.len(), 2);
        assert_eq!(surface.regions[0], render(&Outcome::Loading));
        assert_eq!(surface.regions[1], render(&Outcome::Failed));
        assert_eq!(handler.state(), UploadState::Idle);
    }

    #[tokio::test]
    async fn busy_handler_ignores_activation_without_alert() {
        let handler = unreachable_handler();
        let mut surface = Recorder::default();
        let attempt = handler.try_begin().unwrap();
        attempt.advance(UploadState::Uploading);

        let err = handler.activate(None, &mut surface).await.unwrap_err();
        assert!(matches!(err, UploadError::AttemptInProgress));

        let file = SelectedFile::new("face.gif", "image/gif", Vec::new());
        let err = handler.activate(Some(file), &mut surface).await.unwrap_err();
        assert!(matches!(err, UploadError::AttemptInProgress));

        assert!(surface.alerts.is_empty());
        assert!(surface.regions.is_empty());
        assert_eq!(handler.state(), UploadState::Uploading);

        drop(attempt);
        assert_eq!(handler.state(), UploadState::Idle);
    }

    #[test]
    fn dropped_attempt_releases_the_handler() {
        let handler = unreachable_handler();
        {
            let attempt = handler.try_begin().unwrap();
            attempt.advance(UploadState::Uploading);
            assert_eq!(handler.state(), UploadState::Uploading);
            assert!(matches!(
                handler.try_begin(),
                Err(UploadError::AttemptInProgress)
            ));
        }
        assert_eq!(handler.state(), UploadState::Idle);
        assert_eq!(handler.state().as_str(), "idle");
    }
}
