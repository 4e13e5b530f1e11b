use crate::client::RecognitionResult;

/// Shown while the server has not answered.
pub const LOADING_MESSAGE: &str = "Analyse en cours...";
/// Shown when the server recognized no face.
pub const NO_FACE_MESSAGE: &str = "Aucun visage reconnu.";
/// Shown for any transport or decoding failure.
pub const FAILURE_MESSAGE: &str = "Erreur lors de la reconnaissance faciale. Veuillez réessayer.";
/// Alert raised when no file is selected.
pub const NO_FILE_ALERT: &str = "Veuillez sélectionner une image.";
/// Alert raised when the declared type is not JPEG or PNG.
pub const INVALID_TYPE_ALERT: &str = "Veuillez télécharger une image au format JPEG ou PNG.";

/// What the result region should reflect for an attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The upload has been sent and no answer arrived yet.
    Loading,
    /// The server answered with a decodable body.
    Completed(RecognitionResult),
    /// Transport or decoding failed; the detail only goes to the log.
    Failed,
}

/// Style class of a line in the result region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineClass {
    /// The loading indicator.
    Loading,
    /// Any result line: a label, the empty message or an error.
    RecognizedFace,
}

impl LineClass {
    /// Returns the class as a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineClass::Loading => "loading",
            LineClass::RecognizedFace => "recognized-face",
        }
    }
}

/// One entry of the result region.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayLine {
    /// How the line is styled.
    pub class: LineClass,
    /// Plain text, unescaped.
    pub text: String,
}

impl DisplayLine {
    fn new(class: LineClass, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }
}

/// Computes the full content of the result region for an outcome.
///
/// The returned lines replace whatever the region showed before.
pub fn render(outcome: &Outcome) -> Vec<DisplayLine> {
    match outcome {
        Outcome::Loading => vec![DisplayLine::new(LineClass::Loading, LOADING_MESSAGE)],
        Outcome::Completed(RecognitionResult {
            error: Some(error), ..
        }) => vec![DisplayLine::new(
            LineClass::RecognizedFace,
            format!("Erreur : {error}"),
        )],
        Outcome::Completed(RecognitionResult {
            recognized_faces, ..
        }) if !recognized_faces.is_empty() => recognized_faces
            .iter()
            .map(|face| DisplayLine::new(LineClass::RecognizedFace, format!("Visage reconnu : {face}")))
            .collect(),
        Outcome::Completed(_) => vec![DisplayLine::new(LineClass::RecognizedFace, NO_FACE_MESSAGE)],
        Outcome::Failed => vec![DisplayLine::new(LineClass::RecognizedFace, FAILURE_MESSAGE)],
    }
}
