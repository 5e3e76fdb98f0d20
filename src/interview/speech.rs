use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// How one text-to-speech utterance ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpeakOutcome {
    Finished,
    Cancelled,
}

/// One recognized utterance with the recognizer's own confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub text: String,
    pub confidence: f64,
}

/// Text-to-speech collaborator. `speak` queues the utterance and returns
/// immediately; the receiver resolves when it ends.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str) -> oneshot::Receiver<SpeakOutcome>;

    /// Drops any queued or in-flight utterances.
    fn cancel(&self);
}

/// Speech-to-text collaborator. The receiver resolves with the next final
/// transcript.
pub trait SpeechRecognizer: Send + Sync {
    fn listen(&self) -> oneshot::Receiver<Transcript>;
}
