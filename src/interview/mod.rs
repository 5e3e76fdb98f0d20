//! Scripted mock-interview flow: a question state machine plus the speech
//! collaborators that voice it.

mod answers;
mod questions;
mod speech;

pub use answers::{evaluate_answer, overall_score, AnswerEvaluation};
pub use questions::{
    draw_session_questions, question_bank, Question, QuestionCategory, QUESTIONS_PER_SESSION,
};
pub use speech::{SpeakOutcome, SpeechRecognizer, SpeechSynthesizer, Transcript};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::scoring::ConfidenceLevel;

const WELCOME_LINE: &str = "Welcome to your interview simulation. I will ask you several questions. Please answer clearly and thoroughly. Let's begin with the first question.";
const RETRY_LINE: &str = "I didn't hear your answer. Please try again.";
const SKIP_LINE: &str = "Moving to the next question.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum InterviewStatus {
    Idle,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewSummary {
    pub overall_score: u8,
    pub level: ConfidenceLevel,
    pub answers: Vec<AnswerEvaluation>,
    pub started_at: DateTime<Utc>,
}

/// One mock interview: a drawn question list walked front to back, with an
/// evaluation recorded per question.
pub struct InterviewFlow {
    questions: Vec<Question>,
    answers: Vec<AnswerEvaluation>,
    current: usize,
    status: InterviewStatus,
    started_at: DateTime<Utc>,
}

impl InterviewFlow {
    /// Flow over a random draw from the built-in question bank.
    pub fn new() -> Self {
        Self::with_questions(questions::draw_session_questions(&mut rand::thread_rng()))
    }

    /// Flow over a caller-chosen question list.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
            current: 0,
            status: InterviewStatus::Idle,
            started_at: Utc::now(),
        }
    }

    pub fn start(&mut self) -> Result<&Question> {
        if self.status == InterviewStatus::InProgress {
            bail!("interview already in progress");
        }
        if self.questions.is_empty() {
            bail!("no questions to ask");
        }
        self.answers.clear();
        self.current = 0;
        self.status = InterviewStatus::InProgress;
        self.started_at = Utc::now();
        info!("interview started with {} questions", self.questions.len());
        Ok(&self.questions[0])
    }

    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[AnswerEvaluation] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        (self.status == InterviewStatus::InProgress).then(|| &self.questions[self.current])
    }

    /// Scores the transcript against the current question and advances.
    pub fn submit_answer(&mut self, transcript: &str, confidence: f64) -> Result<AnswerEvaluation> {
        let Some(question) = self.current_question() else {
            bail!("no question awaiting an answer");
        };
        if transcript.trim().is_empty() {
            bail!("answer transcript is empty");
        }
        let evaluation = answers::evaluate_answer(question, transcript, confidence);
        self.answers.push(evaluation.clone());
        self.advance();
        Ok(evaluation)
    }

    /// Records a zero-score entry for the current question and advances.
    pub fn skip_question(&mut self) -> Result<AnswerEvaluation> {
        if self.current_question().is_none() {
            bail!("no question to skip");
        }
        let evaluation = answers::skipped_answer();
        self.answers.push(evaluation.clone());
        self.advance();
        Ok(evaluation)
    }

    /// Ends the interview where it stands and averages what was recorded.
    pub fn finish(&mut self) -> InterviewSummary {
        self.status = InterviewStatus::Complete;
        let overall = answers::overall_score(&self.answers);
        info!(
            "interview finished: {} answers, overall score {}",
            self.answers.len(),
            overall
        );
        InterviewSummary {
            overall_score: overall,
            level: ConfidenceLevel::for_score(overall),
            answers: self.answers.clone(),
            started_at: self.started_at,
        }
    }

    /// Voice-driven run over the whole flow: asks each question aloud,
    /// listens for the answer, speaks the feedback, then reports the
    /// summary. A silent answer gets one retry before the question is
    /// skipped.
    pub async fn run_with_speech(
        &mut self,
        synthesizer: &dyn SpeechSynthesizer,
        recognizer: &dyn SpeechRecognizer,
    ) -> Result<InterviewSummary> {
        self.start()?;
        synthesizer.cancel();
        speak_and_wait(synthesizer, WELCOME_LINE).await?;

        loop {
            let (prompt, is_first) = match self.current_question() {
                Some(question) => (question.text.clone(), self.current == 0),
                None => break,
            };
            let prompt = if is_first {
                prompt
            } else {
                format!("Next question: {prompt}")
            };
            speak_and_wait(synthesizer, &prompt).await?;

            let mut transcript = listen_once(recognizer).await?;
            if transcript.text.trim().is_empty() {
                speak_and_wait(synthesizer, RETRY_LINE).await?;
                transcript = listen_once(recognizer).await?;
            }

            if transcript.text.trim().is_empty() {
                self.skip_question()?;
                speak_and_wait(synthesizer, SKIP_LINE).await?;
            } else {
                let evaluation = self.submit_answer(&transcript.text, transcript.confidence)?;
                speak_and_wait(synthesizer, &evaluation.feedback).await?;
            }
        }

        let summary = self.finish();
        let closing = format!(
            "Interview completed! Your average score was {} percent. Thank you for participating.",
            summary.overall_score
        );
        speak_and_wait(synthesizer, &closing).await?;
        Ok(summary)
    }

    fn advance(&mut self) {
        self.current += 1;
        if self.current >= self.questions.len() {
            self.status = InterviewStatus::Complete;
        }
    }
}

impl Default for InterviewFlow {
    fn default() -> Self {
        Self::new()
    }
}

async fn speak_and_wait(synthesizer: &dyn SpeechSynthesizer, line: &str) -> Result<()> {
    synthesizer
        .speak(line)
        .await
        .context("speech synthesizer dropped mid-utterance")?;
    Ok(())
}

async fn listen_once(recognizer: &dyn SpeechRecognizer) -> Result<Transcript> {
    recognizer
        .listen()
        .await
        .context("speech recognizer dropped without a transcript")
}
