use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::questions::Question;

/// Characters of answer text worth one chunk of the detail bonus.
const DETAIL_CHUNK_CHARS: f64 = 50.0;
/// Points per detail chunk.
const DETAIL_CHUNK_POINTS: f64 = 20.0;
/// Cap on the detail bonus.
const DETAIL_BONUS_MAX: f64 = 40.0;

/// One scored answer, skipped questions included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEvaluation {
    pub transcript: String,
    pub confidence: f64,
    pub score: u8,
    pub feedback: String,
    pub matched_keywords: Vec<String>,
    pub answered_at: DateTime<Utc>,
}

/// Scores a transcript against the question's expected keywords plus a
/// length bonus for detailed answers.
pub fn evaluate_answer(question: &Question, transcript: &str, confidence: f64) -> AnswerEvaluation {
    let lowered = transcript.to_lowercase();
    let matched: Vec<String> = question
        .expected_keywords
        .iter()
        .filter(|keyword| lowered.contains(&keyword.to_lowercase()))
        .cloned()
        .collect();

    let keyword_score = if question.expected_keywords.is_empty() {
        0.0
    } else {
        (matched.len() as f64 / question.expected_keywords.len() as f64 * 100.0).min(100.0)
    };
    let length_score =
        (transcript.len() as f64 / DETAIL_CHUNK_CHARS * DETAIL_CHUNK_POINTS).min(DETAIL_BONUS_MAX);
    let score = (keyword_score + length_score).min(100.0);

    AnswerEvaluation {
        transcript: transcript.to_string(),
        confidence,
        score: score.round() as u8,
        feedback: feedback_for(question, score, &matched),
        matched_keywords: matched,
        answered_at: Utc::now(),
    }
}

/// Zero-score entry recorded when the candidate skips a question.
pub fn skipped_answer() -> AnswerEvaluation {
    AnswerEvaluation {
        transcript: String::new(),
        confidence: 0.0,
        score: 0,
        feedback: "Question skipped.".to_string(),
        matched_keywords: Vec::new(),
        answered_at: Utc::now(),
    }
}

/// Plain mean of the recorded scores, rounded. Zero when nothing was
/// recorded.
pub fn overall_score(answers: &[AnswerEvaluation]) -> u8 {
    if answers.is_empty() {
        return 0;
    }
    let sum: u64 = answers.iter().map(|answer| u64::from(answer.score)).sum();
    (sum as f64 / answers.len() as f64).round() as u8
}

fn feedback_for(question: &Question, score: f64, matched: &[String]) -> String {
    if score >= 80.0 {
        return "Excellent answer! You covered the key points comprehensively and provided good detail."
            .to_string();
    }
    if score >= 60.0 {
        let missing: Vec<&str> = question
            .expected_keywords
            .iter()
            .filter(|keyword| !matched.contains(keyword))
            .map(String::as_str)
            .take(2)
            .collect();
        return format!("Good answer, but consider mentioning: {}.", missing.join(", "));
    }
    if score >= 40.0 {
        let hints: Vec<&str> = question
            .expected_keywords
            .iter()
            .map(String::as_str)
            .take(3)
            .collect();
        return format!(
            "Your answer could be improved. Try to include more details about: {}.",
            hints.join(", ")
        );
    }
    let focus: Vec<&str> = question
        .expected_keywords
        .iter()
        .map(String::as_str)
        .take(4)
        .collect();
    format!(
        "Please provide a more detailed answer. Focus on: {}.",
        focus.join(", ")
    )
}
