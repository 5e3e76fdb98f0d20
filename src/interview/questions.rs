use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Questions asked per interview session, drawn from the bank.
pub const QUESTIONS_PER_SESSION: usize = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum QuestionCategory {
    General,
    Behavioral,
    Technical,
    Leadership,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub category: QuestionCategory,
    pub expected_keywords: Vec<String>,
    pub time_limit_secs: u64,
}

impl Question {
    fn new(
        id: u32,
        text: &str,
        category: QuestionCategory,
        expected_keywords: &[&str],
        time_limit_secs: u64,
    ) -> Self {
        Self {
            id,
            text: text.to_string(),
            category,
            expected_keywords: expected_keywords.iter().map(|k| k.to_string()).collect(),
            time_limit_secs,
        }
    }
}

/// The built-in interview question bank.
pub fn question_bank() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "Tell me about yourself and your professional background.",
            QuestionCategory::General,
            &["experience", "skills", "background", "career", "professional", "work"],
            120,
        ),
        Question::new(
            2,
            "Describe a challenging project you worked on and how you overcame the obstacles.",
            QuestionCategory::Behavioral,
            &["challenge", "problem", "solution", "overcome", "project", "team", "result"],
            180,
        ),
        Question::new(
            3,
            "What are your greatest strengths and how do they apply to this role?",
            QuestionCategory::General,
            &["strengths", "skills", "abilities", "role", "apply", "contribute"],
            120,
        ),
        Question::new(
            4,
            "Tell me about a time when you had to work with a difficult team member.",
            QuestionCategory::Behavioral,
            &["team", "difficult", "conflict", "communication", "resolution", "collaboration"],
            150,
        ),
        Question::new(
            5,
            "How do you handle pressure and tight deadlines?",
            QuestionCategory::Behavioral,
            &["pressure", "deadline", "stress", "manage", "prioritize", "organize"],
            120,
        ),
        Question::new(
            6,
            "Describe your leadership style and give an example of when you led a team.",
            QuestionCategory::Leadership,
            &["leadership", "style", "team", "lead", "manage", "example", "result"],
            180,
        ),
        Question::new(
            7,
            "What motivates you and what are your career goals?",
            QuestionCategory::General,
            &["motivate", "goals", "career", "ambition", "growth", "future"],
            120,
        ),
        Question::new(
            8,
            "Tell me about a mistake you made and what you learned from it.",
            QuestionCategory::Behavioral,
            &["mistake", "error", "learned", "lesson", "improve", "growth"],
            150,
        ),
    ]
}

/// Shuffled draw of `QUESTIONS_PER_SESSION` questions for one session.
pub fn draw_session_questions<R: Rng + ?Sized>(rng: &mut R) -> Vec<Question> {
    let mut bank = question_bank();
    bank.shuffle(rng);
    bank.truncate(QUESTIONS_PER_SESSION);
    bank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_questions_have_keywords_and_limits() {
        let bank = question_bank();
        assert_eq!(bank.len(), 8);
        for question in &bank {
            assert!(!question.expected_keywords.is_empty());
            assert!(question.time_limit_secs >= 120);
        }
    }

    #[test]
    fn draws_are_distinct_bank_questions() {
        let mut rng = rand::thread_rng();
        let drawn = draw_session_questions(&mut rng);
        assert_eq!(drawn.len(), QUESTIONS_PER_SESSION);

        let mut ids: Vec<u32> = drawn.iter().map(|q| q.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), QUESTIONS_PER_SESSION);
    }
}
