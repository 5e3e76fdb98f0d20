use serde::{Deserialize, Serialize};

/// Coarse bands for presenting a composite score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ConfidenceLevel {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_scores_land_in_the_right_band() {
        assert_eq!(ConfidenceLevel::for_score(100), ConfidenceLevel::Excellent);
        assert_eq!(ConfidenceLevel::for_score(80), ConfidenceLevel::Excellent);
        assert_eq!(ConfidenceLevel::for_score(79), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::for_score(60), ConfidenceLevel::Good);
        assert_eq!(ConfidenceLevel::for_score(59), ConfidenceLevel::Fair);
        assert_eq!(ConfidenceLevel::for_score(40), ConfidenceLevel::Fair);
        assert_eq!(
            ConfidenceLevel::for_score(39),
            ConfidenceLevel::NeedsImprovement
        );
        assert_eq!(
            ConfidenceLevel::for_score(0),
            ConfidenceLevel::NeedsImprovement
        );
    }
}
