//! Urgency scoring
//!
//! Derives a priority score from a questionnaire's severity, duration and
//! red-flag symptom text. Scores are clamped to `[1, 5]`; 4 and above marks
//! a patient for triage attention within their group.

use crate::questionnaire::QuestionnaireReport;
use serde::{Deserialize, Serialize};

/// Severity keywords worth +3 (severe) and +2 (moderate).
const SEVERE_KEYWORDS: &[&str] = &["重度", "激しい", "severe", "intense"];
const MODERATE_KEYWORDS: &[&str] = &["中等度", "moderate"];

/// Duration keywords worth +2 (a month or longer) and +1 (a week or longer).
const LONG_DURATION_KEYWORDS: &[&str] = &["1ヶ月", "それ以上", "month"];
const MEDIUM_DURATION_KEYWORDS: &[&str] = &["1週間", "week"];

/// Red-flag symptoms worth an independent +3.
const RED_FLAG_KEYWORDS: &[&str] = &["胸の痛み", "息苦しさ", "chest pain", "breath"];

/// Integer urgency ranking, 1 (low) to 5 (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityScore(u8);

impl PriorityScore {
    pub const MIN: PriorityScore = PriorityScore(1);
    pub const MAX: PriorityScore = PriorityScore(5);

    /// Threshold at or above which a patient is flagged for triage attention.
    pub const URGENT_THRESHOLD: u8 = 4;

    /// Create a score, clamping into `[1, 5]`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Derive the urgency score for a report.
    ///
    /// Starts at base priority 1; severity, duration and red-flag bonuses
    /// accumulate independently and the sum clamps at 5.
    pub fn from_report(report: &QuestionnaireReport) -> Self {
        let summary = &report.summary;
        let mut priority: u8 = 1;

        priority += match_bonus(&summary.severity, SEVERE_KEYWORDS, 3)
            .or_else(|| match_bonus(&summary.severity, MODERATE_KEYWORDS, 2))
            .unwrap_or(0);

        priority += match_bonus(&summary.duration, LONG_DURATION_KEYWORDS, 2)
            .or_else(|| match_bonus(&summary.duration, MEDIUM_DURATION_KEYWORDS, 1))
            .unwrap_or(0);

        priority += match_bonus(&summary.main_symptoms, RED_FLAG_KEYWORDS, 3).unwrap_or(0);

        Self::new(priority)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether this score flags the patient for triage attention.
    pub fn is_urgent(&self) -> bool {
        self.0 >= Self::URGENT_THRESHOLD
    }
}

impl std::fmt::Display for PriorityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn match_bonus(text: &str, keywords: &[&str], bonus: u8) -> Option<u8> {
    let text = text.to_lowercase();
    keywords
        .iter()
        .any(|keyword| text.contains(keyword))
        .then_some(bonus)
}
