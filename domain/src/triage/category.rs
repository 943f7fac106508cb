//! Symptom category classification
//!
//! Maps free-text symptom descriptions to a closed set of clinical
//! categories by keyword membership. Keyword classes are tested in a fixed
//! priority order and the first match wins, so overlapping keywords resolve
//! by precedence, not by counting. Intake text arrives in Japanese from the
//! questionnaire flow; English equivalents are matched as well.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Coarse clinical classification bucket used for grouping and clinician
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    RespiratoryInfectious,
    Digestive,
    NeuroPsychiatric,
    Dermatologic,
    Musculoskeletal,
    GeneralInternal,
}

/// Keyword classes in match-precedence order. The fallback category carries
/// no keywords and is returned when nothing else matches.
const KEYWORD_CLASSES: &[(Category, &[&str])] = &[
    (
        Category::RespiratoryInfectious,
        &["発熱", "熱", "咳", "のど", "fever", "cough", "throat"],
    ),
    (
        Category::Digestive,
        &[
            "腹痛",
            "胃痛",
            "下痢",
            "便秘",
            "stomach",
            "abdominal",
            "diarrhea",
            "constipation",
        ],
    ),
    (
        Category::NeuroPsychiatric,
        &[
            "頭痛",
            "めまい",
            "不安",
            "うつ",
            "headache",
            "dizziness",
            "anxiety",
            "depression",
        ],
    ),
    (
        Category::Dermatologic,
        &["皮膚", "かゆみ", "湿疹", "skin", "itch", "rash"],
    ),
    (
        Category::Musculoskeletal,
        &["関節", "腰痛", "筋肉", "joint", "back pain", "muscle"],
    ),
];

impl Category {
    /// Classify free-text symptoms into a category.
    ///
    /// Total and deterministic: unmatched text falls back to
    /// [`Category::GeneralInternal`].
    pub fn from_symptoms(free_text: &str) -> Self {
        let text = free_text.to_lowercase();

        for (category, keywords) in KEYWORD_CLASSES {
            if keywords.iter().any(|keyword| text.contains(keyword)) {
                return *category;
            }
        }

        Category::GeneralInternal
    }

    /// All categories, in classification precedence order.
    pub fn all() -> &'static [Category] {
        &[
            Category::RespiratoryInfectious,
            Category::Digestive,
            Category::NeuroPsychiatric,
            Category::Dermatologic,
            Category::Musculoskeletal,
            Category::GeneralInternal,
        ]
    }

    /// Stable identifier used in config files and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::RespiratoryInfectious => "respiratory-infectious",
            Category::Digestive => "digestive",
            Category::NeuroPsychiatric => "neuro-psychiatric",
            Category::Dermatologic => "dermatologic",
            Category::Musculoskeletal => "musculoskeletal",
            Category::GeneralInternal => "general-internal",
        }
    }

    /// Clinician-facing label, as shown on the consultation schedule.
    pub fn label(&self) -> &'static str {
        match self {
            Category::RespiratoryInfectious => "呼吸器・感染症",
            Category::Digestive => "消化器",
            Category::NeuroPsychiatric => "神経・精神",
            Category::Dermatologic => "皮膚科",
            Category::Musculoskeletal => "整形外科",
            Category::GeneralInternal => "一般内科",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "respiratory-infectious" => Ok(Category::RespiratoryInfectious),
            "digestive" => Ok(Category::Digestive),
            "neuro-psychiatric" => Ok(Category::NeuroPsychiatric),
            "dermatologic" => Ok(Category::Dermatologic),
            "musculoskeletal" => Ok(Category::Musculoskeletal),
            "general-internal" => Ok(Category::GeneralInternal),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}
