//! Clinician roster from TOML (`[[roster.clinicians]]` entries)
//!
//! The roster is reference data injected into the engine. The built-in
//! default carries the five sample clinicians the service launched with;
//! deployments override it wholesale from their config file.

use cohort_domain::{Category, Clinician};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while converting raw config into domain types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Clinician {clinician}: unknown specialty '{specialty}'")]
    UnknownSpecialty {
        clinician: String,
        specialty: String,
    },
}

/// One clinician entry as written in TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileClinician {
    pub id: String,
    pub name: String,
    pub department: String,
    /// Category identifiers, e.g. `"respiratory-infectious"`.
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub rating: f32,
}

impl FileClinician {
    fn to_clinician(&self) -> Result<Clinician, ConfigError> {
        let mut specialties = Vec::with_capacity(self.specialties.len());
        for raw in &self.specialties {
            let category: Category = raw.parse().map_err(|_| ConfigError::UnknownSpecialty {
                clinician: self.id.clone(),
                specialty: raw.clone(),
            })?;
            specialties.push(category);
        }

        Ok(Clinician::new(
            self.id.clone(),
            self.name.clone(),
            self.department.clone(),
            specialties,
            self.experience_years,
            self.rating,
        ))
    }
}

/// Raw roster configuration from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRosterConfig {
    pub clinicians: Vec<FileClinician>,
}

impl Default for FileRosterConfig {
    fn default() -> Self {
        let entry = |id: &str, name: &str, department: &str, specialties: &[&str], years, rating| {
            FileClinician {
                id: id.to_string(),
                name: name.to_string(),
                department: department.to_string(),
                specialties: specialties.iter().map(|s| s.to_string()).collect(),
                experience_years: years,
                rating,
            }
        };

        Self {
            clinicians: vec![
                entry(
                    "dr-001",
                    "田中 一郎",
                    "internal-medicine",
                    &["respiratory-infectious", "general-internal"],
                    15,
                    4.8,
                ),
                entry("dr-002", "佐藤 美香", "dermatology", &["dermatologic"], 12, 4.9),
                entry("dr-003", "山田 健太", "orthopedics", &["musculoskeletal"], 20, 4.7),
                entry("dr-004", "鈴木 花子", "gastroenterology", &["digestive"], 18, 4.8),
                entry("dr-005", "高橋 太郎", "neurology", &["neuro-psychiatric"], 22, 4.9),
            ],
        }
    }
}

impl FileRosterConfig {
    /// Convert into the domain roster, rejecting unknown specialty ids.
    pub fn to_roster(&self) -> Result<Vec<Clinician>, ConfigError> {
        self.clinicians
            .iter()
            .map(FileClinician::to_clinician)
            .collect()
    }
}
