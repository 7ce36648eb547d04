use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A catalog entry: one disease, the symptoms that define it, optional
/// clarifying questions per symptom, and a treatment description.
///
/// `symptoms` keeps definition order; questionnaires walk it front to back.
/// `treatment` is opaque descriptive text, rendered but never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub detailed_questions: HashMap<String, Vec<String>>,
    pub treatment: String,
}

impl Disease {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.iter().any(|s| s == symptom)
    }

    /// Clarifying questions for a symptom, in order. Empty when none exist.
    pub fn questions_for(&self, symptom: &str) -> &[String] {
        self.detailed_questions
            .get(symptom)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
