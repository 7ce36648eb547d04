use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::kb::{Fact, Goal, MemoryBackend, RuleBackend, Term};
use crate::models::enums::{ConfirmationOutcome, MatchClass};

// ---------------------------------------------------------------------------
// Screening results
// ---------------------------------------------------------------------------

/// One disease scored against a confirmed-symptom set.
/// Recomputed per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub name: String,
    /// Confirmed symptoms of this disease, in the disease's definition order.
    pub matched_symptoms: Vec<String>,
    pub total_symptoms: usize,
    pub classification: MatchClass,
}

/// Output of bulk screening: catalog-order partition into exact and partial
/// matches. Diseases with no overlap appear in neither list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub exact: Vec<MatchResult>,
    pub partial: Vec<MatchResult>,
}

impl ScreeningReport {
    /// True when nothing in the catalog matched at all.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.partial.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Confirmation results
// ---------------------------------------------------------------------------

/// Outcome of confirming one suspected disease, after any escalation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationReport {
    pub disease: String,
    pub outcome: ConfirmationOutcome,
    /// Confirmed symptoms in the disease's definition order, initial and
    /// promoted alike.
    pub confirmed_symptoms: Vec<String>,
    pub total_symptoms: usize,
    /// |confirmed| / |total|, the value bucketed at 0.5 for the likely
    /// outcomes.
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Unknown disease: {0}")]
    UnknownDisease(String),

    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("No clarifying question is pending")]
    NoPendingQuestion,

    #[error("Internal lock failed")]
    LockFailed,
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Interpret a free-text reply as a yes/no answer.
/// `y`/`yes` (trimmed, any case) is affirmative; everything else, malformed
/// text included, is negative. Transports that want to reject malformed
/// input must do so before calling in.
pub fn affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

// ---------------------------------------------------------------------------
// Confirmed-symptom set
// ---------------------------------------------------------------------------

const SYMPTOM_PREDICATE: &str = "symptom";

/// The symptoms a session currently believes are present, recorded as facts
/// in a pluggable rule backend. Grows monotonically: there is no retraction,
/// a symptom once confirmed stays confirmed for the life of the session.
pub struct ConfirmedSymptoms {
    backend: Box<dyn RuleBackend>,
}

impl ConfirmedSymptoms {
    pub fn new() -> Self {
        Self::with_backend(Box::new(MemoryBackend::new()))
    }

    pub fn with_backend(backend: Box<dyn RuleBackend>) -> Self {
        Self { backend }
    }

    pub fn confirm(&mut self, symptom: &str) {
        self.backend
            .assert_fact(Fact::new(SYMPTOM_PREDICATE, [symptom]));
    }

    pub fn contains(&self, symptom: &str) -> bool {
        let goal = Goal::new(SYMPTOM_PREDICATE, [Term::Atom(symptom.to_string())]);
        !self.backend.query(&goal).is_empty()
    }

    /// Current set of confirmed symptoms.
    pub fn snapshot(&self) -> BTreeSet<String> {
        let goal = Goal::new(SYMPTOM_PREDICATE, [Term::Var("S".into())]);
        self.backend
            .query(&goal)
            .into_iter()
            .filter_map(|mut b| b.remove("S"))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ConfirmedSymptoms {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affirmative_accepts_y_and_yes() {
        assert!(affirmative("y"));
        assert!(affirmative("Yes"));
        assert!(affirmative("  YES  "));
    }

    #[test]
    fn affirmative_defaults_negative() {
        assert!(!affirmative("n"));
        assert!(!affirmative("no"));
        assert!(!affirmative("maybe"));
        assert!(!affirmative(""));
        assert!(!affirmative("yeah sort of"));
    }

    #[test]
    fn confirmed_symptoms_grow_monotonically() {
        let mut confirmed = ConfirmedSymptoms::new();
        assert!(confirmed.is_empty());

        confirmed.confirm("tooth pain");
        confirmed.confirm("bad breath");
        confirmed.confirm("tooth pain");

        assert_eq!(confirmed.len(), 2);
        assert!(confirmed.contains("tooth pain"));
        assert!(confirmed.contains("bad breath"));
        assert!(!confirmed.contains("visible holes"));
    }

    #[test]
    fn snapshot_returns_full_set() {
        let mut confirmed = ConfirmedSymptoms::new();
        confirmed.confirm("swollen gums");
        confirmed.confirm("bleeding gums");

        let set = confirmed.snapshot();
        assert!(set.contains("swollen gums"));
        assert!(set.contains("bleeding gums"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_report_detection() {
        let report = ScreeningReport::default();
        assert!(report.is_empty());
    }
}
