use serde::{Deserialize, Serialize};

/// How a disease relates to a confirmed-symptom set during bulk screening.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchClass {
    /// Every catalog symptom of the disease is confirmed.
    Exact,
    /// Some but not all catalog symptoms are confirmed.
    Partial,
    /// No overlap at all.
    None,
}

impl MatchClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Partial => "partial",
            Self::None => "none",
        }
    }
}

/// Outcome of targeted confirmation of a single disease.
///
/// Deliberately separate from [`MatchClass`]: screening partitions the whole
/// catalog, confirmation scores one suspected disease after follow-up
/// questioning. The two flows never share a classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationOutcome {
    /// All of the disease's symptoms confirmed.
    Confirmed,
    /// At least half confirmed (confidence >= 0.5).
    LikelyHigh,
    /// Some confirmed, under half (confidence < 0.5).
    LikelyLow,
    /// Nothing confirmed.
    Unlikely,
}

impl ConfirmationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::LikelyHigh => "likely_high",
            Self::LikelyLow => "likely_low",
            Self::Unlikely => "unlikely",
        }
    }
}

/// Who said what in a session transcript.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_class_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&MatchClass::Exact).unwrap(), "\"exact\"");
    }

    #[test]
    fn outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConfirmationOutcome::LikelyHigh).unwrap(),
            "\"likely_high\""
        );
    }
}
