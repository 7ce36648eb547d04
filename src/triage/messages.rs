use crate::catalog::DiseaseCatalog;
use crate::models::enums::ConfirmationOutcome;

use super::types::{ConfirmationReport, ScreeningReport};

/// Patient-facing message builder. Calm, non-alarming wording; every result
/// message ends with guidance rather than a verdict alone.
pub struct MessageTemplates;

impl MessageTemplates {
    pub fn greeting() -> String {
        "Welcome to the dental symptom checker. Send any message to begin.".to_string()
    }

    pub fn action_prompt() -> String {
        "Do you want 'diagnosis' or 'confirm'?".to_string()
    }

    pub fn invalid_action() -> String {
        "Invalid input. Please choose 'diagnosis' or 'confirm'.".to_string()
    }

    pub fn symptom_question(symptom: &str) -> String {
        format!("Do you have {symptom}? (yes or no)")
    }

    pub fn choose_disease(catalog: &DiseaseCatalog) -> String {
        let names: Vec<&str> = catalog.all().iter().map(|d| d.name.as_str()).collect();
        format!(
            "Please enter the disease name you want to confirm. Available: {}.",
            names.join(", ")
        )
    }

    pub fn disease_not_found(name: &str) -> String {
        format!("Disease '{name}' not found in our database.")
    }

    pub fn escalation_intro() -> String {
        "Let's do a more detailed investigation of your symptoms.".to_string()
    }

    pub fn clarifying_question(question: &str) -> String {
        format!("{question} (yes or no)")
    }

    pub fn restart_hint() -> String {
        "Send any message to start a new check.".to_string()
    }

    /// Render a bulk screening result. Exact matches take precedence; partial
    /// matches are offered only when nothing matched exactly, and an empty
    /// report becomes a consult-a-professional fallback.
    pub fn screening_result(report: &ScreeningReport, catalog: &DiseaseCatalog) -> String {
        let render = |results: &[super::types::MatchResult], header: &str| {
            let mut out = String::from(header);
            for result in results {
                let treatment = catalog
                    .get(&result.name)
                    .map(|d| d.treatment.as_str())
                    .unwrap_or("");
                out.push_str(&format!(
                    "\n- {} (symptoms matched: {} of {})\n  Symptoms: {}\n  Treatment: {}",
                    result.name,
                    result.matched_symptoms.len(),
                    result.total_symptoms,
                    result.matched_symptoms.join(", "),
                    treatment,
                ));
            }
            out
        };

        if !report.exact.is_empty() {
            render(&report.exact, "You have these diseases:")
        } else if !report.partial.is_empty() {
            render(&report.partial, "You may have these diseases:")
        } else {
            "No diseases match your symptoms. Please consult a dentist for further advice."
                .to_string()
        }
    }

    /// Render a targeted confirmation result.
    pub fn confirmation_result(report: &ConfirmationReport, treatment: Option<&str>) -> String {
        let symptoms = report.confirmed_symptoms.join(", ");
        match report.outcome {
            ConfirmationOutcome::Confirmed => format!(
                "Confirmed: you have {}.\nMatching symptoms: {}.\nTreatment options: {}",
                report.disease,
                symptoms,
                treatment.unwrap_or("ask your dentist"),
            ),
            ConfirmationOutcome::LikelyHigh => format!(
                "High probability of {}.\nConfirmed symptoms: {}.\nRecommendation: consult a \
                 dental professional for a definitive diagnosis.",
                report.disease, symptoms,
            ),
            ConfirmationOutcome::LikelyLow => format!(
                "Low probability of {}.\nPartially confirmed symptoms: {}.\nRecommendation: seek \
                 professional medical advice for an accurate diagnosis.",
                report.disease, symptoms,
            ),
            ConfirmationOutcome::Unlikely => format!(
                "Very low probability of {}.\nRecommendation: consult a dental professional for \
                 a comprehensive examination.",
                report.disease,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::triage::matcher::screen;

    #[test]
    fn exact_matches_take_precedence() {
        let catalog = DiseaseCatalog::builtin();
        let confirmed: BTreeSet<String> = ["bleeding gums", "swollen gums", "bad breath"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let report = screen(&confirmed, &catalog);

        let message = MessageTemplates::screening_result(&report, &catalog);
        assert!(message.starts_with("You have these diseases:"));
        assert!(message.contains("Gingivitis"));
        // Partial matches (Tooth Abscess shares two symptoms) are not shown
        assert!(!message.contains("Tooth Abscess"));
    }

    #[test]
    fn partial_only_when_no_exact() {
        let catalog = DiseaseCatalog::builtin();
        let confirmed: BTreeSet<String> = ["bleeding gums"].iter().map(|s| s.to_string()).collect();
        let report = screen(&confirmed, &catalog);

        let message = MessageTemplates::screening_result(&report, &catalog);
        assert!(message.starts_with("You may have these diseases:"));
        assert!(message.contains("Gingivitis"));
    }

    #[test]
    fn empty_report_recommends_a_dentist() {
        let catalog = DiseaseCatalog::builtin();
        let report = screen(&BTreeSet::new(), &catalog);
        let message = MessageTemplates::screening_result(&report, &catalog);
        assert!(message.contains("consult a dentist"));
    }

    #[test]
    fn confirmation_messages_name_the_disease() {
        let report = ConfirmationReport {
            disease: "Cavities".into(),
            outcome: ConfirmationOutcome::Unlikely,
            confirmed_symptoms: vec![],
            total_symptoms: 3,
            confidence: 0.0,
        };
        let message = MessageTemplates::confirmation_result(&report, None);
        assert!(message.contains("Very low probability of Cavities"));
    }
}
