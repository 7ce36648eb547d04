//! Bulk screening: score every catalog disease against a confirmed-symptom
//! set and partition into exact and partial matches.
//!
//! Pure functions over a snapshot of session state. Catalog definition order
//! is preserved through both output lists; nothing is ranked by match count.

use std::collections::BTreeSet;

use crate::catalog::DiseaseCatalog;
use crate::models::enums::MatchClass;
use crate::models::Disease;

use super::types::{MatchResult, ScreeningReport};

/// Score one disease against the confirmed set.
pub fn classify(disease: &Disease, confirmed: &BTreeSet<String>) -> MatchResult {
    let matched_symptoms: Vec<String> = disease
        .symptoms
        .iter()
        .filter(|s| confirmed.contains(*s))
        .cloned()
        .collect();

    let classification = if matched_symptoms.len() == disease.symptoms.len() {
        MatchClass::Exact
    } else if matched_symptoms.is_empty() {
        MatchClass::None
    } else {
        MatchClass::Partial
    };

    MatchResult {
        name: disease.name.clone(),
        matched_symptoms,
        total_symptoms: disease.symptoms.len(),
        classification,
    }
}

/// Screen the whole catalog. Returns empty lists, not an error, when no
/// disease overlaps the confirmed set; the caller decides how to present
/// that.
pub fn screen(confirmed: &BTreeSet<String>, catalog: &DiseaseCatalog) -> ScreeningReport {
    let mut report = ScreeningReport::default();

    for disease in catalog.all() {
        let result = classify(disease, confirmed);
        match result.classification {
            MatchClass::Exact => report.exact.push(result),
            MatchClass::Partial => report.partial.push(result),
            MatchClass::None => {}
        }
    }

    tracing::debug!(
        confirmed = confirmed.len(),
        exact = report.exact.len(),
        partial = report.partial.len(),
        "Screening complete"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmed(symptoms: &[&str]) -> BTreeSet<String> {
        symptoms.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn full_symptom_set_is_exact() {
        let catalog = DiseaseCatalog::builtin();
        for disease in catalog.all() {
            let set: BTreeSet<String> = disease.symptoms.iter().cloned().collect();
            let result = classify(disease, &set);
            assert_eq!(result.classification, MatchClass::Exact, "{}", disease.name);
        }
    }

    #[test]
    fn disjoint_set_is_none() {
        let catalog = DiseaseCatalog::builtin();
        let set = confirmed(&["sore throat", "headache"]);
        for disease in catalog.all() {
            let result = classify(disease, &set);
            assert_eq!(result.classification, MatchClass::None, "{}", disease.name);
        }
    }

    #[test]
    fn gingivitis_exact_scenario() {
        let catalog = DiseaseCatalog::builtin();
        let report = screen(
            &confirmed(&["bleeding gums", "swollen gums", "bad breath"]),
            &catalog,
        );

        let exact: Vec<&str> = report.exact.iter().map(|r| r.name.as_str()).collect();
        assert!(exact.contains(&"Gingivitis"));
        assert!(!report.partial.iter().any(|r| r.name == "Gingivitis"));
    }

    #[test]
    fn single_symptom_is_partial() {
        let catalog = DiseaseCatalog::builtin();
        let report = screen(&confirmed(&["bleeding gums"]), &catalog);

        assert!(report.exact.is_empty());
        let gingivitis = report
            .partial
            .iter()
            .find(|r| r.name == "Gingivitis")
            .expect("Gingivitis should match partially");
        assert_eq!(gingivitis.matched_symptoms, vec!["bleeding gums"]);
        assert_eq!(gingivitis.total_symptoms, 3);
    }

    #[test]
    fn no_disease_in_both_lists() {
        let catalog = DiseaseCatalog::builtin();
        let report = screen(
            &confirmed(&["tooth pain", "sensitivity to sweets", "visible holes"]),
            &catalog,
        );

        for exact in &report.exact {
            assert!(
                !report.partial.iter().any(|p| p.name == exact.name),
                "{} in both lists",
                exact.name
            );
        }
        // Cavities is exact here, Tooth Sensitivity is also exact (subset)
        assert!(report.exact.iter().any(|r| r.name == "Cavities"));
        assert!(report.exact.iter().any(|r| r.name == "Tooth Sensitivity"));
    }

    #[test]
    fn catalog_order_preserved_in_partition() {
        let catalog = DiseaseCatalog::builtin();
        // tooth pain alone partially matches Cavities, Tooth Sensitivity,
        // Tooth Abscess, in catalog order regardless of match counts.
        let report = screen(&confirmed(&["tooth pain"]), &catalog);
        let names: Vec<&str> = report.partial.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Cavities", "Tooth Sensitivity", "Tooth Abscess"]);
    }

    #[test]
    fn empty_confirmed_set_matches_nothing() {
        let catalog = DiseaseCatalog::builtin();
        let report = screen(&BTreeSet::new(), &catalog);
        assert!(report.is_empty());
    }
}
