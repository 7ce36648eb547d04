//! Targeted confirmation of a single suspected disease.
//!
//! Symptoms the patient did not confirm up front get a second look: each has
//! a bounded list of clarifying yes/no questions, asked in order, and the
//! symptom is promoted to confirmed only on a strict majority of affirmative
//! answers. The machine is resumable, one answer per step, so it serves
//! both batch callers and the message-at-a-time chat flow.

use std::collections::{HashMap, VecDeque};

use crate::models::enums::ConfirmationOutcome;
use crate::models::Disease;

use super::types::{ConfirmationReport, TriageError};

/// The clarifying question currently awaiting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPrompt {
    pub symptom: String,
    pub question: String,
    /// 0-based position within this symptom's question list.
    pub index: usize,
    pub total: usize,
}

/// Follow-up questioning for one unconfirmed symptom.
#[derive(Debug)]
struct SymptomProbe {
    symptom: String,
    questions: Vec<String>,
    answered: usize,
    affirmative: usize,
}

/// Resumable confirmation machine for one disease.
#[derive(Debug)]
pub struct Escalation {
    disease: String,
    symptoms: Vec<String>,
    initial: Vec<String>,
    promoted: Vec<String>,
    probes: VecDeque<SymptomProbe>,
}

impl Escalation {
    /// Start confirmation from the initial yes/no answers. Symptoms absent
    /// from `initial_answers` count as answered no. Unconfirmed symptoms
    /// without clarifying questions are not probed and stay unconfirmed.
    pub fn new(disease: &Disease, initial_answers: &HashMap<String, bool>) -> Self {
        let mut initial = Vec::new();
        let mut probes = VecDeque::new();

        for symptom in &disease.symptoms {
            if initial_answers.get(symptom).copied().unwrap_or(false) {
                initial.push(symptom.clone());
                continue;
            }
            let questions = disease.questions_for(symptom);
            if !questions.is_empty() {
                probes.push_back(SymptomProbe {
                    symptom: symptom.clone(),
                    questions: questions.to_vec(),
                    answered: 0,
                    affirmative: 0,
                });
            }
        }

        Self {
            disease: disease.name.clone(),
            symptoms: disease.symptoms.clone(),
            initial,
            promoted: Vec::new(),
            probes,
        }
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    pub fn is_finished(&self) -> bool {
        self.probes.is_empty()
    }

    /// The question to ask next, if any remain.
    pub fn next_prompt(&self) -> Option<EscalationPrompt> {
        let probe = self.probes.front()?;
        Some(EscalationPrompt {
            symptom: probe.symptom.clone(),
            question: probe.questions[probe.answered].clone(),
            index: probe.answered,
            total: probe.questions.len(),
        })
    }

    /// Record the answer to the pending question. When a symptom's question
    /// list is exhausted it is promoted iff affirmatives form a strict
    /// majority (`a > total / 2`, integer division; a tie does not promote).
    pub fn answer(&mut self, affirmative: bool) -> Result<(), TriageError> {
        let probe = self.probes.front_mut().ok_or(TriageError::NoPendingQuestion)?;

        probe.answered += 1;
        if affirmative {
            probe.affirmative += 1;
        }

        if probe.answered == probe.questions.len() {
            let probe = self.probes.pop_front().expect("front probe exists");
            if probe.affirmative > probe.questions.len() / 2 {
                tracing::debug!(
                    disease = %self.disease,
                    symptom = %probe.symptom,
                    affirmative = probe.affirmative,
                    total = probe.questions.len(),
                    "Symptom promoted by clarifying questions"
                );
                self.promoted.push(probe.symptom);
            }
        }

        Ok(())
    }

    /// Symptoms promoted by questioning so far, in definition order.
    pub fn promoted(&self) -> &[String] {
        &self.promoted
    }

    /// Score the confirmation. Meaningful once [`is_finished`] is true, but
    /// callable at any point (pending probes simply count as unconfirmed).
    ///
    /// [`is_finished`]: Self::is_finished
    pub fn report(&self) -> ConfirmationReport {
        let confirmed_symptoms: Vec<String> = self
            .symptoms
            .iter()
            .filter(|s| self.initial.contains(*s) || self.promoted.contains(*s))
            .cloned()
            .collect();

        let total = self.symptoms.len();
        let confidence = confirmed_symptoms.len() as f64 / total as f64;

        let outcome = if confirmed_symptoms.len() == total {
            ConfirmationOutcome::Confirmed
        } else if confirmed_symptoms.is_empty() {
            ConfirmationOutcome::Unlikely
        } else if confidence >= 0.5 {
            ConfirmationOutcome::LikelyHigh
        } else {
            ConfirmationOutcome::LikelyLow
        };

        ConfirmationReport {
            disease: self.disease.clone(),
            outcome,
            confirmed_symptoms,
            total_symptoms: total,
            confidence,
        }
    }
}

/// Drive a full confirmation with a synchronous answer source.
/// `ask` receives (symptom, question) and returns the yes/no answer.
pub fn confirm_with<F>(
    disease: &Disease,
    initial_answers: &HashMap<String, bool>,
    mut ask: F,
) -> ConfirmationReport
where
    F: FnMut(&str, &str) -> bool,
{
    let mut escalation = Escalation::new(disease, initial_answers);
    while let Some(prompt) = escalation.next_prompt() {
        let answer = ask(&prompt.symptom, &prompt.question);
        escalation
            .answer(answer)
            .expect("prompt was pending, answer must be accepted");
    }
    escalation.report()
}
