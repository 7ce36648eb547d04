//! Chat-driven triage session.
//!
//! One session, one patient, one message at a time. The conversation is a
//! small state machine: pick an action, answer the screening questionnaire
//! or confirm one suspected disease (with follow-up questioning), read the
//! result, start over. States are an enum matched exhaustively. There is no
//! dead end; a finished session always returns to [`SessionStep::Start`].

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::DiseaseCatalog;
use crate::models::enums::Role;
use crate::models::Disease;

use super::escalation::Escalation;
use super::matcher;
use super::messages::MessageTemplates;
use super::types::{affirmative, ConfirmedSymptoms};

/// One line of conversation history.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

/// Where the conversation currently stands.
enum SessionStep {
    /// Fresh or finished. Any input moves to action selection.
    Start,
    /// Waiting for 'diagnosis' or 'confirm'.
    ActionSelection,
    /// Walking the symptom vocabulary. The front of `remaining` is the
    /// symptom the patient was just asked about.
    SymptomCheck { remaining: VecDeque<String> },
    /// Waiting for a disease name to confirm.
    DiseaseSelection,
    /// Asking the suspected disease's symptoms one by one.
    InitialCheck {
        disease: Disease,
        remaining: VecDeque<String>,
        answers: HashMap<String, bool>,
    },
    /// Clarifying questions for symptoms not confirmed up front.
    EscalationLoop {
        escalation: Escalation,
        treatment: String,
    },
}

/// A single diagnostic conversation. Owned exclusively by its session store
/// entry; never accessed concurrently.
pub struct Session {
    id: Uuid,
    catalog: Arc<DiseaseCatalog>,
    step: SessionStep,
    confirmed: ConfirmedSymptoms,
    transcript: Vec<TranscriptEntry>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(catalog: Arc<DiseaseCatalog>) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            catalog,
            step: SessionStep::Start,
            confirmed: ConfirmedSymptoms::new(),
            transcript: Vec::new(),
            started_at: Utc::now(),
        };
        session.record(Role::Assistant, MessageTemplates::greeting());
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Symptoms confirmed so far in this session.
    pub fn confirmed_symptoms(&self) -> std::collections::BTreeSet<String> {
        self.confirmed.snapshot()
    }

    fn record(&mut self, role: Role, content: String) {
        self.transcript.push(TranscriptEntry {
            role,
            content,
            at: Utc::now(),
        });
    }

    /// Feed one patient message through the state machine. Returns the
    /// assistant replies, which are also appended to the transcript.
    pub fn handle_message(&mut self, input: &str) -> Vec<String> {
        self.record(Role::Patient, input.to_string());

        let step = std::mem::replace(&mut self.step, SessionStep::Start);
        let (next, replies) = self.transition(step, input);
        self.step = next;

        for reply in &replies {
            self.record(Role::Assistant, reply.clone());
        }
        replies
    }

    fn transition(&mut self, step: SessionStep, input: &str) -> (SessionStep, Vec<String>) {
        match step {
            SessionStep::Start => (
                SessionStep::ActionSelection,
                vec![MessageTemplates::action_prompt()],
            ),

            SessionStep::ActionSelection => match input.trim().to_lowercase().as_str() {
                "diagnosis" => self.begin_symptom_check(),
                "confirm" => (
                    SessionStep::DiseaseSelection,
                    vec![MessageTemplates::choose_disease(&self.catalog)],
                ),
                _ => (
                    SessionStep::ActionSelection,
                    vec![MessageTemplates::invalid_action()],
                ),
            },

            SessionStep::SymptomCheck { mut remaining } => {
                let current = remaining
                    .pop_front()
                    .expect("symptom check state always has an asked symptom");
                if affirmative(input) {
                    self.confirmed.confirm(&current);
                }

                match remaining.front() {
                    Some(next) => {
                        let question = MessageTemplates::symptom_question(next);
                        (SessionStep::SymptomCheck { remaining }, vec![question])
                    }
                    None => self.finish_screening(),
                }
            }

            SessionStep::DiseaseSelection => {
                let name = input.trim();
                match self.catalog.get(name) {
                    Some(disease) => {
                        let disease = disease.clone();
                        let remaining: VecDeque<String> =
                            disease.symptoms.iter().cloned().collect();
                        let question = MessageTemplates::symptom_question(
                            remaining.front().expect("catalog diseases have symptoms"),
                        );
                        (
                            SessionStep::InitialCheck {
                                disease,
                                remaining,
                                answers: HashMap::new(),
                            },
                            vec![question],
                        )
                    }
                    None => {
                        tracing::debug!(disease = name, "Confirmation requested for unknown disease");
                        (
                            SessionStep::Start,
                            vec![
                                MessageTemplates::disease_not_found(name),
                                MessageTemplates::restart_hint(),
                            ],
                        )
                    }
                }
            }

            SessionStep::InitialCheck {
                disease,
                mut remaining,
                mut answers,
            } => {
                let current = remaining
                    .pop_front()
                    .expect("initial check state always has an asked symptom");
                let answer = affirmative(input);
                if answer {
                    self.confirmed.confirm(&current);
                }
                answers.insert(current, answer);

                match remaining.front() {
                    Some(next) => {
                        let question = MessageTemplates::symptom_question(next);
                        (
                            SessionStep::InitialCheck {
                                disease,
                                remaining,
                                answers,
                            },
                            vec![question],
                        )
                    }
                    None => {
                        let escalation = Escalation::new(&disease, &answers);
                        let treatment = disease.treatment.clone();
                        match escalation.next_prompt() {
                            Some(prompt) => (
                                SessionStep::EscalationLoop {
                                    escalation,
                                    treatment,
                                },
                                vec![
                                    MessageTemplates::escalation_intro(),
                                    MessageTemplates::clarifying_question(&prompt.question),
                                ],
                            ),
                            None => self.finish_confirmation(escalation, &treatment),
                        }
                    }
                }
            }

            SessionStep::EscalationLoop {
                mut escalation,
                treatment,
            } => {
                escalation
                    .answer(affirmative(input))
                    .expect("escalation state is only entered with a pending question");

                match escalation.next_prompt() {
                    Some(prompt) => (
                        SessionStep::EscalationLoop {
                            escalation,
                            treatment,
                        },
                        vec![MessageTemplates::clarifying_question(&prompt.question)],
                    ),
                    None => self.finish_confirmation(escalation, &treatment),
                }
            }
        }
    }

    /// Enter the screening questionnaire, skipping symptoms this session
    /// already confirmed.
    fn begin_symptom_check(&mut self) -> (SessionStep, Vec<String>) {
        let remaining: VecDeque<String> = self
            .catalog
            .symptom_vocabulary()
            .into_iter()
            .filter(|s| !self.confirmed.contains(s))
            .collect();

        match remaining.front() {
            Some(first) => {
                let question = MessageTemplates::symptom_question(first);
                (SessionStep::SymptomCheck { remaining }, vec![question])
            }
            // Everything already confirmed in an earlier round.
            None => self.finish_screening(),
        }
    }

    fn finish_screening(&mut self) -> (SessionStep, Vec<String>) {
        let report = matcher::screen(&self.confirmed.snapshot(), &self.catalog);
        tracing::info!(
            session_id = %self.id,
            exact = report.exact.len(),
            partial = report.partial.len(),
            "Screening finished"
        );
        (
            SessionStep::Start,
            vec![
                MessageTemplates::screening_result(&report, &self.catalog),
                MessageTemplates::restart_hint(),
            ],
        )
    }

    fn finish_confirmation(
        &mut self,
        escalation: Escalation,
        treatment: &str,
    ) -> (SessionStep, Vec<String>) {
        // Promotions feed the session's confirmed set; they are never undone.
        for symptom in escalation.promoted() {
            self.confirmed.confirm(symptom);
        }

        let report = escalation.report();
        tracing::info!(
            session_id = %self.id,
            disease = %report.disease,
            outcome = report.outcome.as_str(),
            "Confirmation finished"
        );
        (
            SessionStep::Start,
            vec![
                MessageTemplates::confirmation_result(&report, Some(treatment)),
                MessageTemplates::restart_hint(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_session() -> Session {
        Session::new(Arc::new(DiseaseCatalog::builtin()))
    }

    /// Drive the session with a sequence of inputs, returning the last
    /// batch of replies.
    fn drive(session: &mut Session, inputs: &[&str]) -> Vec<String> {
        let mut last = Vec::new();
        for input in inputs {
            last = session.handle_message(input);
        }
        last
    }

    #[test]
    fn greeting_is_first_transcript_entry() {
        let session = new_session();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::Assistant);
    }

    #[test]
    fn first_message_prompts_for_action() {
        let mut session = new_session();
        let replies = session.handle_message("hello");
        assert_eq!(replies, vec![MessageTemplates::action_prompt()]);
    }

    #[test]
    fn unknown_action_reprompts() {
        let mut session = new_session();
        let replies = drive(&mut session, &["hi", "treatment please"]);
        assert_eq!(replies, vec![MessageTemplates::invalid_action()]);
        // Still in action selection: a valid choice now works.
        let replies = session.handle_message("diagnosis");
        assert_eq!(replies, vec!["Do you have tooth pain? (yes or no)"]);
    }

    #[test]
    fn diagnosis_flow_finds_gingivitis() {
        let mut session = new_session();
        // Vocabulary order: tooth pain, sensitivity to sweets, visible holes,
        // swollen gums, bad breath, bleeding gums.
        let replies = drive(
            &mut session,
            &["hi", "diagnosis", "n", "n", "n", "y", "y", "y"],
        );
        assert_eq!(replies.len(), 2);
        assert!(replies[0].starts_with("You have these diseases:"));
        assert!(replies[0].contains("Gingivitis"));
        assert_eq!(replies[1], MessageTemplates::restart_hint());
    }

    #[test]
    fn diagnosis_with_no_symptoms_recommends_dentist() {
        let mut session = new_session();
        let replies = drive(
            &mut session,
            &["hi", "diagnosis", "n", "n", "n", "n", "n", "n"],
        );
        assert!(replies[0].contains("consult a dentist"));
    }

    #[test]
    fn confirm_flow_without_escalation() {
        let mut session = new_session();
        let replies = drive(
            &mut session,
            &["hi", "confirm", "Tooth Sensitivity", "y", "y"],
        );
        assert!(replies[0].starts_with("Confirmed: you have Tooth Sensitivity"));
    }

    #[test]
    fn confirm_flow_with_escalation_promotes_on_majority() {
        let mut session = new_session();
        // Deny tooth pain up front, confirm the other two Cavities symptoms,
        // then answer 3 of 4 clarifying questions affirmatively.
        let intro = drive(&mut session, &["hi", "confirm", "Cavities", "n", "y", "y"]);
        assert_eq!(intro[0], MessageTemplates::escalation_intro());
        assert!(intro[1].ends_with("(yes or no)"));

        let replies = drive(&mut session, &["y", "y", "y", "n"]);
        assert!(replies[0].starts_with("Confirmed: you have Cavities"));
        assert!(session.confirmed_symptoms().contains("tooth pain"));
    }

    #[test]
    fn confirm_flow_tie_does_not_promote() {
        let mut session = new_session();
        drive(&mut session, &["hi", "confirm", "Cavities", "n", "y", "y"]);
        // 2 of 4 affirmative: tie, not promoted. 2 of 3 symptoms confirmed.
        let replies = drive(&mut session, &["y", "y", "n", "n"]);
        assert!(replies[0].starts_with("High probability of Cavities"));
        assert!(!session.confirmed_symptoms().contains("tooth pain"));
    }

    #[test]
    fn unknown_disease_returns_to_start() {
        let mut session = new_session();
        let replies = drive(&mut session, &["hi", "confirm", "Periodontitis"]);
        assert_eq!(
            replies[0],
            MessageTemplates::disease_not_found("Periodontitis")
        );
        // Restartable: next message prompts for an action again.
        let replies = session.handle_message("ok");
        assert_eq!(replies, vec![MessageTemplates::action_prompt()]);
    }

    #[test]
    fn session_restarts_after_result() {
        let mut session = new_session();
        drive(
            &mut session,
            &["hi", "diagnosis", "n", "n", "n", "n", "n", "n"],
        );
        let replies = session.handle_message("again");
        assert_eq!(replies, vec![MessageTemplates::action_prompt()]);
    }

    #[test]
    fn confirmed_symptoms_persist_across_rounds() {
        let mut session = new_session();
        // First round: confirm only tooth pain.
        drive(
            &mut session,
            &["hi", "diagnosis", "y", "n", "n", "n", "n", "n"],
        );
        assert!(session.confirmed_symptoms().contains("tooth pain"));

        // Second round skips the already-confirmed symptom: the first
        // question is about sensitivity to sweets.
        let replies = drive(&mut session, &["again", "diagnosis"]);
        assert_eq!(replies, vec!["Do you have sensitivity to sweets? (yes or no)"]);

        // Answering no to everything does not retract tooth pain.
        let replies = drive(&mut session, &["n", "n", "n", "n", "n"]);
        assert!(session.confirmed_symptoms().contains("tooth pain"));
        // tooth pain alone still yields partial matches.
        assert!(replies[0].starts_with("You may have these diseases:"));
    }

    #[test]
    fn transcript_records_both_roles() {
        let mut session = new_session();
        drive(&mut session, &["hi", "diagnosis"]);
        let roles: Vec<Role> = session.transcript().iter().map(|e| e.role).collect();
        assert!(roles.contains(&Role::Patient));
        assert!(roles.contains(&Role::Assistant));
    }
}
