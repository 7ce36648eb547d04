//! Symptom matching and escalation engine.
//!
//! Three pieces, kept deliberately separate:
//! - `matcher`: bulk screening of the whole catalog against a
//!   confirmed-symptom set (exact/partial/none).
//! - `escalation`: targeted confirmation of one suspected disease, with
//!   majority-vote follow-up questioning and a four-way outcome.
//! - `session`: the chat state machine that drives both flows one message
//!   at a time, with `store` holding live sessions.

pub mod escalation;
pub mod matcher;
pub mod messages;
pub mod session;
pub mod store;
pub mod types;
