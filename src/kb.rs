//! Fact-store capability interface.
//!
//! The triage flows record what they learn about a patient as ground facts
//! (`symptom("tooth pain")`) and read them back through a query interface.
//! The trait keeps the evaluation backend pluggable (a real logic-programming
//! engine can be dropped in behind it) while the bundled [`MemoryBackend`]
//! only does exact predicate/arity matching with single-level variable
//! binding. It is a fact store, not a unifier: no rules, no nested terms,
//! no backtracking.

use std::collections::BTreeMap;

/// A ground fact: predicate plus atom arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub predicate: String,
    pub args: Vec<String>,
}

impl Fact {
    pub fn new(predicate: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            predicate: predicate.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// One position in a query goal: a concrete atom or a named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Atom(String),
    Var(String),
}

/// A query goal: predicate plus terms to match against stored facts.
#[derive(Debug, Clone)]
pub struct Goal {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Goal {
    pub fn new(predicate: impl Into<String>, args: impl IntoIterator<Item = Term>) -> Self {
        Self {
            predicate: predicate.into(),
            args: args.into_iter().collect(),
        }
    }
}

/// Variable name → bound atom, one map per matching fact.
pub type Bindings = BTreeMap<String, String>;

/// Pluggable fact-evaluation backend.
pub trait RuleBackend: Send + Sync {
    /// Record a fact. Duplicate facts are idempotent.
    fn assert_fact(&mut self, fact: Fact);

    /// All binding sets under which stored facts satisfy the goal.
    /// A ground goal yields one empty binding set per matching fact.
    fn query(&self, goal: &Goal) -> Vec<Bindings>;
}

/// Default in-memory backend. Insertion order is preserved so query results
/// are deterministic.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    facts: Vec<Fact>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(fact: &Fact, goal: &Goal) -> Option<Bindings> {
        if fact.predicate != goal.predicate || fact.args.len() != goal.args.len() {
            return None;
        }
        let mut bindings = Bindings::new();
        for (arg, term) in fact.args.iter().zip(&goal.args) {
            match term {
                Term::Atom(atom) => {
                    if atom != arg {
                        return None;
                    }
                }
                Term::Var(name) => match bindings.get(name) {
                    Some(bound) if bound != arg => return None,
                    Some(_) => {}
                    None => {
                        bindings.insert(name.clone(), arg.clone());
                    }
                },
            }
        }
        Some(bindings)
    }
}

impl RuleBackend for MemoryBackend {
    fn assert_fact(&mut self, fact: Fact) {
        if !self.facts.contains(&fact) {
            self.facts.push(fact);
        }
    }

    fn query(&self, goal: &Goal) -> Vec<Bindings> {
        self.facts
            .iter()
            .filter_map(|f| Self::matches(f, goal))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_is_idempotent() {
        let mut kb = MemoryBackend::new();
        kb.assert_fact(Fact::new("symptom", ["tooth pain"]));
        kb.assert_fact(Fact::new("symptom", ["tooth pain"]));

        let results = kb.query(&Goal::new("symptom", [Term::Var("S".into())]));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn variable_binds_each_fact() {
        let mut kb = MemoryBackend::new();
        kb.assert_fact(Fact::new("symptom", ["tooth pain"]));
        kb.assert_fact(Fact::new("symptom", ["bad breath"]));

        let results = kb.query(&Goal::new("symptom", [Term::Var("S".into())]));
        let bound: Vec<&str> = results.iter().map(|b| b["S"].as_str()).collect();
        assert_eq!(bound, vec!["tooth pain", "bad breath"]);
    }

    #[test]
    fn ground_goal_matches_exactly() {
        let mut kb = MemoryBackend::new();
        kb.assert_fact(Fact::new("symptom", ["tooth pain"]));

        let hit = kb.query(&Goal::new("symptom", [Term::Atom("tooth pain".into())]));
        assert_eq!(hit.len(), 1);
        assert!(hit[0].is_empty());

        let miss = kb.query(&Goal::new("symptom", [Term::Atom("visible holes".into())]));
        assert!(miss.is_empty());
    }

    #[test]
    fn predicate_and_arity_must_match() {
        let mut kb = MemoryBackend::new();
        kb.assert_fact(Fact::new("has", ["patient", "tooth pain"]));

        assert!(kb.query(&Goal::new("symptom", [Term::Var("S".into())])).is_empty());
        assert!(kb.query(&Goal::new("has", [Term::Var("S".into())])).is_empty());
    }

    #[test]
    fn repeated_variable_must_bind_consistently() {
        let mut kb = MemoryBackend::new();
        kb.assert_fact(Fact::new("pair", ["a", "b"]));
        kb.assert_fact(Fact::new("pair", ["c", "c"]));

        let results = kb.query(&Goal::new(
            "pair",
            [Term::Var("X".into()), Term::Var("X".into())],
        ));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["X"], "c");
    }
}
