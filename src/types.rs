//! This module defines the core data structures and types used throughout the tracer,
//! including the machine description, transitions, verdicts, run configuration, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::tape::Configuration;
use crate::Rule;

/// The blank symbol implicitly filling every unwritten tape cell.
pub const BLANK_SYMBOL: char = '_';
/// The number of tree levels explored before a run is cut off.
pub const DEFAULT_MAX_DEPTH: usize = 75;
/// The maximum allowed size for a machine description in bytes.
pub const MAX_DESCRIPTION_SIZE: usize = 1 << 20; // 1MB

/// An immutable description of a nondeterministic Turing machine.
///
/// A description is built once by the parser and is never mutated while a trace runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineDescription {
    /// The name of the machine.
    pub name: String,
    /// The state identifiers, in the order they were declared.
    pub states: Vec<String>,
    /// The input alphabet (Σ).
    pub input_alphabet: Vec<char>,
    /// The tape alphabet (Γ), normally including the blank symbol.
    pub tape_alphabet: Vec<char>,
    /// The state every trace starts in.
    pub start_state: String,
    /// Reaching this state accepts the input.
    pub accept_state: String,
    /// Configurations in this state are pruned without being expanded.
    pub reject_state: String,
    /// The transition relation keyed by source state. Transitions sharing a
    /// `(state, read)` pair keep their declaration order, which is the order
    /// branches are expanded in.
    pub rules: HashMap<String, Vec<Transition>>,
}

impl MachineDescription {
    /// Returns every transition applicable to `state` reading `symbol`, in declaration order.
    pub fn transitions_from<'a>(
        &'a self,
        state: &str,
        symbol: char,
    ) -> impl Iterator<Item = &'a Transition> + 'a {
        self.rules
            .get(state)
            .into_iter()
            .flatten()
            .filter(move |t| t.read == symbol)
    }

    /// Returns the total number of transitions over all states.
    pub fn transition_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_state == state
    }

    pub fn is_rejecting(&self, state: &str) -> bool {
        self.reject_state == state
    }
}

/// A single entry of the transition relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol that must be under the head.
    pub read: char,
    /// The symbol written at the head.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The state the machine moves to.
    pub next_state: String,
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    Left,
    /// Move the head one cell to the right.
    Right,
}

/// The final classification of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Some branch reached the accept state.
    Accepted,
    /// Every branch died or reached the reject state.
    Rejected,
    /// The depth bound was reached without a decision.
    #[serde(rename = "Terminated")]
    TimedOut,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "Accepted"),
            Verdict::Rejected => write!(f, "Rejected"),
            Verdict::TimedOut => write!(f, "Terminated"),
        }
    }
}

/// Represents the outcome of processing one level of the configuration tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A new level was produced and the search continues.
    Continue,
    /// The search has finished with the given verdict.
    Halt(Verdict),
}

/// Options passed into a trace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// The number of levels explored before the run is reported as timed out.
    pub max_depth: usize,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TraceConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// One level of the configuration tree.
pub type Level = Vec<Configuration>;

/// The complete result of a trace run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub verdict: Verdict,
    /// Number of levels processed. For a timed out run this equals the depth bound.
    pub depth: usize,
    /// Number of configurations visited over the whole run.
    pub configurations: usize,
    /// Every level produced, starting with the initial configuration.
    pub tree: Vec<Level>,
}

/// Represents various errors that can occur while loading a machine description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    /// Indicates a syntax error or a malformed row in a machine description.
    #[error("Machine description parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates that a machine description is structurally incomplete.
    #[error("Machine description validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates a lookup of a built-in machine that does not exist.
    #[error("Unknown machine: {0}")]
    UnknownMachine(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_machine() -> MachineDescription {
        let mut rules = HashMap::new();
        rules.insert(
            "q0".to_string(),
            vec![
                Transition {
                    read: '0',
                    write: '1',
                    direction: Direction::Right,
                    next_state: "qA".to_string(),
                },
                Transition {
                    read: '1',
                    write: '1',
                    direction: Direction::Left,
                    next_state: "q0".to_string(),
                },
                Transition {
                    read: '0',
                    write: '0',
                    direction: Direction::Right,
                    next_state: "q1".to_string(),
                },
            ],
        );

        MachineDescription {
            name: "Types Test".to_string(),
            states: vec!["q0".into(), "q1".into(), "qA".into(), "qR".into()],
            input_alphabet: vec!['0', '1'],
            tape_alphabet: vec!['0', '1', BLANK_SYMBOL],
            start_state: "q0".to_string(),
            accept_state: "qA".to_string(),
            reject_state: "qR".to_string(),
            rules,
        }
    }

    #[test]
    fn test_transitions_from_keeps_declaration_order() {
        let machine = create_machine();

        let next: Vec<&str> = machine
            .transitions_from("q0", '0')
            .map(|t| t.next_state.as_str())
            .collect();

        assert_eq!(next, vec!["qA", "q1"]);
    }

    #[test]
    fn test_transitions_from_unknown_state() {
        let machine = create_machine();

        assert_eq!(machine.transitions_from("q1", '0').count(), 0);
        assert_eq!(machine.transitions_from("missing", BLANK_SYMBOL).count(), 0);
    }

    #[test]
    fn test_transition_count() {
        assert_eq!(create_machine().transition_count(), 3);
    }

    #[test]
    fn test_accept_and_reject_states() {
        let machine = create_machine();

        assert!(machine.is_accepting("qA"));
        assert!(!machine.is_accepting("q0"));
        assert!(machine.is_rejecting("qR"));
        assert!(!machine.is_rejecting("qA"));
    }

    #[test]
    fn test_verdict_serialization() {
        let json = serde_json::to_string(&Verdict::TimedOut).unwrap();
        assert_eq!(json, "\"Terminated\"");

        let verdict: Verdict = serde_json::from_str("\"Accepted\"").unwrap();
        assert_eq!(verdict, Verdict::Accepted);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Accepted.to_string(), "Accepted");
        assert_eq!(Verdict::Rejected.to_string(), "Rejected");
        assert_eq!(Verdict::TimedOut.to_string(), "Terminated");
    }

    #[test]
    fn test_trace_config_default() {
        assert_eq!(TraceConfig::default().max_depth, DEFAULT_MAX_DEPTH);

        let config: TraceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TraceConfig::default());

        let config: TraceConfig = serde_json::from_str(r#"{"max_depth": 3}"#).unwrap();
        assert_eq!(config, TraceConfig::with_max_depth(3));
    }

    #[test]
    fn test_error_display() {
        let error = TraceError::ValidationError("Missing 'name' row".to_string());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("validation error"));
        assert!(error_msg.contains("Missing 'name' row"));
    }
}
