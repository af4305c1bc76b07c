//! This module defines `Configuration`, a single instantaneous snapshot of a computation,
//! together with the read/write/move rule that derives the next snapshot from a transition.
//!
//! The tape is kept split around the head:
//!
//! ```text
//!   left      tape
//! | a | b | [c] | d |      state q1
//! ```
//!
//! `left` holds `"ab"` and `tape` holds `"cd"`, the head symbol first. Cells beyond either
//! end are blank and only materialize once they are written or moved over.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Direction, BLANK_SYMBOL};

/// A snapshot of the computation: the tape split around the head, plus the current state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration {
    /// The tape strictly left of the head, oldest cell first.
    pub left: String,
    /// The current state.
    pub state: String,
    /// The tape from the head rightward. Empty means the head is on a blank cell.
    pub tape: String,
}

impl Configuration {
    pub fn new(left: impl Into<String>, state: impl Into<String>, tape: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            state: state.into(),
            tape: tape.into(),
        }
    }

    /// Creates the root configuration of a trace: head on the first input symbol.
    pub fn initial(state: &str, input: &str) -> Self {
        Self::new("", state, input)
    }

    /// Returns the symbol under the head, the blank symbol if the tape is empty.
    pub fn symbol(&self) -> char {
        self.tape.chars().next().unwrap_or(BLANK_SYMBOL)
    }

    /// Writes `write` under the head, moves the head, and enters `next_state`.
    ///
    /// On a right move the cell archived into `left` holds the symbol that was read,
    /// not the one written. On a left move off an empty `left` the new `left` is a
    /// single blank. Traces rendered by existing tooling depend on both.
    pub fn step(&self, next_state: &str, write: char, direction: Direction) -> Self {
        let symbol = self.symbol();
        let rest = self.tape.get(symbol_len(&self.tape)..).unwrap_or_default();

        match direction {
            Direction::Right => {
                let mut left = String::with_capacity(self.left.len() + symbol.len_utf8());
                left.push_str(&self.left);
                left.push(symbol);

                Self::new(left, next_state, rest)
            }
            Direction::Left => {
                let mut left = self.left.clone();
                let head = match left.pop() {
                    Some(head) => head,
                    None => {
                        left.push(BLANK_SYMBOL);
                        BLANK_SYMBOL
                    }
                };

                let mut tape = String::with_capacity(self.tape.len() + 2 * head.len_utf8());
                tape.push(head);
                tape.push(write);
                tape.push_str(rest);

                Self::new(left, next_state, tape)
            }
        }
    }
}

/// Byte length of the head cell, zero for an empty tape.
fn symbol_len(tape: &str) -> usize {
    tape.chars().next().map_or(0, char::len_utf8)
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\",\"{}\",\"{}\"]", self.left, self.state, self.tape)
    }
}
