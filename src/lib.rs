//! This crate provides the core logic for a nondeterministic Turing machine tracer.
//! It includes modules for parsing machine descriptions, modelling the tape, exploring every
//! computation branch breadth first, rendering the resulting trace, and a small catalog of
//! built-in machines.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod render;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the tracer and its entry points from the machine module.
pub use machine::{expand, run, Tracer};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports `MachineCatalog`, `MachineInfo`, and `MACHINES` from the programs module.
pub use programs::{MachineCatalog, MachineInfo, MACHINES};
/// Re-exports the `Configuration` snapshot from the tape module.
pub use tape::Configuration;
/// Re-exports the types describing machines, runs, and their outcomes.
pub use types::{
    Direction, Level, MachineDescription, Step, Trace, TraceConfig, TraceError, Transition,
    Verdict, BLANK_SYMBOL, DEFAULT_MAX_DEPTH,
};
