//! Text and JSON rendering of finished traces.
//!
//! The text report keeps the line format consumed by existing tooling:
//!
//! ```text
//! ["ends_in_one"]
//! Initial string: 01
//! Depth of tree: 4
//! Total configurations: 5
//! [["","q0","01"]]
//! ...
//! String accepted in 4 transitions
//! ```

use serde::Serialize;

use crate::tape::Configuration;
use crate::types::{Level, MachineDescription, Trace, Verdict};

/// Renders one level of the tree as a bracketed list of `["left","state","tape"]` triples.
pub fn level(configs: &[Configuration]) -> String {
    let items = configs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    format!("[{items}]")
}

/// Renders the human readable verdict line.
pub fn verdict(trace: &Trace) -> String {
    match trace.verdict {
        Verdict::Accepted => format!("String accepted in {} transitions", trace.depth),
        Verdict::Rejected => format!("String rejected in {} transitions", trace.depth),
        Verdict::TimedOut => format!("Execution stopped after {} transitions", trace.depth),
    }
}

/// Renders the full text report of a trace.
pub fn report(machine: &MachineDescription, input: &str, trace: &Trace) -> String {
    let mut lines = vec![
        format!("[\"{}\"]", machine.name),
        format!("Initial string: {input}"),
        format!("Depth of tree: {}", trace.depth),
        format!("Total configurations: {}", trace.configurations),
    ];

    lines.extend(trace.tree.iter().map(|configs| level(configs)));
    lines.push(verdict(trace));

    lines.join("\n")
}

#[derive(Serialize)]
struct Report<'a> {
    machine: &'a str,
    input: &'a str,
    verdict: Verdict,
    depth: usize,
    configurations: usize,
    tree: &'a [Level],
}

/// Renders a trace as pretty printed JSON.
pub fn json(
    machine: &MachineDescription,
    input: &str,
    trace: &Trace,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Report {
        machine: &machine.name,
        input,
        verdict: trace.verdict,
        depth: trace.depth,
        configurations: trace.configurations,
        tree: &trace.tree,
    })
}
