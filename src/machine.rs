//! This module defines the breadth-first `Tracer`, which explores every computation branch of a
//! nondeterministic Turing machine level by level, and `expand`, which produces the successors
//! of a single configuration.

use crate::tape::Configuration;
use crate::types::{Level, MachineDescription, Step, Trace, TraceConfig, Verdict};

/// Returns every configuration reachable from `config` in one step, in transition order.
///
/// A configuration with no matching transition has no successors; its branch dies.
pub fn expand(machine: &MachineDescription, config: &Configuration) -> Vec<Configuration> {
    machine
        .transitions_from(&config.state, config.symbol())
        .map(|t| config.step(&t.next_state, t.write, t.direction))
        .collect()
}

/// Traces `input` on `machine` until a verdict is reached or the depth bound cuts the search off.
pub fn run(machine: &MachineDescription, input: &str, config: TraceConfig) -> Trace {
    Tracer::new(machine, input, config).run()
}

/// Drives the level-by-level exploration of a machine's configuration tree.
///
/// The tracer owns the tree for the duration of a run. Each call to [`Tracer::step`]
/// turns the current frontier into the next level.
pub struct Tracer<'a> {
    machine: &'a MachineDescription,
    config: TraceConfig,
    tree: Vec<Level>,
    depth: usize,
    configurations: usize,
    verdict: Option<Verdict>,
}

impl<'a> Tracer<'a> {
    /// Creates a tracer whose first level is the machine's start state on `input`.
    pub fn new(machine: &'a MachineDescription, input: &str, config: TraceConfig) -> Self {
        Self {
            machine,
            config,
            tree: vec![vec![Configuration::initial(&machine.start_state, input)]],
            depth: 0,
            configurations: 0,
            verdict: None,
        }
    }

    /// Processes the current frontier and appends the next level to the tree.
    ///
    /// Configurations are visited in frontier order. The first one in the accept state ends
    /// the run at once: the partially built next level is recorded and the rest of the
    /// frontier is never expanded. Configurations in the reject state are pruned.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a non-empty level was produced.
    /// * `Step::Halt(_)` once the run has a verdict. Further calls keep returning it.
    pub fn step(&mut self) -> Step {
        if let Some(verdict) = self.verdict {
            return Step::Halt(verdict);
        }

        if self.depth >= self.config.max_depth {
            return self.halt(Verdict::TimedOut);
        }

        let frontier = self.tree.last().map(Vec::as_slice).unwrap_or_default();
        let mut next = Vec::new();
        let mut accepted = false;

        for config in frontier {
            self.configurations += 1;

            if self.machine.is_accepting(&config.state) {
                accepted = true;
                break;
            }

            if self.machine.is_rejecting(&config.state) {
                continue;
            }

            next.extend(expand(self.machine, config));
        }

        let dead = next.is_empty();
        self.tree.push(next);
        self.depth += 1;

        if accepted {
            self.halt(Verdict::Accepted)
        } else if dead {
            self.halt(Verdict::Rejected)
        } else {
            Step::Continue
        }
    }

    /// Steps until the run halts and returns the finished trace.
    pub fn run(mut self) -> Trace {
        while self.step() == Step::Continue {}

        self.into_trace()
    }

    /// Consumes the tracer, returning what has been explored so far.
    ///
    /// A run that has not halted yet is reported as timed out at its current depth.
    pub fn into_trace(self) -> Trace {
        Trace {
            verdict: self.verdict.unwrap_or(Verdict::TimedOut),
            depth: self.depth,
            configurations: self.configurations,
            tree: self.tree,
        }
    }

    /// Returns the level that the next call to `step` will process.
    ///
    /// After the run halts this is the last level recorded.
    pub fn frontier(&self) -> &[Configuration] {
        self.tree.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the number of levels processed.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of configurations visited so far.
    pub fn configurations(&self) -> usize {
        self.configurations
    }

    pub fn tree(&self) -> &[Level] {
        &self.tree
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn is_halted(&self) -> bool {
        self.verdict.is_some()
    }

    fn halt(&mut self, verdict: Verdict) -> Step {
        self.verdict = Some(verdict);
        Step::Halt(verdict)
    }
}
