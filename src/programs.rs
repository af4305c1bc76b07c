use crate::machine;
use crate::types::{MachineDescription, Trace, TraceConfig, TraceError};

// Machine descriptions embedded into the binary
const MACHINE_TEXTS: [&str; 3] = [
    include_str!("../machines/a_plus.csv"),
    include_str!("../machines/ends_in_one.csv"),
    include_str!("../machines/blank_walker.csv"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: Vec<MachineDescription> = MACHINE_TEXTS
        .iter()
        .filter_map(|text| match crate::parser::parse(text) {
            Ok(machine) => Some(machine),
            Err(e) => {
                eprintln!("Failed to parse built-in machine: {}", e);
                None
            }
        })
        .collect();
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of available machines
    pub fn get_machine_count() -> usize {
        MACHINES.len()
    }

    /// Get a machine by its index
    pub fn get_machine_by_index(index: usize) -> Result<MachineDescription, TraceError> {
        MACHINES
            .get(index)
            .cloned()
            .ok_or_else(|| TraceError::UnknownMachine(format!("index {} out of range", index)))
    }

    /// Get a machine by its name
    pub fn get_machine_by_name(name: &str) -> Result<MachineDescription, TraceError> {
        MACHINES
            .iter()
            .find(|machine| machine.name == name)
            .cloned()
            .ok_or_else(|| TraceError::UnknownMachine(name.to_string()))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        MACHINES.iter().map(|machine| machine.name.clone()).collect()
    }

    /// Get information about a machine by its index
    pub fn get_machine_info(index: usize) -> Result<MachineInfo, TraceError> {
        let machine = Self::get_machine_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: machine.name.clone(),
            start_state: machine.start_state.clone(),
            state_count: machine.states.len(),
            transition_count: machine.transition_count(),
        })
    }

    /// Get the original text of a machine by its index
    pub fn get_machine_text_by_index(index: usize) -> Result<&'static str, TraceError> {
        MACHINE_TEXTS
            .get(index)
            .copied()
            .ok_or_else(|| TraceError::UnknownMachine(format!("index {} out of range", index)))
    }

    /// Trace `input` on the built-in machine called `name`
    pub fn trace(name: &str, input: &str, config: TraceConfig) -> Result<Trace, TraceError> {
        let machine = Self::get_machine_by_name(name)?;

        Ok(machine::run(&machine, input, config))
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::Configuration;
    use crate::types::Verdict;

    #[test]
    fn test_all_machines_are_valid() {
        assert_eq!(MachineCatalog::get_machine_count(), MACHINE_TEXTS.len());
    }

    #[test]
    fn test_machine_names() {
        let names = MachineCatalog::list_machine_names();
        assert_eq!(names, vec!["a_plus", "ends_in_one", "blank_walker"]);
    }

    #[test]
    fn test_get_machine_by_index() {
        let machine = MachineCatalog::get_machine_by_index(0);
        assert!(machine.is_ok());

        let result = MachineCatalog::get_machine_by_index(999);
        assert!(matches!(result, Err(TraceError::UnknownMachine(_))));
    }

    #[test]
    fn test_get_machine_by_name() {
        let machine = MachineCatalog::get_machine_by_name("ends_in_one").unwrap();
        assert_eq!(machine.accept_state, "qacc");

        let result = MachineCatalog::get_machine_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_machine_info() {
        let info = MachineCatalog::get_machine_info(1).unwrap();

        assert_eq!(info.index, 1);
        assert_eq!(info.name, "ends_in_one");
        assert_eq!(info.start_state, "q0");
        assert_eq!(info.state_count, 4);
        assert_eq!(info.transition_count, 4);

        assert!(MachineCatalog::get_machine_info(999).is_err());
    }

    #[test]
    fn test_get_machine_text() {
        let text = MachineCatalog::get_machine_text_by_index(0).unwrap();
        assert!(text.starts_with("a_plus"));

        assert!(MachineCatalog::get_machine_text_by_index(999).is_err());
    }

    #[test]
    fn test_a_plus() {
        let trace = MachineCatalog::trace("a_plus", "aa", TraceConfig::default()).unwrap();

        assert_eq!(trace.verdict, Verdict::Accepted);
        assert_eq!(trace.depth, 4);
        assert_eq!(trace.configurations, 4);
        assert_eq!(trace.tree[3], vec![Configuration::new("aa_", "qacc", "")]);

        let trace = MachineCatalog::trace("a_plus", "", TraceConfig::default()).unwrap();
        assert_eq!(trace.verdict, Verdict::Rejected);
        assert_eq!(trace.depth, 1);
    }

    #[test]
    fn test_ends_in_one_accepts() {
        let trace = MachineCatalog::trace("ends_in_one", "01", TraceConfig::default()).unwrap();

        assert_eq!(trace.verdict, Verdict::Accepted);
        assert_eq!(trace.depth, 4);
        assert_eq!(trace.configurations, 5);
        assert_eq!(
            trace.tree[2],
            vec![
                Configuration::new("01", "q0", ""),
                Configuration::new("01", "q1", ""),
            ]
        );
    }

    #[test]
    fn test_ends_in_one_rejects() {
        let trace = MachineCatalog::trace("ends_in_one", "10", TraceConfig::default()).unwrap();

        assert_eq!(trace.verdict, Verdict::Rejected);
        assert_eq!(trace.depth, 3);
        assert_eq!(trace.configurations, 4);
        assert_eq!(
            trace.tree[1],
            vec![
                Configuration::new("1", "q0", "0"),
                Configuration::new("1", "q1", "0"),
            ]
        );
    }

    #[test]
    fn test_blank_walker_times_out() {
        let trace =
            MachineCatalog::trace("blank_walker", "0", TraceConfig::with_max_depth(4)).unwrap();

        assert_eq!(trace.verdict, Verdict::TimedOut);
        assert_eq!(trace.depth, 4);
        assert_eq!(trace.configurations, 4);
        assert_eq!(trace.tree[4], vec![Configuration::new("0___", "q0", "")]);
    }
}
