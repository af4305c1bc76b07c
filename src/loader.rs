//! This module provides the `MachineLoader` struct, responsible for loading machine descriptions
//! and trace inputs from files and strings.

use crate::parser::parse;
use crate::programs::MachineCatalog;
use crate::types::{MachineDescription, TraceError, MAX_DESCRIPTION_SIZE};
use std::fs;
use std::path::Path;

/// `MachineLoader` is a utility struct for loading machine descriptions and trace inputs.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDescription)` if the file is successfully read and parsed.
    /// * `Err(TraceError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TraceError::ParseError)` or `Err(TraceError::ValidationError)` if the content
    ///   is not a valid description.
    pub fn load_machine(path: &Path) -> Result<MachineDescription, TraceError> {
        let size = fs::metadata(path)
            .map_err(|e| {
                TraceError::FileError(format!("Failed to read file {}: {}", path.display(), e))
            })?
            .len();

        if size > MAX_DESCRIPTION_SIZE as u64 {
            return Err(TraceError::FileError(format!(
                "File {} exceeds the maximum description size of {} bytes",
                path.display(),
                MAX_DESCRIPTION_SIZE
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TraceError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single machine description from the provided string content.
    pub fn load_machine_from_string(content: &str) -> Result<MachineDescription, TraceError> {
        parse(content)
    }

    /// Resolves a machine argument: a path to a description file, or else the name of a
    /// built-in machine.
    pub fn resolve_machine(arg: &str) -> Result<MachineDescription, TraceError> {
        let path = Path::new(arg);
        if path.is_file() {
            return Self::load_machine(path);
        }

        MachineCatalog::get_machine_by_name(arg).map_err(|_| {
            TraceError::FileError(format!(
                "{} is neither a readable file nor a built-in machine",
                arg
            ))
        })
    }

    /// Resolves a trace input argument.
    ///
    /// If `arg` names an existing file, the file's content is the input, with trailing line
    /// terminators removed. Otherwise `arg` itself is the input.
    pub fn load_input(arg: &str) -> Result<String, TraceError> {
        let path = Path::new(arg);
        if !path.is_file() {
            return Ok(arg.to_string());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TraceError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Ok(content.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const DESCRIPTION: &str = "Test Machine\nq0,qa,qr\n0\n0,_\nq0\nqa\nqr\nq0,0,qa,0,R\n";

    fn write_file(path: &Path, content: &str) {
        let mut file = File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_valid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.csv");
        write_file(&file_path, DESCRIPTION);

        let result = MachineLoader::load_machine(&file_path);
        assert!(result.is_ok());

        let machine = result.unwrap();
        assert_eq!(machine.name, "Test Machine");
        assert_eq!(machine.start_state, "q0");
        assert!(machine.rules.contains_key("q0"));
    }

    #[test]
    fn test_load_invalid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.csv");
        write_file(&file_path, "only a name");

        let result = MachineLoader::load_machine(&file_path);
        assert!(matches!(result, Err(TraceError::ValidationError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();

        let result = MachineLoader::load_machine(&dir.path().join("missing.csv"));
        assert!(matches!(result, Err(TraceError::FileError(_))));
    }

    #[test]
    fn test_load_oversized_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("large.csv");
        let file = File::create(&file_path).unwrap();
        file.set_len(MAX_DESCRIPTION_SIZE as u64 + 1).unwrap();

        let result = MachineLoader::load_machine(&file_path);
        assert!(matches!(result, Err(TraceError::FileError(msg)) if msg.contains("maximum")));
    }

    #[test]
    fn test_load_machine_from_string() {
        let machine = MachineLoader::load_machine_from_string(DESCRIPTION).unwrap();
        assert_eq!(machine.accept_state, "qa");
    }

    #[test]
    fn test_resolve_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.csv");
        write_file(&file_path, DESCRIPTION);

        let machine = MachineLoader::resolve_machine(file_path.to_str().unwrap()).unwrap();
        assert_eq!(machine.name, "Test Machine");

        let machine = MachineLoader::resolve_machine("a_plus").unwrap();
        assert_eq!(machine.name, "a_plus");

        let result = MachineLoader::resolve_machine("no-such-machine");
        assert!(matches!(result, Err(TraceError::FileError(_))));
    }

    #[test]
    fn test_load_input_literal() {
        assert_eq!(MachineLoader::load_input("0101").unwrap(), "0101");
        assert_eq!(MachineLoader::load_input("").unwrap(), "");
    }

    #[test]
    fn test_load_input_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("input.txt");
        write_file(&file_path, "0011\r\n");

        let input = MachineLoader::load_input(file_path.to_str().unwrap()).unwrap();
        assert_eq!(input, "0011");
    }
}
