//! This module provides the `ProgramLoader` struct, responsible for loading machine
//! descriptions from files, directories and strings.

use crate::definition::MachineDefinition;
use crate::parser::parse;
use crate::types::{TuringMachineError, MAX_PROGRAM_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of machine description files.
pub const PROGRAM_EXTENSION: &str = "tm";

/// `ProgramLoader` is a utility struct for loading machine descriptions.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single machine description from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is read and parsed successfully.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(TuringMachineError::ParseError)` if the content is not a valid description.
    pub fn load_program(path: &Path) -> Result<MachineDefinition, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loading description");
        Self::load_program_from_string(&content)
    }

    /// Loads a single machine description from string content, e.g. piped input.
    pub fn load_program_from_string(content: &str) -> Result<MachineDefinition, TuringMachineError> {
        if content.len() > MAX_PROGRAM_SIZE {
            return Err(TuringMachineError::FileError(format!(
                "Description is {} bytes, the limit is {} bytes",
                content.len(),
                MAX_PROGRAM_SIZE
            )));
        }

        parse(content)
    }

    /// Loads every `.tm` file in a directory.
    ///
    /// Directories and other files are skipped. Each element of the result is either the
    /// path with its definition or the error that occurred while loading it.
    pub fn load_programs(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), TuringMachineError>> {
        if !directory.exists() {
            return vec![Err(TuringMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(TuringMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let path = match entry {
                    Ok(entry) => entry.path(),
                    Err(e) => {
                        return Some(Err(TuringMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                if path.is_dir() || path.extension().map_or(true, |ext| ext != PROGRAM_EXTENSION) {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(definition) => Some(Ok((path, definition))),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping description");
                        Some(Err(TuringMachineError::FileError(format!(
                            "Failed to load description from {}: {}",
                            path.display(),
                            e
                        ))))
                    }
                }
            })
            .collect()
    }
}
