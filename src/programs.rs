//! Built-in machine descriptions, embedded at compile time and parsed on first use.

use crate::definition::MachineDefinition;
use crate::parser::parse;
use crate::types::TuringMachineError;

// Default embedded programs
const PROGRAM_TEXTS: [(&str, &str); 3] = [
    ("end2zero", include_str!("../machines/end2zero.tm")),
    ("div3", include_str!("../machines/div3.tm")),
    ("palindrome", include_str!("../machines/palindrome.tm")),
];

/// A built-in machine: its name, description source and parsed definition.
#[derive(Debug, Clone)]
pub struct Program {
    pub name: &'static str,
    pub source: &'static str,
    pub definition: MachineDefinition,
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, source)| match parse(source) {
            Ok(definition) => Some(Program { name, source, definition }),
            Err(e) => {
                tracing::warn!(name, error = %e, "failed to parse built-in program");
                None
            }
        })
        .collect();
}

/// Summary of a built-in program for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<MachineDefinition, TuringMachineError> {
        PROGRAMS
            .get(index)
            .map(|program| program.definition.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program index {} out of range", index))
            })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<MachineDefinition, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .map(|program| program.definition.clone())
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|program| program.name.to_string()).collect()
    }

    /// Get the description source of a program by its index
    pub fn get_program_text_by_index(index: usize) -> Result<&'static str, TuringMachineError> {
        PROGRAMS.get(index).map(|program| program.source).ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = PROGRAMS.get(index).ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })?;
        let definition = &program.definition;

        Ok(ProgramInfo {
            index,
            name: program.name.to_string(),
            start_state: definition.start_state().to_string(),
            initial_tape: definition.tape().join(" "),
            state_count: definition.states().len(),
            transition_count: definition.transition_count(),
        })
    }
}
