//! This crate provides the core logic for a single-tape Turing machine simulator.
//! It includes the unbounded tape, the machine definition builder, the step engine,
//! a session type for front ends, and a loader for the line-oriented description format.

pub mod definition;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod session;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `MachineDefinition` builder.
pub use definition::MachineDefinition;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` engine.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the built-in program catalog.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the control surface used by front ends.
pub use session::{RunOptions, RunReport, Session, Snapshot};
/// Re-exports the `Tape` type.
pub use tape::Tape;
/// Re-exports the core value types and error type.
pub use types::{
    Direction, Outcome, RunStatus, Symbol, Transition, TransitionKey, TuringMachineError,
    BLANK_SYMBOL, MAX_PROGRAM_SIZE,
};
