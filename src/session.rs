//! This module provides `Session`, the control surface used by front ends: single steps,
//! delayed auto-runs, input replacement and display snapshots.

use crate::definition::MachineDefinition;
use crate::machine::TuringMachine;
use crate::tape::Tape;
use crate::types::{Outcome, RunStatus, Symbol, BLANK_SYMBOL, MAX_EXECUTION_STEPS};
use serde::Serialize;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

/// One unit of the auto-run delay factor.
pub const DELAY_UNIT: Duration = Duration::from_millis(100);
/// Number of cells shown on each side of the head by default.
pub const DEFAULT_WINDOW: usize = 10;
/// Largest snapshot window; wider requests are clamped to it.
pub const MAX_WINDOW: usize = 1024;

/// Converts an auto-run delay factor into the pause between steps (`factor` x 100ms).
pub fn delay_from_factor(factor: u32) -> Duration {
    DELAY_UNIT * factor
}

/// Settings for `Session::run`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Pause between consecutive steps.
    pub delay: Duration,
    /// Ceiling on applied transitions. `None` runs until the machine halts.
    pub max_steps: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
            max_steps: Some(MAX_EXECUTION_STEPS),
        }
    }
}

impl RunOptions {
    /// Options for the `run k` console command.
    pub fn with_factor(factor: u32) -> Self {
        Self {
            delay: delay_from_factor(factor),
            ..Self::default()
        }
    }
}

/// Summary of a finished `Session::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    /// Transitions applied during this run.
    pub steps: usize,
}

/// What a front end needs to draw the machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cells from `first` (inclusive) up to `first + cells.len()` (exclusive).
    pub cells: Vec<Symbol>,
    pub first: i64,
    pub head: i64,
    pub state: String,
    pub accepting_states: Vec<String>,
    pub step_count: usize,
}

impl Snapshot {
    /// Captures `window` cells on each side of the head (the head cell plus `window - 1`
    /// to its right), the current state and position. The tape is not grown.
    ///
    /// `window` is clamped to `MAX_WINDOW`.
    pub fn capture(machine: &TuringMachine, window: usize) -> Self {
        let window = window.min(MAX_WINDOW) as i64;
        let head = machine.head();
        let first = head.saturating_sub(window);
        let tape = machine.tape();

        Self {
            cells: (first..head.saturating_add(window))
                .map(|index| tape.peek(index).to_string())
                .collect(),
            first,
            head,
            state: machine.state().to_string(),
            accepting_states: machine.definition().accepting_states().to_vec(),
            step_count: machine.step_count(),
        }
    }

    /// Index of the head within `cells`.
    pub fn head_index(&self) -> usize {
        usize::try_from(self.head.saturating_sub(self.first)).unwrap_or(0)
    }
}

/// A machine definition together with the run currently executing it.
///
/// Replacing the input discards the run and starts a new one on the same definition.
#[derive(Debug, Clone)]
pub struct Session {
    machine: TuringMachine,
    /// The tape the current run started from, used by `reset`.
    initial_tape: Tape,
}

impl Session {
    /// Starts a session on the definition's own initial tape.
    pub fn new(definition: MachineDefinition) -> Self {
        let initial_tape: Tape = definition.tape().iter().cloned().collect();
        tracing::info!(
            start = definition.start_state(),
            transitions = definition.transition_count(),
            "session created"
        );

        Self {
            machine: TuringMachine::with_tape(definition, initial_tape.clone()),
            initial_tape,
        }
    }

    /// Executes one step.
    pub fn step(&mut self) -> Outcome {
        self.machine.step()
    }

    /// Steps repeatedly until the machine halts, the caller cancels, or the step ceiling
    /// is reached.
    ///
    /// `on_step` is invoked after every step, terminal ones included. Returning
    /// `ControlFlow::Break(())` from a non-terminal step stops the run as `Interrupted`.
    pub fn run<F>(&mut self, options: &RunOptions, mut on_step: F) -> RunReport
    where
        F: FnMut(&TuringMachine, Outcome) -> ControlFlow<()>,
    {
        let mut steps = 0;

        loop {
            if options.max_steps.is_some_and(|max| steps >= max) {
                let status = match self.machine.halting_outcome().and_then(Outcome::status) {
                    Some(status) => status,
                    None => {
                        tracing::warn!(
                            steps,
                            state = self.machine.state(),
                            "step ceiling reached"
                        );
                        RunStatus::StepLimit
                    }
                };
                return RunReport { status, steps };
            }

            let outcome = self.machine.step();
            let flow = on_step(&self.machine, outcome);

            if let Some(status) = outcome.status() {
                return RunReport { status, steps };
            }

            steps += 1;

            if flow.is_break() {
                tracing::info!(steps, "run interrupted");
                return RunReport {
                    status: RunStatus::Interrupted,
                    steps,
                };
            }

            if !options.delay.is_zero() {
                thread::sleep(options.delay);
            }
        }
    }

    /// Replaces the input and restarts the run.
    ///
    /// Characters outside the alphabet are dropped. The tape becomes a leading blank
    /// followed by the remaining symbols, so the input starts under the head.
    pub fn change_input(&mut self, input: &str) {
        let symbols = self.definition().filter_input(input);

        let mut tape = Tape::new();
        tape.load([BLANK_SYMBOL]);
        tape.load(symbols);

        tracing::info!(cells = tape.right().len(), "input replaced");
        self.initial_tape = tape;
        self.reset();
    }

    /// Restarts the run from the tape it last started with.
    pub fn reset(&mut self) {
        let definition = self.machine.definition().clone();
        self.machine = TuringMachine::with_tape(definition, self.initial_tape.clone());
    }

    /// Display snapshot of the current run; see `Snapshot::capture`.
    pub fn snapshot(&self, window: usize) -> Snapshot {
        Snapshot::capture(&self.machine, window)
    }

    /// The non-negative side of the tape, origin first.
    pub fn current_input(&self) -> &[Symbol] {
        self.machine.tape().right()
    }

    pub fn machine(&self) -> &TuringMachine {
        &self.machine
    }

    pub fn definition(&self) -> &MachineDefinition {
        self.machine.definition()
    }
}

impl From<MachineDefinition> for Session {
    fn from(definition: MachineDefinition) -> Self {
        Session::new(definition)
    }
}
