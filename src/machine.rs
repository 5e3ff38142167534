//! This module defines the `TuringMachine` struct, the execution engine. It owns the tape
//! and the run state (current state and head position) and applies one transition per step.

use crate::definition::MachineDefinition;
use crate::tape::Tape;
use crate::types::{Outcome, RunStatus, Transition, INITIAL_HEAD_POSITION};

/// A running single-tape Turing machine.
///
/// The machine halts when no transition matches the current state and the symbol under
/// the head. Halting is not recorded: stepping a halted machine re-evaluates the same
/// configuration and reports the same outcome again.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    definition: MachineDefinition,
    tape: Tape,
    state: String,
    head: i64,
    step_count: usize,
}

impl TuringMachine {
    /// Creates a machine whose tape holds the definition's initial tape contents.
    pub fn new(definition: MachineDefinition) -> Self {
        let tape = definition.tape().iter().cloned().collect();
        Self::with_tape(definition, tape)
    }

    /// Creates a machine running on `tape` instead of the definition's initial tape.
    ///
    /// The state starts at the definition's start state and the head at position 1.
    pub fn with_tape(definition: MachineDefinition, tape: Tape) -> Self {
        Self {
            state: definition.start_state().to_string(),
            definition,
            tape,
            head: INITIAL_HEAD_POSITION,
            step_count: 0,
        }
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Outcome::Continued` if a transition was applied.
    /// * `Outcome::Accepted` or `Outcome::Rejected` if no transition matches; the tape and
    ///   state are left untouched.
    pub fn step(&mut self) -> Outcome {
        let symbol = self.tape.read(self.head);

        let Some(transition) = self.definition.transition(&self.state, symbol) else {
            let outcome = verdict(&self.definition, &self.state);
            tracing::info!(
                state = %self.state,
                symbol = %symbol,
                head = self.head,
                steps = self.step_count,
                "machine halted: {outcome}"
            );
            return outcome;
        };

        tracing::debug!(
            state = %self.state,
            symbol = %symbol,
            write = %transition.write,
            direction = %transition.direction,
            next = %transition.next_state,
            head = self.head,
            "applying transition"
        );

        self.tape.write(self.head, transition.write.clone());
        self.state.clone_from(&transition.next_state);
        self.head += transition.direction.offset();
        self.step_count += 1;

        Outcome::Continued
    }

    /// Runs until the machine halts or `max_steps` transitions have been applied.
    ///
    /// A machine that halts right at the ceiling still reports its verdict rather than
    /// `RunStatus::StepLimit`.
    pub fn run(&mut self, max_steps: usize) -> RunStatus {
        for _ in 0..max_steps {
            if let Some(status) = self.step().status() {
                return status;
            }
        }

        match self.halting_outcome().and_then(Outcome::status) {
            Some(status) => status,
            None => {
                tracing::warn!(max_steps, state = %self.state, "step ceiling reached");
                RunStatus::StepLimit
            }
        }
    }

    /// Returns the terminal outcome of the current configuration, or `None` if a transition
    /// would still apply. Does not modify the tape.
    pub fn halting_outcome(&self) -> Option<Outcome> {
        match self.transition() {
            Some(_) => None,
            None => Some(verdict(&self.definition, &self.state)),
        }
    }

    /// The transition that the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.definition.transition(&self.state, self.symbol())
    }

    /// The symbol under the head.
    pub fn symbol(&self) -> &str {
        self.tape.peek(self.head)
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the signed head position.
    pub fn head(&self) -> i64 {
        self.head
    }

    /// Returns the total number of transitions applied.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }

    /// Consumes the machine, handing back its definition.
    pub fn into_definition(self) -> MachineDefinition {
        self.definition
    }
}

/// Classifies a halting configuration by accepting-state membership.
fn verdict(definition: &MachineDefinition, state: &str) -> Outcome {
    if definition.is_accepting(state) {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    }
}
