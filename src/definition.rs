//! This module defines `MachineDefinition`, the static description of a machine: its
//! alphabet, states, transition table, start state, accepting states and initial tape.
//!
//! The builder operations never fail. Consistency between the parts (for example an
//! accepting state missing from the state set) is not checked.

use crate::types::{Direction, Symbol, Transition, TransitionKey, BLANK_SYMBOL, DEFAULT_ALPHABET};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The static description of a single-tape Turing machine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineDefinition {
    alphabet: Vec<Symbol>,
    states: Vec<String>,
    /// Transition table in insertion order.
    transitions: Vec<(TransitionKey, Transition)>,
    /// Position of each key in `transitions`.
    #[serde(skip)]
    index: HashMap<TransitionKey, usize>,
    start_state: String,
    accepting_states: Vec<String>,
    tape: Vec<Symbol>,
}

impl Default for MachineDefinition {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}

impl MachineDefinition {
    /// Creates an empty definition over `alphabet`. The blank symbol is appended when the
    /// alphabet does not already contain it, so the alphabet is never empty.
    pub fn new<I, S>(alphabet: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut alphabet: Vec<Symbol> = alphabet.into_iter().map(Into::into).collect();
        if !alphabet.iter().any(|symbol| symbol == BLANK_SYMBOL) {
            alphabet.push(BLANK_SYMBOL.to_string());
        }

        Self {
            alphabet,
            states: Vec::new(),
            transitions: Vec::new(),
            index: HashMap::new(),
            start_state: String::new(),
            accepting_states: Vec::new(),
            tape: Vec::new(),
        }
    }

    /// Adds states, skipping those already present.
    pub fn add_states<I, S>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for state in states {
            let state = state.into();
            if !self.states.contains(&state) {
                self.states.push(state);
            }
        }
        self
    }

    /// Adds the rule `(state, symbol) -> transition`.
    ///
    /// Redefining a key replaces its transition in place; the key keeps its original
    /// position in the table.
    pub fn add_transition(
        &mut self,
        state: impl Into<String>,
        symbol: impl Into<Symbol>,
        transition: Transition,
    ) -> &mut Self {
        let key = TransitionKey::new(state, symbol);

        match self.index.get(&key) {
            Some(&position) => self.transitions[position].1 = transition,
            None => {
                self.index.insert(key.clone(), self.transitions.len());
                self.transitions.push((key, transition));
            }
        }
        self
    }

    /// Adds a rule from the five tokens of a description line:
    /// `from read write movement to`.
    pub fn add_rule(
        &mut self,
        from: &str,
        read: &str,
        write: &str,
        movement: &str,
        to: &str,
    ) -> &mut Self {
        self.add_transition(
            from,
            read,
            Transition::new(write, Direction::from_token(movement), to),
        )
    }

    /// Sets the start state, replacing any previous one.
    pub fn set_start_state(&mut self, state: impl Into<String>) -> &mut Self {
        self.start_state = state.into();
        self
    }

    /// Appends accepting states. Duplicates are kept.
    pub fn add_accepting_states<I, S>(&mut self, states: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepting_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    /// Appends symbols to the initial tape, starting at the origin.
    pub fn add_tape<I, S>(&mut self, symbols: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.tape.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Looks up the transition for `(state, symbol)`.
    pub fn transition(&self, state: &str, symbol: &str) -> Option<&Transition> {
        self.index
            .get(&TransitionKey::new(state, symbol))
            .map(|&position| &self.transitions[position].1)
    }

    /// Iterates over the transition table in insertion order.
    pub fn transitions(&self) -> impl Iterator<Item = (&TransitionKey, &Transition)> {
        self.transitions.iter().map(|(key, transition)| (key, transition))
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting_states.iter().any(|s| s == state)
    }

    /// Checks alphabet membership. The alphabet is advisory; the engine never calls this.
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.alphabet.iter().any(|s| s == symbol)
    }

    /// Splits `input` into single-character symbols, dropping characters that are not in
    /// the alphabet.
    pub fn filter_input(&self, input: &str) -> Vec<Symbol> {
        input
            .chars()
            .map(String::from)
            .filter(|symbol| self.is_symbol(symbol))
            .collect()
    }

    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    pub fn states(&self) -> &[String] {
        &self.states
    }

    pub fn start_state(&self) -> &str {
        &self.start_state
    }

    pub fn accepting_states(&self) -> &[String] {
        &self.accepting_states
    }

    /// The initial tape contents, starting at the origin.
    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }
}

impl fmt::Display for MachineDefinition {
    /// Writes one line per transition: `(from, read) -> (write, movement, to)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (key, transition) in self.transitions() {
            writeln!(
                f,
                "({}, {}) -> ({}, {}, {})",
                key.state,
                key.symbol,
                transition.write,
                transition.direction,
                transition.next_state
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appends_blank_to_alphabet() {
        let definition = MachineDefinition::new(["a", "b"]);
        assert_eq!(definition.alphabet(), &["a", "b", "#"]);

        let definition = MachineDefinition::new(["#", "1"]);
        assert_eq!(definition.alphabet(), &["#", "1"]);

        let definition = MachineDefinition::new(Vec::<String>::new());
        assert_eq!(definition.alphabet(), &["#"]);
    }

    #[test]
    fn test_default_alphabet() {
        let definition = MachineDefinition::default();
        assert_eq!(definition.alphabet(), &["0", "1", "#"]);
    }

    #[test]
    fn test_add_states_ignores_duplicates() {
        let mut definition = MachineDefinition::default();
        definition.add_states(["q0", "q1"]).add_states(["q1", "q2", "q0"]);

        assert_eq!(definition.states(), &["q0", "q1", "q2"]);
    }

    #[test]
    fn test_add_transition_last_write_wins_in_place() {
        let mut definition = MachineDefinition::default();
        definition
            .add_rule("q0", "0", "0", ">", "q0")
            .add_rule("q0", "1", "1", ">", "q1")
            .add_rule("q0", "0", "1", "<", "q2");

        assert_eq!(definition.transition_count(), 2);
        assert_eq!(
            definition.transition("q0", "0"),
            Some(&Transition::new("1", Direction::Left, "q2"))
        );

        // The overwritten key keeps its original slot
        let keys: Vec<_> = definition
            .transitions()
            .map(|(key, _)| (key.state.as_str(), key.symbol.as_str()))
            .collect();
        assert_eq!(keys, vec![("q0", "0"), ("q0", "1")]);
    }

    #[test]
    fn test_transition_lookup_misses() {
        let mut definition = MachineDefinition::default();
        definition.add_rule("q0", "0", "0", ">", "q0");

        assert!(definition.transition("q0", "1").is_none());
        assert!(definition.transition("q1", "0").is_none());
    }

    #[test]
    fn test_start_state_replaces() {
        let mut definition = MachineDefinition::default();
        definition.set_start_state("q0").set_start_state("q1");

        assert_eq!(definition.start_state(), "q1");
    }

    #[test]
    fn test_accepting_states_are_permissive() {
        let mut definition = MachineDefinition::default();
        definition
            .add_states(["q0"])
            .add_accepting_states(["acc", "acc"])
            .add_accepting_states(["elsewhere"]);

        assert_eq!(definition.accepting_states(), &["acc", "acc", "elsewhere"]);
        assert!(definition.is_accepting("acc"));
        assert!(definition.is_accepting("elsewhere"));
        assert!(!definition.is_accepting("q0"));
    }

    #[test]
    fn test_add_tape_appends() {
        let mut definition = MachineDefinition::default();
        definition.add_tape(["#", "1"]).add_tape(["0"]);

        assert_eq!(definition.tape(), &["#", "1", "0"]);
    }

    #[test]
    fn test_filter_input_keeps_alphabet_members() {
        let definition = MachineDefinition::default();

        assert_eq!(definition.filter_input("1a0 2#1"), vec!["1", "0", "#", "1"]);
        assert!(definition.filter_input("xyz").is_empty());
    }

    #[test]
    fn test_display_dump_in_insertion_order() {
        let mut definition = MachineDefinition::default();
        definition
            .add_rule("q0", "1", "1", ">", "q0")
            .add_rule("q0", "#", "#", "<", "q1")
            .add_rule("q1", "0", "0", "stay", "acc");

        assert_eq!(
            definition.to_string(),
            "(q0, 1) -> (1, >, q0)\n(q0, #) -> (#, <, q1)\n(q1, 0) -> (0, -, acc)\n"
        );
    }

    #[test]
    fn test_definition_serializes_without_index() {
        let mut definition = MachineDefinition::default();
        definition.set_start_state("q0").add_rule("q0", "0", "1", ">", "q0");

        let json = serde_json::to_value(&definition).unwrap();
        assert_eq!(json["start_state"], "q0");
        assert!(json.get("index").is_none());
        assert_eq!(json["transitions"][0][0]["symbol"], "0");
        assert_eq!(json["transitions"][0][1]["direction"], "Right");
    }
}
