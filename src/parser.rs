//! This module provides the parser for machine descriptions, utilizing the `pest` crate.
//! It defines the grammar of the line-oriented description format and turns the parse tree
//! into a `MachineDefinition`.

use crate::{
    definition::MachineDefinition,
    types::{TuringMachineError, DEFAULT_ALPHABET},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the description grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DescriptionParser;

/// Number of tokens on a transition line: `from read write movement to`.
const TRANSITION_TOKENS: usize = 5;

/// A data line of a block: its tokens and where it sits in the source.
type Line<'i> = (Vec<&'i str>, Span<'i>);

/// Parses the given input string into a `MachineDefinition`.
///
/// Blocks may appear in any order, but each label at most once. Only the
/// `starting state` block is required.
///
/// # Returns
///
/// * `Ok(MachineDefinition)` if the input is well formed.
/// * `Err(TuringMachineError::ParseError)` on syntax errors, duplicate labels, or lines
///   with the wrong number of tokens.
/// * `Err(TuringMachineError::ValidationError)` if the `starting state` block is missing.
pub fn parse(input: &str) -> Result<MachineDefinition, TuringMachineError> {
    let root = DescriptionParser::parse(Rule::program, input.trim())
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty description".into()))?;

    parse_program(root)
}

/// The raw data lines of every block, gathered before building the definition.
#[derive(Default)]
struct Blocks<'i> {
    alphabet: Option<Vec<Line<'i>>>,
    tape: Vec<Line<'i>>,
    states: Vec<Line<'i>>,
    start: Option<(Vec<Line<'i>>, Span<'i>)>,
    accepting: Vec<Line<'i>>,
    transitions: Vec<Line<'i>>,
}

/// Collects the sections of a `Pair<Rule::program>` and builds the definition from them.
fn parse_program(pair: Pair<Rule>) -> Result<MachineDefinition, TuringMachineError> {
    let mut blocks = Blocks::default();
    let mut seen = HashSet::new();

    for section in pair.into_inner() {
        if section.as_rule() != Rule::section {
            continue; // EOI
        }

        let mut inner = section.into_inner();
        let header = inner
            .next()
            .ok_or_else(|| TuringMachineError::ValidationError("Section without label".into()))?;
        let span = header.as_span();
        let kind = label_rule(header)?;

        check_unique_label(kind, span, &mut seen)?;

        let lines: Vec<Line> = inner.map(parse_line).collect();
        tracing::debug!(label = label_name(kind), lines = lines.len(), "parsed block");

        match kind {
            Rule::alphabet_label => blocks.alphabet = Some(lines),
            Rule::tape_label => blocks.tape = lines,
            Rule::states_label => blocks.states = lines,
            Rule::start_label => blocks.start = Some((lines, span)),
            Rule::accepting_label => blocks.accepting = lines,
            Rule::transitions_label => blocks.transitions = lines,
            _ => {}
        }
    }

    build_definition(blocks)
}

/// Turns the gathered blocks into a definition using the builder operations.
fn build_definition(blocks: Blocks) -> Result<MachineDefinition, TuringMachineError> {
    let mut definition = match blocks.alphabet {
        Some(lines) => MachineDefinition::new(tokens(&lines)),
        None => MachineDefinition::new(DEFAULT_ALPHABET),
    };

    let (start_lines, start_span) = check_required_block(blocks.start, "starting state")?;
    let start = match tokens(&start_lines).as_slice() {
        [state] => *state,
        other => {
            return Err(parse_error(
                &format!(
                    "'starting state' needs exactly one state name, found {}",
                    other.len()
                ),
                start_span,
            ))
        }
    };

    definition
        .add_tape(tokens(&blocks.tape))
        .add_states(tokens(&blocks.states))
        .set_start_state(start)
        .add_accepting_states(tokens(&blocks.accepting));

    for (line, span) in &blocks.transitions {
        match line.as_slice() {
            [from, read, write, movement, to] => {
                definition.add_rule(from, read, write, movement, to);
            }
            _ => {
                return Err(parse_error(
                    &format!(
                        "Transition needs {TRANSITION_TOKENS} tokens (from read write movement to), found {}",
                        line.len()
                    ),
                    *span,
                ))
            }
        }
    }

    Ok(definition)
}

/// Extracts the label rule from a `Pair<Rule::header>`.
fn label_rule(header: Pair<Rule>) -> Result<Rule, TuringMachineError> {
    header
        .into_inner()
        .next()
        .map(|label| label.as_rule())
        .ok_or_else(|| TuringMachineError::ValidationError("Header without label".into()))
}

/// Parses a `Pair<Rule::line>` into its whitespace-separated tokens.
fn parse_line(pair: Pair<Rule>) -> Line {
    let span = pair.as_span();
    let symbols = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::symbol)
        .map(|p| p.as_str())
        .collect();

    (symbols, span)
}

/// Flattens the tokens of all lines of a block, in order.
fn tokens<'i>(lines: &[Line<'i>]) -> Vec<&'i str> {
    lines
        .iter()
        .flat_map(|(symbols, _)| symbols.iter().copied())
        .collect()
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks that a label has not been declared before.
fn check_unique_label(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), TuringMachineError> {
    if !seen.insert(rule) {
        return Err(parse_error(
            &format!("Duplicate '{}' block", label_name(rule)),
            span,
        ));
    }

    Ok(())
}

/// Checks if a required block is present, returning an `Err` if it's missing.
fn check_required_block<T>(value: Option<T>, name: &str) -> Result<T, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing '{name}' block")))
}

/// The label as written in descriptions.
fn label_name(rule: Rule) -> &'static str {
    match rule {
        Rule::alphabet_label => "alphabet",
        Rule::tape_label => "tape",
        Rule::states_label => "states",
        Rule::start_label => "starting state",
        Rule::accepting_label => "accepting states",
        Rule::transitions_label => "transitions",
        _ => "unknown",
    }
}
