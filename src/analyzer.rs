//! This module provides functions for analyzing machine configurations to detect common errors
//! and inconsistencies before execution. This includes checks for declared states, alphabet
//! consistency, and symbols used by the transition rules.
//!
//! The table does not have to be complete: a missing `(state, symbol)` rule is a legal,
//! non-accepting halt and is never reported here.

use crate::config::MachineConfig;
use crate::types::TuringMachineError;
use std::collections::{BTreeSet, HashSet};

/// Represents various errors that can be found during the analysis of a machine configuration.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The configuration declares no states at all.
    NoStates,
    /// The initial state is not among the declared states.
    InvalidStartState(String),
    /// Accepting states that are not among the declared states.
    UndeclaredAcceptingStates(Vec<String>),
    /// The blank symbol is missing from the tape alphabet.
    BlankNotInTapeAlphabet(char),
    /// The blank symbol is part of the input alphabet.
    BlankInInputAlphabet(char),
    /// Input symbols that are missing from the tape alphabet.
    InputSymbolsNotOnTape(Vec<char>),
    /// Transitions that start from or lead to undeclared states.
    UndefinedStates(Vec<String>),
    /// Transitions that read or write symbols outside the tape alphabet.
    UndefinedSymbols(Vec<String>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::Validation`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoStates => {
                TuringMachineError::Validation("No states declared".to_string())
            }
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::Validation(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndeclaredAcceptingStates(states) => TuringMachineError::Validation(
                format!("Accepting states are not declared: {:?}", states),
            ),
            AnalysisError::BlankNotInTapeAlphabet(blank) => TuringMachineError::Validation(
                format!("Blank symbol '{}' is not in the tape alphabet", blank),
            ),
            AnalysisError::BlankInInputAlphabet(blank) => TuringMachineError::Validation(
                format!("Blank symbol '{}' must not be in the input alphabet", blank),
            ),
            AnalysisError::InputSymbolsNotOnTape(symbols) => {
                TuringMachineError::Validation(format!(
                    "Input symbols missing from the tape alphabet: {:?}",
                    symbols
                ))
            }
            AnalysisError::UndefinedStates(transitions) => TuringMachineError::Validation(
                format!("Transitions reference undeclared states: {:?}", transitions),
            ),
            AnalysisError::UndefinedSymbols(transitions) => TuringMachineError::Validation(
                format!("Transitions use symbols outside the tape alphabet: {:?}", transitions),
            ),
        }
    }
}

/// Analyzes a given `MachineConfig` for structural errors.
///
/// # Arguments
///
/// * `config` - A reference to the `MachineConfig` to be analyzed.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::Validation)` for the first rule that is violated.
pub fn analyze(config: &MachineConfig) -> Result<(), TuringMachineError> {
    [
        check_states,
        check_accepting_states,
        check_alphabets,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .find_map(|f| f(config).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// Checks that states are declared and that the initial state is one of them.
fn check_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    if config.states.is_empty() {
        return Err(AnalysisError::NoStates);
    }

    if !config.states.contains(&config.initial_state) {
        return Err(AnalysisError::InvalidStartState(
            config.initial_state.clone(),
        ));
    }

    Ok(())
}

fn check_accepting_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    let undeclared: Vec<String> = config
        .accepting_states
        .difference(&config.states)
        .cloned()
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredAcceptingStates(undeclared));
    }

    Ok(())
}

/// Checks the relation between the blank symbol, the input alphabet and the tape alphabet.
fn check_alphabets(config: &MachineConfig) -> Result<(), AnalysisError> {
    if !config.tape_alphabet.contains(&config.blank) {
        return Err(AnalysisError::BlankNotInTapeAlphabet(config.blank));
    }

    if config.input_alphabet.contains(&config.blank) {
        return Err(AnalysisError::BlankInInputAlphabet(config.blank));
    }

    let missing: Vec<char> = config
        .input_alphabet
        .difference(&config.tape_alphabet)
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::InputSymbolsNotOnTape(missing));
    }

    Ok(())
}

/// Checks that every transition starts from and leads to a declared state.
fn check_transition_states(config: &MachineConfig) -> Result<(), AnalysisError> {
    let mut undefined = BTreeSet::new();

    for (state, rules) in &config.transitions {
        if !config.states.contains(state) {
            undefined.insert(state.clone());
        }

        for (symbol, transition) in rules {
            if !config.states.contains(&transition.next_state) {
                undefined.insert(format!("{}[{}] -> {}", state, symbol, transition.next_state));
            }
        }
    }

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedStates(undefined.into_iter().collect()));
    }

    Ok(())
}

/// Checks that every transition reads and writes symbols of the tape alphabet.
fn check_transition_symbols(config: &MachineConfig) -> Result<(), AnalysisError> {
    let mut undefined = BTreeSet::new();

    for (state, rules) in &config.transitions {
        for (&symbol, transition) in rules {
            for used in [symbol, transition.write] {
                if !config.tape_alphabet.contains(&used) {
                    undefined.insert(format!("{}[{}]: '{}'", state, symbol, used));
                }
            }
        }
    }

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedSymbols(undefined.into_iter().collect()));
    }

    Ok(())
}

/// Returns declared states that cannot be reached from the initial state, sorted.
///
/// Unreachable states are harmless, so this is informational and never fails a load.
pub fn unreachable_states(config: &MachineConfig) -> Vec<String> {
    let mut visited = HashSet::new();
    let mut queue = vec![config.initial_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        if let Some(rules) = config.transitions.get(state) {
            for transition in rules.values() {
                if !visited.contains(transition.next_state.as_str()) {
                    queue.push(transition.next_state.as_str());
                }
            }
        }
    }

    config
        .states
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .cloned()
        .collect()
}
