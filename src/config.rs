//! The machine configuration: alphabets, states and the transition table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::types::Transition;

/// Transition rules keyed by state and then by the symbol read under the head.
pub type TransitionTable = HashMap<String, HashMap<char, Transition>>;

/// A complete machine definition, loaded once and read-only afterwards.
///
/// Machines borrow the configuration, so a single value can back any number of
/// independent runs. Documents written with the Spanish keys (`estados`,
/// `tabla_transicion`, ...) load as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Display name of the machine.
    #[serde(default = "default_name", alias = "nombre")]
    pub name: String,
    /// Every state identifier the machine may use.
    #[serde(alias = "estados")]
    pub states: BTreeSet<String>,
    /// Symbols allowed in the initial input.
    #[serde(alias = "alfabeto_entrada")]
    pub input_alphabet: BTreeSet<char>,
    /// Symbols allowed on the tape, including the blank.
    #[serde(alias = "alfabeto_cinta")]
    pub tape_alphabet: BTreeSet<char>,
    /// The state the machine starts in.
    #[serde(alias = "estado_inicial")]
    pub initial_state: String,
    /// The content of every cell never written.
    #[serde(alias = "simbolo_blanco")]
    pub blank: char,
    /// States that end a run successfully.
    #[serde(alias = "estados_finales")]
    pub accepting_states: BTreeSet<String>,
    /// The transition rules.
    #[serde(alias = "tabla_transicion")]
    pub transitions: TransitionTable,
}

fn default_name() -> String {
    "Unnamed machine".to_string()
}

impl MachineConfig {
    /// Checks if `state` is one of the accepting states.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accepting_states.contains(state)
    }

    /// Finds the rule for reading `symbol` while in `state`.
    pub fn transition(&self, state: &str, symbol: char) -> Option<&Transition> {
        self.transitions
            .get(state)
            .and_then(|rules| rules.get(&symbol))
    }

    /// Checks if `symbol` may appear in an input string.
    pub fn accepts_input_symbol(&self, symbol: char) -> bool {
        self.input_alphabet.contains(&symbol)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of `(state, symbol)` rules.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashMap::len).sum()
    }
}
