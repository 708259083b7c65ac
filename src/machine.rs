//! This module defines the `TapeMachine` struct, which simulates a single-tape, single-head
//! deterministic Turing Machine. It handles the machine's state, tape operations, head
//! movements, and execution of transition rules.

use std::time::Instant;

use crate::config::MachineConfig;
use crate::tape::Tape;
use crate::types::{
    Halt, RunResult, Step, Transition, TuringMachineError, BLANK_GLYPH, RESULT_SYMBOL,
};

/// Represents a single-tape Turing Machine executing one run.
///
/// The machine owns its tape, head, state and step counter, and borrows the configuration
/// read-only. Every run needs its own machine; the configuration can be shared freely.
#[derive(Debug, Clone)]
pub struct TapeMachine<'a> {
    config: &'a MachineConfig,
    input: String,
    state: String,
    tape: Tape,
    step_count: usize,
}

impl<'a> TapeMachine<'a> {
    /// Creates a new `TapeMachine` for `input`.
    ///
    /// The input is written to a fresh tape with the head on its first symbol, and the
    /// machine starts in the configured initial state.
    ///
    /// # Arguments
    ///
    /// * `config` - The `MachineConfig` defining the Turing Machine.
    /// * `input` - The initial tape content; every symbol must be in the input alphabet.
    ///
    /// # Returns
    ///
    /// * `Ok(TapeMachine)` ready to run.
    /// * `Err(TuringMachineError::InvalidInputSymbol)` for the first symbol outside the
    ///   input alphabet.
    pub fn new(config: &'a MachineConfig, input: &str) -> Result<Self, TuringMachineError> {
        if let Some(symbol) = input.chars().find(|&c| !config.accepts_input_symbol(c)) {
            return Err(TuringMachineError::InvalidInputSymbol(symbol));
        }

        Ok(Self {
            config,
            input: input.to_string(),
            state: config.initial_state.clone(),
            tape: Tape::new(input, config.blank),
            step_count: 0,
        })
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// Reads the symbol under the head, writes the rule's symbol, moves the head and enters
    /// the next state. Nothing is applied when the machine already sits in an accepting
    /// state or has no rule for the symbol it reads.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the machine can perform another step.
    /// * `Step::Halt(_)` if the machine is halted, either before or right after this step.
    pub fn step(&mut self) -> Step {
        let config = self.config;
        let symbol = self.tape.read();

        if config.is_accepting(&self.state) {
            return Step::Halt(Halt::Accepted);
        }

        let Some(transition) = config.transition(&self.state, symbol) else {
            return Step::Halt(self.stuck(symbol));
        };

        self.apply(transition);

        match self.halt() {
            Some(halt) => Step::Halt(halt),
            None => Step::Continue,
        }
    }

    /// Runs the Turing Machine until it halts or `max_steps` transitions were applied.
    pub fn run(&mut self, max_steps: usize) -> RunResult {
        self.run_with(max_steps, |_| {})
    }

    /// Runs the Turing Machine like [`TapeMachine::run`], calling `observer` after every
    /// applied transition.
    ///
    /// Reaching the step ceiling is not an error: the result reports
    /// `Halt::StepLimitExceeded` and the tape as it stands. Elapsed time covers the step
    /// loop only.
    pub fn run_with<F>(&mut self, max_steps: usize, mut observer: F) -> RunResult
    where
        F: FnMut(&TapeMachine<'a>),
    {
        let started = Instant::now();

        let halt = loop {
            if let Some(halt) = self.halt() {
                break halt;
            }
            if self.step_count >= max_steps {
                break Halt::StepLimitExceeded { limit: max_steps };
            }

            let step = self.step();
            observer(self);

            if let Step::Halt(halt) = step {
                break halt;
            }
        };

        let elapsed = started.elapsed();

        RunResult {
            accepted: self.config.is_accepting(&self.state),
            halt,
            final_state: self.state.clone(),
            steps: self.step_count,
            elapsed,
            tape: self.tape.render(BLANK_GLYPH),
            result: self.result(),
        }
    }

    /// Returns the reason the machine cannot step any further, if it is halted.
    ///
    /// A machine is halted when it is in an accepting state, or when its current state has
    /// no rule for the symbol under the head.
    pub fn halt(&self) -> Option<Halt> {
        if self.config.is_accepting(&self.state) {
            return Some(Halt::Accepted);
        }

        let symbol = self.tape.read();
        self.config
            .transition(&self.state, symbol)
            .is_none()
            .then(|| self.stuck(symbol))
    }

    /// Checks if the Turing Machine is currently in a halted state.
    pub fn is_halted(&self) -> bool {
        self.halt().is_some()
    }

    /// Resets the Turing Machine to its initial configuration.
    /// This includes resetting the state, tape, head position, and step count.
    pub fn reset(&mut self) {
        self.state = self.config.initial_state.clone();
        self.tape = Tape::new(&self.input, self.config.blank);
        self.step_count = 0;
    }

    /// Returns the current state of the Turing Machine.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the total number of steps executed by the Turing Machine.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the logical head position; 0 is the first input cell.
    pub fn head(&self) -> isize {
        self.tape.head()
    }

    /// Returns the symbol currently under the head.
    pub fn symbol(&self) -> char {
        self.tape.read()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn config(&self) -> &'a MachineConfig {
        self.config
    }

    /// Number of result symbols on the materialized tape.
    pub fn result(&self) -> u64 {
        self.tape.count(RESULT_SYMBOL) as u64
    }

    fn apply(&mut self, transition: &Transition) {
        self.tape.write(transition.write);
        self.tape.shift(transition.direction);
        self.state.clone_from(&transition.next_state);
        self.step_count += 1;
    }

    fn stuck(&self, symbol: char) -> Halt {
        Halt::NoTransition {
            state: self.state.clone(),
            symbol,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::marker_config;
    use crate::types::Direction;

    #[test]
    fn test_machine_creation() {
        let config = marker_config();
        let machine = TapeMachine::new(&config, "111").unwrap();

        assert_eq!(machine.state(), "scan");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.symbol(), '1');
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.result(), 3);
    }

    #[test]
    fn test_rejects_symbol_outside_input_alphabet() {
        let config = marker_config();

        let result = TapeMachine::new(&config, "1x1");
        assert_eq!(
            result.unwrap_err(),
            TuringMachineError::InvalidInputSymbol('x')
        );

        // The blank belongs to the tape alphabet but not to the input alphabet.
        assert!(TapeMachine::new(&config, "B").is_err());
    }

    #[test]
    fn test_single_step() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "11").unwrap();

        let result = machine.step();

        assert_eq!(result, Step::Continue);
        assert_eq!(machine.state(), "scan");
        assert_eq!(machine.tape().get(0), 'x');
        assert_eq!(machine.head(), 1);
        assert_eq!(machine.step_count(), 1);
    }

    #[test]
    fn test_step_reports_acceptance_after_last_transition() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "1").unwrap();

        assert_eq!(machine.step(), Step::Continue);
        assert_eq!(machine.step(), Step::Halt(Halt::Accepted));
        assert_eq!(machine.step_count(), 2);

        // Further steps apply nothing.
        assert_eq!(machine.step(), Step::Halt(Halt::Accepted));
        assert_eq!(machine.step_count(), 2);
    }

    #[test]
    fn test_run_to_acceptance() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "111").unwrap();

        let result = machine.run(100);

        assert!(result.accepted);
        assert_eq!(result.halt, Halt::Accepted);
        assert_eq!(result.final_state, "done");
        assert_eq!(result.steps, 4);
        assert_eq!(result.result, 0);
        assert!(result.tape.contains("xxx"));
        assert!(result.tape.contains(BLANK_GLYPH));
    }

    #[test]
    fn test_missing_transition_halts_gracefully() {
        let mut config = marker_config();
        config.transitions.get_mut("scan").unwrap().remove(&'B');

        let mut machine = TapeMachine::new(&config, "11").unwrap();
        let result = machine.run(100);

        assert!(!result.accepted);
        assert_eq!(
            result.halt,
            Halt::NoTransition {
                state: "scan".to_string(),
                symbol: 'B',
            }
        );
        assert_eq!(result.steps, 2);
        assert!(result.tape.contains("xx"));
    }

    #[test]
    fn test_stuck_on_first_symbol() {
        let mut config = marker_config();
        config.input_alphabet.insert('x');

        let mut machine = TapeMachine::new(&config, "x").unwrap();
        assert!(machine.is_halted());

        let result = machine.run(100);
        assert_eq!(result.steps, 0);
        assert!(!result.accepted);
    }

    #[test]
    fn test_step_limit() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "11111").unwrap();

        let result = machine.run(1);

        assert!(!result.accepted);
        assert!(result.is_step_limit_exceeded());
        assert_eq!(result.halt, Halt::StepLimitExceeded { limit: 1 });
        assert_eq!(result.steps, 1);
    }

    #[test]
    fn test_halt_on_the_limiting_step_wins() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "1").unwrap();

        let result = machine.run(2);

        assert!(result.accepted);
        assert_eq!(result.halt, Halt::Accepted);
        assert_eq!(result.steps, 2);
    }

    #[test]
    fn test_observer_sees_every_step() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "111").unwrap();

        let mut trace = Vec::new();
        let result = machine.run_with(100, |m| trace.push((m.step_count(), m.head())));

        assert_eq!(trace.len(), result.steps);
        assert_eq!(trace, vec![(1, 1), (2, 2), (3, 3), (4, 2)]);
    }

    #[test]
    fn test_reset() {
        let config = marker_config();
        let mut machine = TapeMachine::new(&config, "11").unwrap();

        machine.run(100);
        assert_eq!(machine.state(), "done");

        machine.reset();
        assert_eq!(machine.state(), "scan");
        assert_eq!(machine.head(), 0);
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().get(0), '1');
        assert_eq!(machine.result(), 2);
    }

    #[test]
    fn test_head_walks_left_past_margin() {
        let mut config = marker_config();
        // Walk left forever over blanks.
        config.transitions.get_mut("scan").unwrap().insert(
            'B',
            Transition {
                next_state: "scan".to_string(),
                write: 'B',
                direction: Direction::Left,
            },
        );
        config.transitions.get_mut("scan").unwrap().insert(
            '1',
            Transition {
                next_state: "scan".to_string(),
                write: '1',
                direction: Direction::Left,
            },
        );

        let mut machine = TapeMachine::new(&config, "1").unwrap();
        let result = machine.run(500);

        assert!(result.is_step_limit_exceeded());
        assert_eq!(machine.head(), -500);
        assert_eq!(machine.tape().get(0), '1');
        assert_eq!(result.result, 1);
    }
}
