//! This crate provides the core logic for a single-tape Turing Machine simulator that computes
//! Fibonacci numbers from unary input.
//! It includes modules for loading and validating machine configurations, simulating their
//! execution, encoding unary inputs, and sweeping runs over a range of input sizes.

pub mod analyzer;
pub mod config;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod programs;
pub mod sweep;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the machine configuration and its transition table type.
pub use config::{MachineConfig, TransitionTable};
/// Re-exports the unary encoding functions and the reference Fibonacci function.
pub use encoder::{decode, encode, fibonacci};
/// Re-exports the `ConfigLoader` struct from the loader module.
pub use loader::ConfigLoader;
/// Re-exports the `TapeMachine` struct from the machine module.
pub use machine::TapeMachine;
/// Re-exports the batch sweep API.
pub use sweep::{par_sweep, sweep, Sample, Summary};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Direction, Halt, RunResult, Step, Transition, TuringMachineError, BLANK_GLYPH,
    DEFAULT_MAX_STEPS, RESULT_SYMBOL,
};
