//! Machine configurations bundled with the crate.
//!
//! Every accessor parses the embedded document again, so callers always receive an
//! independent `MachineConfig`.

use crate::config::MachineConfig;
use crate::loader::ConfigLoader;
use crate::types::TuringMachineError;

/// The canonical unary Fibonacci machine.
///
/// For an input of `n` ones it leaves `fibonacci(n)` ones on the tape. One input symbol is
/// consumed per round; each round turns the pair `(A, B)` into `(B, A + B)` by copying both
/// regions to the right end of the tape.
pub const FIBONACCI: &str = include_str!("../programs/fibonacci.json");

/// Embedded configurations as `(name, document)` pairs.
const PROGRAM_TEXTS: [(&str, &str); 1] = [("fibonacci", FIBONACCI)];

/// Loads the canonical Fibonacci machine.
pub fn fibonacci() -> Result<MachineConfig, TuringMachineError> {
    ConfigLoader::load_config_from_str(FIBONACCI)
}

/// Lists the names of the embedded configurations.
pub fn names() -> Vec<&'static str> {
    PROGRAM_TEXTS.iter().map(|(name, _)| *name).collect()
}

/// Loads an embedded configuration by name.
pub fn by_name(name: &str) -> Result<MachineConfig, TuringMachineError> {
    let (_, text) = PROGRAM_TEXTS
        .iter()
        .find(|(program, _)| *program == name)
        .ok_or_else(|| {
            TuringMachineError::Validation(format!("Program '{}' not found", name))
        })?;

    ConfigLoader::load_config_from_str(text)
}
