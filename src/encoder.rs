//! Unary encoding of machine inputs, and the reference Fibonacci function results are
//! checked against.

use crate::types::{TuringMachineError, RESULT_SYMBOL};

/// Encodes `n` in unary: `n` repetitions of the result symbol.
pub fn encode(n: usize) -> String {
    std::iter::repeat_n(RESULT_SYMBOL, n).collect()
}

/// Decodes a unary input back into the number it represents.
///
/// # Returns
///
/// * `Ok(n)` for a non-empty string made only of the result symbol.
/// * `Err(TuringMachineError::Validation)` for an empty string.
/// * `Err(TuringMachineError::InvalidInputSymbol)` for the first other symbol.
pub fn decode(input: &str) -> Result<usize, TuringMachineError> {
    if input.is_empty() {
        return Err(TuringMachineError::Validation(format!(
            "input must contain at least one '{}'",
            RESULT_SYMBOL
        )));
    }

    match input.chars().find(|&c| c != RESULT_SYMBOL) {
        Some(symbol) => Err(TuringMachineError::InvalidInputSymbol(symbol)),
        None => Ok(input.chars().count()),
    }
}

/// Returns the `n`-th Fibonacci number, with `fibonacci(0) = 0` and
/// `fibonacci(1) = fibonacci(2) = 1`.
///
/// Saturates at `u64::MAX` instead of overflowing.
pub fn fibonacci(n: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a.saturating_add(b));
    }
    a
}
