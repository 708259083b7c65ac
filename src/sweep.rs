//! Batch runs over a range of input sizes, collecting steps and elapsed time per run.
//!
//! Every input gets a fresh `TapeMachine`; only the configuration is shared.

use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::config::MachineConfig;
use crate::encoder::{encode, fibonacci};
use crate::machine::TapeMachine;
use crate::types::{RunResult, TuringMachineError};

/// Inputs longer than this are abbreviated in the summary table.
const MAX_INPUT_WIDTH: usize = 20;

/// One run of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub n: usize,
    pub input: String,
    /// The reference Fibonacci value for `n`.
    pub expected: u64,
    pub run: RunResult,
}

impl Sample {
    /// Whether the machine accepted and left the expected value on the tape.
    pub fn is_correct(&self) -> bool {
        self.run.accepted && self.run.result == self.expected
    }
}

/// Runs the machine once for every `n` in `sizes`, one after the other.
pub fn sweep(
    config: &MachineConfig,
    sizes: RangeInclusive<usize>,
    max_steps: usize,
) -> Result<Vec<Sample>, TuringMachineError> {
    sizes.map(|n| sample(config, n, max_steps)).collect()
}

/// Runs the machine once for every `n` in `sizes` on the rayon thread pool.
///
/// Samples come back in input order.
pub fn par_sweep(
    config: &MachineConfig,
    sizes: RangeInclusive<usize>,
    max_steps: usize,
) -> Result<Vec<Sample>, TuringMachineError> {
    sizes
        .into_par_iter()
        .map(|n| sample(config, n, max_steps))
        .collect()
}

fn sample(
    config: &MachineConfig,
    n: usize,
    max_steps: usize,
) -> Result<Sample, TuringMachineError> {
    let input = encode(n);
    let run = TapeMachine::new(config, &input)?.run(max_steps);

    Ok(Sample {
        n,
        input,
        expected: fibonacci(n),
        run,
    })
}

/// Aggregated view over a sweep, printable as a table.
#[derive(Debug, Clone)]
pub struct Summary<'a> {
    samples: &'a [Sample],
}

impl<'a> Summary<'a> {
    pub fn from_samples(samples: &'a [Sample]) -> Self {
        Self { samples }
    }

    pub fn runs(&self) -> usize {
        self.samples.len()
    }

    pub fn accepted(&self) -> usize {
        self.samples.iter().filter(|s| s.run.accepted).count()
    }

    pub fn correct(&self) -> usize {
        self.samples.iter().filter(|s| s.is_correct()).count()
    }

    /// Runs cut off by the step ceiling.
    pub fn limited(&self) -> usize {
        self.samples
            .iter()
            .filter(|s| s.run.is_step_limit_exceeded())
            .count()
    }

    pub fn total_steps(&self) -> usize {
        self.samples.iter().map(|s| s.run.steps).sum()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.samples.iter().map(|s| s.run.elapsed).sum()
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>3} | {:<22} | {:>10} | {:>9} | {:>8} | {:>8} | ok",
            "n", "input", "time (s)", "steps", "result", "expected"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;

        for sample in self.samples {
            writeln!(
                f,
                "{:>3} | {:<22} | {:>10.6} | {:>9} | {:>8} | {:>8} | {}",
                sample.n,
                abbreviate(&sample.input),
                sample.run.elapsed.as_secs_f64(),
                sample.run.steps,
                sample.run.result,
                sample.expected,
                if sample.is_correct() { '✓' } else { '✗' }
            )?;
        }

        writeln!(f, "{}", "-".repeat(80))?;
        write!(
            f,
            "{} runs, {} accepted, {} correct, {} hit the step limit, {} steps in {:.6}s",
            self.runs(),
            self.accepted(),
            self.correct(),
            self.limited(),
            self.total_steps(),
            self.total_elapsed().as_secs_f64()
        )
    }
}

fn abbreviate(input: &str) -> String {
    let len = input.chars().count();
    if len <= MAX_INPUT_WIDTH {
        return input.to_string();
    }

    let head: String = input.chars().take(MAX_INPUT_WIDTH - 3).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::programs;

    #[test]
    fn test_sweep_matches_reference() {
        let config = programs::fibonacci().unwrap();

        let samples = sweep(&config, 1..=8, 10_000).unwrap();

        assert_eq!(samples.len(), 8);
        for sample in &samples {
            assert!(sample.is_correct(), "n = {}: {:?}", sample.n, sample.run);
            assert_eq!(sample.input.len(), sample.n);
        }
    }

    #[test]
    fn test_par_sweep_matches_sequential() {
        let config = programs::fibonacci().unwrap();

        let sequential = sweep(&config, 1..=7, 10_000).unwrap();
        let parallel = par_sweep(&config, 1..=7, 10_000).unwrap();

        let key = |s: &Sample| (s.n, s.run.steps, s.run.result, s.run.tape.clone());
        assert_eq!(
            sequential.iter().map(key).collect::<Vec<_>>(),
            parallel.iter().map(key).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_sweep_reports_step_limit() {
        let config = programs::fibonacci().unwrap();

        let samples = sweep(&config, 5..=6, 300).unwrap();
        let summary = Summary::from_samples(&samples);

        // n = 5 needs 280 steps, n = 6 needs 611.
        assert!(samples[0].is_correct());
        assert!(samples[1].run.is_step_limit_exceeded());
        assert_eq!(summary.correct(), 1);
        assert_eq!(summary.limited(), 1);
        assert_eq!(summary.total_steps(), 280 + 300);
    }

    #[test]
    fn test_summary_table() {
        let config = programs::fibonacci().unwrap();
        let samples = sweep(&config, 1..=3, 10_000).unwrap();

        let table = Summary::from_samples(&samples).to_string();

        assert!(table.contains("expected"));
        assert!(table.contains('✓'));
        assert!(!table.contains('✗'));
        assert!(table.ends_with(&format!(
            "3 runs, 3 accepted, 3 correct, 0 hit the step limit, {} steps in {:.6}s",
            8 + 27 + 64,
            Summary::from_samples(&samples).total_elapsed().as_secs_f64()
        )));
    }

    #[test]
    fn test_abbreviate() {
        assert_eq!(abbreviate("111"), "111");
        assert_eq!(abbreviate(&encode(30)), format!("{}...", encode(17)));
    }
}
