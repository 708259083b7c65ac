use clap::{Args, Parser, Subcommand};
use fibtm::{
    decode, fibonacci, par_sweep, programs, sweep, ConfigLoader, MachineConfig, RunResult,
    Summary, TapeMachine, TuringMachineError, BLANK_GLYPH, DEFAULT_MAX_STEPS,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Number of cells shown on each side of the head when tracing.
const TRACE_RADIUS: usize = 10;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the machine once on a unary input such as `11111`
    Run(RunArgs),
    /// Run the machine for n = 1..=max-n and print steps and time per run
    Analyze(AnalyzeArgs),
    /// List the embedded machine configurations
    Programs,
}

#[derive(Args)]
struct MachineArgs {
    /// JSON configuration file; the embedded Fibonacci machine is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many steps
    #[arg(short, long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct RunArgs {
    /// The input written on the tape
    input: String,

    /// Print each step of the execution
    #[arg(short = 'd', long)]
    trace: bool,

    #[command(flatten)]
    machine: MachineArgs,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Largest input size to run
    #[arg(short = 'n', long, default_value_t = 10)]
    max_n: usize,

    /// Run the inputs in parallel
    #[arg(short, long)]
    parallel: bool,

    #[command(flatten)]
    machine: MachineArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Run(args) => run(args),
        Command::Analyze(args) => analyze(args),
        Command::Programs => {
            for name in programs::names() {
                println!("{name}");
            }
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load(args: &MachineArgs) -> Result<MachineConfig, TuringMachineError> {
    match &args.config {
        Some(path) => ConfigLoader::load_config(path),
        None => programs::fibonacci(),
    }
}

fn run(args: RunArgs) -> Result<(), TuringMachineError> {
    let config = load(&args.machine)?;

    // The embedded machine only understands unary numbers.
    let n = if args.machine.config.is_some() {
        None
    } else {
        Some(decode(&args.input)?)
    };

    let mut machine = TapeMachine::new(&config, &args.input)?;

    let result = if args.trace {
        print_state(&machine);
        machine.run_with(args.machine.max_steps, print_state)
    } else {
        machine.run(args.machine.max_steps)
    };

    if result.is_step_limit_exceeded() {
        eprintln!("Warning: {}", result.halt);
    }

    if args.machine.json {
        println!("{}", to_json(&result)?);
        return Ok(());
    }

    print_result(&result);
    if let Some(n) = n {
        let expected = fibonacci(n);
        println!(
            "Fibonacci({n}) = {}, expected {expected} {}",
            result.result,
            if result.result == expected { '✓' } else { '✗' }
        );
    }

    Ok(())
}

fn analyze(args: AnalyzeArgs) -> Result<(), TuringMachineError> {
    if args.max_n == 0 {
        return Err(TuringMachineError::Validation(
            "max-n must be at least 1".to_string(),
        ));
    }

    let config = load(&args.machine)?;
    let sizes = 1..=args.max_n;

    let samples = if args.parallel {
        par_sweep(&config, sizes, args.machine.max_steps)?
    } else {
        sweep(&config, sizes, args.machine.max_steps)?
    };

    for sample in samples.iter().filter(|s| s.run.is_step_limit_exceeded()) {
        eprintln!("Warning: n = {}: {}", sample.n, sample.run.halt);
    }

    if args.machine.json {
        println!("{}", to_json(&samples)?);
    } else {
        println!("{}", Summary::from_samples(&samples));
    }

    Ok(())
}

fn print_state(machine: &TapeMachine) {
    println!(
        "Step: {}, State: {}, Head: {}\n{}",
        machine.step_count(),
        machine.state(),
        machine.head(),
        machine.tape().window(TRACE_RADIUS, BLANK_GLYPH)
    );
}

fn print_result(result: &RunResult) {
    println!("\nMachine halted: {}", result.halt);
    println!("  Final state: {}", result.final_state);
    println!("  Accepted:    {}", result.accepted);
    println!("  Steps:       {}", result.steps);
    println!("  Time:        {:.6}s", result.elapsed.as_secs_f64());
    println!("  Final tape:  {}", result.tape.trim_matches(BLANK_GLYPH));
    println!("  Result:      {}", result.result);
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, TuringMachineError> {
    serde_json::to_string_pretty(value).map_err(|e| TuringMachineError::Validation(e.to_string()))
}
