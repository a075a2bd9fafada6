//! Pipeline simulator CLI.
//!
//! This binary is a thin front end over `mipsim-core`. It performs:
//! 1. **Run:** Assemble a source file, run it to completion and print the trace,
//!    final state and statistics (text or JSON).
//! 2. **Check:** Assemble a source file and report every decode error.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use mipsim_core::Simulator;
use mipsim_core::common::NUM_REGISTERS;
use mipsim_core::config::Config;
use mipsim_core::core::pipeline::Trace;
use mipsim_core::sim::{RunOutcome, load_program_file};
use mipsim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "mipsim",
    author,
    version,
    about = "Cycle-accurate five-stage pipeline simulator",
    long_about = "Assemble and run a MIPS-subset program on a five-stage in-order pipeline with forwarding and branch prediction.\n\nExamples:\n  mipsim run loop.s --trace\n  mipsim run loop.s --config btb64.json --json\n  mipsim check loop.s"
)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and run a program.
    Run {
        /// Assembly source file.
        file: PathBuf,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured cycle cap.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Print the per-cycle pipeline trace.
        #[arg(short, long)]
        trace: bool,

        /// Emit a single JSON document instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Assemble a program and report decode errors without running it.
    Check {
        /// Assembly source file.
        file: PathBuf,
    },
}

/// Machine-readable result of `mipsim run --json`.
#[derive(Serialize)]
struct RunReport<'a> {
    outcome: RunOutcome,
    pc: u32,
    registers: Vec<i32>,
    memory: &'a [i32],
    return_stack: &'a [u32],
    stats: &'a SimStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<&'a Trace>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            file,
            config,
            max_cycles,
            trace,
            json,
        } => cmd_run(&file, config.as_deref(), max_cycles, trace, json),
        Commands::Check { file } => cmd_check(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("invalid config '{}': {e}", path.display()))
}

fn cmd_check(file: &Path) -> Result<(), String> {
    let program = load_program_file(file).map_err(|e| e.to_string())?;
    println!("{}: {} instructions OK", file.display(), program.len());
    Ok(())
}

fn cmd_run(
    file: &Path,
    config: Option<&Path>,
    max_cycles: Option<u64>,
    show_trace: bool,
    json: bool,
) -> Result<(), String> {
    let mut config = load_config(config)?;
    if let Some(cap) = max_cycles {
        config.general.max_cycles = cap;
    }
    config.general.trace_pipeline = show_trace;
    debug!(?config, "configuration");

    let program = load_program_file(file).map_err(|e| e.to_string())?;
    let mut sim = Simulator::new(&config);
    sim.load(program);

    let outcome = sim.run().map_err(|e| {
        error!(%e, "simulation aborted");
        e.to_string()
    })?;

    if json {
        let report = RunReport {
            outcome,
            pc: sim.pc(),
            registers: sim.cpu.regs.snapshot().to_vec(),
            memory: sim.cpu.dmem.words(),
            return_stack: sim.cpu.stack.entries(),
            stats: sim.stats(),
            trace: show_trace.then(|| sim.trace()),
        };
        let text = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if show_trace {
        print!("{}", sim.trace());
        println!();
    }

    match outcome {
        RunOutcome::Completed { cycles } => println!("[*] Completed in {cycles} cycles"),
        RunOutcome::CycleLimit { cycles } => {
            println!("[!] Stopped at cycle cap ({cycles} cycles); program did not drain");
        }
    }
    println!("PC = {:#010x}", sim.pc());

    println!("Registers:");
    let regs = sim.cpu.regs.snapshot();
    for (idx, value) in regs.iter().enumerate().take(NUM_REGISTERS) {
        if *value != 0 {
            println!("  ${idx:<2} = {value}");
        }
    }

    println!("Memory:");
    for (word, value) in sim.cpu.dmem.words().iter().enumerate() {
        if *value != 0 {
            println!("  [{:#06x}] = {value}", word * 4);
        }
    }

    sim.stats().print();
    Ok(())
}
