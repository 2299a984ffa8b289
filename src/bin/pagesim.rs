//! pagesim - Main Entry Point
//!
//! Usage: pagesim [OPTIONS] <TRACE> <FRAMES> <POLICY> [MODE]
//!
//! Arguments:
//!   TRACE   - Trace file, one `<hex address> <R|W>` per line
//!   FRAMES  - Number of physical frames
//!   POLICY  - clock, lru or rand
//!   MODE    - quiet (default) or debug
//!
//! Options:
//!   --seed <SEED>  Seed for the random policy
//!   -h, --help     Print help information

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use pagesim::common::config::MAX_FRAMES;
use pagesim::mmu::PolicyKind;
use pagesim::trace::read_trace;
use pagesim::{Result, Simulation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum Mode {
    #[default]
    Quiet,
    Debug,
}

/// Simulates page replacement over a memory reference trace.
#[derive(Debug, Parser)]
#[command(name = "pagesim", version)]
struct Cli {
    /// Trace file, one `<hex address> <R|W>` per line
    trace: PathBuf,

    /// Number of physical frames
    #[arg(value_parser = clap::value_parser!(u64).range(1..=MAX_FRAMES as u64))]
    frames: u64,

    /// Replacement policy: clock, lru or rand
    policy: PolicyKind,

    /// Print every hit, fault and eviction to stderr
    #[arg(value_enum, default_value_t = Mode::Quiet)]
    mode: Mode,

    /// Seed for the random policy (default: OS entropy)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let trace = read_trace(&cli.trace)?;

    let frames = cli.frames as usize;
    let mut mmu = match cli.seed {
        Some(seed) => cli.policy.build_seeded(frames, seed)?,
        None => cli.policy.build(frames)?,
    };
    if cli.mode == Mode::Debug {
        mmu.set_debug();
    }

    let mut sim = Simulation::new(mmu);
    sim.run(&trace);

    println!("{}", sim.report());
    Ok(())
}
