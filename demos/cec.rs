//! Checks two ripple-carry adder implementations for equivalence.
//!
//! Run with:
//! ```bash
//! cargo run --example cec -- --width 8
//! cargo run --example cec -- --width 8 --fault 3 --split-var 6
//! ```

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::eyre;

use simcec::cec::{simulation_cec_with_config, CecConfig, SimulationCecStats};
use simcec::gate::Gate;
use simcec::network::{LogicNetwork, Network};
use simcec::signal::Signal;

#[derive(Parser, Debug)]
#[command(about = "Simulation-based equivalence checking of two adders")]
struct Cli {
    /// Adder width in bits (the networks get twice as many inputs).
    #[arg(short, long, default_value_t = 8)]
    width: usize,

    /// Drop the propagate term from the carry out of this bit in the second adder.
    #[arg(short, long)]
    fault: Option<usize>,

    /// Number of simulated inputs per round (default: memory heuristic).
    #[arg(short, long)]
    split_var: Option<u32>,

    /// Give up when more rounds would be needed.
    #[arg(long)]
    max_rounds: Option<u64>,

    /// Write the second adder as a DOT file.
    #[arg(long)]
    dot: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn adder_maj(width: usize) -> Network {
    let (mut network, x) = Network::with_inputs(2 * width);
    let (a, b) = x.split_at(width);
    let mut carry = Signal::zero();
    for i in 0..width {
        let sum = network.add_gate(Gate::xor3(a[i], b[i], carry));
        carry = network.maj(a[i], b[i], carry);
        network.add_output(sum);
    }
    network.add_output(carry);
    network
}

fn adder_aig(width: usize, fault: Option<usize>) -> Network {
    let (mut network, x) = Network::with_inputs(2 * width);
    let (a, b) = x.split_at(width);
    let mut carry = Signal::zero();
    for i in 0..width {
        let half = network.xor(a[i], b[i]);
        let sum = network.xor(half, carry);
        let generate = network.and(a[i], b[i]);
        carry = if fault == Some(i) {
            generate
        } else {
            let propagate = network.and(half, carry);
            network.or(generate, propagate)
        };
        network.add_output(sum);
    }
    network.add_output(carry);
    network
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let level = if cli.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    if cli.width == 0 {
        return Err(eyre!("width must be positive"));
    }
    if let Some(fault) = cli.fault {
        if fault >= cli.width {
            return Err(eyre!("fault bit {} is outside a {}-bit adder", fault, cli.width));
        }
    }

    let a = adder_maj(cli.width);
    let b = adder_aig(cli.width, cli.fault);
    println!(
        "a: {} inputs, {} outputs, {} gates",
        a.num_pis(),
        a.num_pos(),
        a.num_gates()
    );
    println!(
        "b: {} inputs, {} outputs, {} gates",
        b.num_pis(),
        b.num_pos(),
        b.num_gates()
    );

    if let Some(path) = &cli.dot {
        std::fs::write(path, b.to_dot()?)?;
        println!("DOT in {:?}", path);
    }

    let config = CecConfig {
        split_var: cli.split_var,
        max_rounds: cli.max_rounds,
        ..CecConfig::default()
    };
    let mut stats = SimulationCecStats::default();
    let time = std::time::Instant::now();
    let outcome = simulation_cec_with_config(&a, &b, &config, Some(&mut stats));
    let elapsed = time.elapsed();

    println!("result: {}", outcome);
    println!("split_var = {}", stats.split_var);
    println!("rounds = {} ({} simulated)", stats.rounds, stats.rounds_simulated);
    println!("time: {:.3} s", elapsed.as_secs_f64());

    Ok(())
}
