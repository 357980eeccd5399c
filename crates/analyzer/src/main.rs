//! Gatetime CLI
//!
//! Characterize worst-case rise/fall propagation delays of a NAND-only
//! ripple-carry adder by exhaustive transition-pair simulation.
//!
//! # Example
//!
//! ```bash
//! # Reference measurement: 4-bit adder, unit delays, monitor S3 and COUT
//! gatetime
//!
//! # Wider adder with 2-tick gates, parallel search, JSON output
//! gatetime --width 5 --gate-delay 2 --parallel --json
//! ```

use clap::Parser;
use gatetime_netlist::ripple_carry_adder;
use gatetime_search::{DelayReport, SearchConfig, TransitionExtreme, TransitionSearch};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Worst-case propagation-delay analyzer.
///
/// Exhaustively simulates every ordered pair of distinct input vectors of
/// a NAND-only ripple-carry adder and reports the worst rise and fall
/// delay of the most significant sum bit and the carry out, with the
/// vector pairs that produce them. Deterministic: the same arguments
/// always print the same report.
#[derive(Parser, Debug)]
#[command(name = "gatetime")]
#[command(version, about, long_about = None)]
struct Args {
    /// Adder width in bits
    #[arg(short = 'w', long, default_value = "4")]
    width: usize,

    /// Propagation delay of every gate, in ticks
    #[arg(short = 'd', long, default_value = "1")]
    gate_delay: u64,

    /// Parallelize the pair search across CPU cores
    #[arg(long)]
    parallel: bool,

    /// Per-pair event budget (combinational-cycle watchdog)
    #[arg(long)]
    event_budget: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gatetime=info,gatetime_search=info")),
        )
        .init();

    let args = Args::parse();
    if args.width == 0 {
        return Err("adder width must be at least 1".into());
    }

    let adder = ripple_carry_adder(args.width, args.gate_delay)?;
    let monitored = [adder.last_sum(), adder.carry_out];
    info!(
        width = args.width,
        gates = adder.netlist.gate_count(),
        inputs = adder.inputs.len(),
        gate_delay = args.gate_delay,
        "built ripple-carry adder"
    );

    let mut config = SearchConfig::default();
    if let Some(budget) = args.event_budget {
        config.event_budget = budget;
    }
    let search =
        TransitionSearch::new(&adder.netlist, &adder.inputs, &monitored).with_config(config);

    let report = if args.parallel {
        search.run_parallel()?
    } else {
        search.run()?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &DelayReport) {
    for output in &report.outputs {
        print_extreme(&output.name, "rise", &output.rise);
        print_extreme(&output.name, "fall", &output.fall);
    }
    println!(
        "({} pairs, {} events)",
        report.pairs_evaluated, report.events_processed
    );
}

fn print_extreme(name: &str, direction: &str, extreme: &TransitionExtreme) {
    match &extreme.witness {
        Some(witness) => println!(
            "Max {direction} {name}: {} ticks  (vectors {} -> {})",
            extreme.delay, witness.old, witness.new
        ),
        None => println!("Max {direction} {name}: no transition found"),
    }
}
