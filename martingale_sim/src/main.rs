use clap::Parser;
use martingale_sim::prelude::*;

/// Monte-Carlo simulator for a martingale betting strategy played against a
/// simplified blackjack table.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Starting bankroll in whole currency units
    #[arg(long, default_value_t = 1000)]
    starting_bankroll: u64,

    /// Base bet, also the amount the wager resets to after a win
    #[arg(long, default_value_t = 10)]
    base_bet: u64,

    /// Ceiling on martingale bet escalation
    #[arg(long, default_value_t = 500)]
    max_bet: u64,

    /// Number of independent bankroll lifetimes to simulate
    #[arg(long, default_value_t = 100)]
    num_simulations: u32,

    /// Fixed base seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the aggregate report as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let mut builder = SimulatorConfig::new();
    builder
        .starting_bankroll(args.starting_bankroll)
        .base_bet(args.base_bet)
        .max_bet(args.max_bet)
        .num_simulations(args.num_simulations);
    if let Some(seed) = args.seed {
        builder.seed(seed);
    }
    let config = builder.build();

    if !args.json {
        println!("\nRunning simulations...");
    }

    let results = match Simulator::new(config).run() {
        Ok(results) => results,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let report = AggregateReport::from_results(&config, &results);
    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{report}");
    }
}
