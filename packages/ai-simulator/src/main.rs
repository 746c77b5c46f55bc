//! AI Simulator CLI - plays complete Mighty games between configurable agents.
//!
//! Games run entirely in memory. Each seat is an ISMCTS searcher, the
//! heuristic policy, or a random player; results go to a JSONL/JSON file plus
//! a CSV summary, and a per-seat summary is printed at the end.

mod metrics;
mod output;
mod simulator;
mod types;

use clap::Parser;
use metrics::{build_game_metrics, Summary};
use mighty_engine::domain::rules::PLAYERS;
use output::OutputWriter;
use simulator::{AgentSettings, Simulator};
use std::time::Instant;
use tracing::{info, warn};
use types::{AgentKind, OutputFormat};

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "In-memory Mighty simulator for evaluating agents")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Agent for all seats (shortcut to set all 5 seats to the same agent)
    #[arg(long, conflicts_with_all = ["seat0", "seat1", "seat2", "seat3", "seat4"])]
    seats: Option<AgentKind>,

    /// Agent for seat 0
    #[arg(long, default_value = "ismcts")]
    seat0: AgentKind,

    /// Agent for seat 1
    #[arg(long, default_value = "heuristic")]
    seat1: AgentKind,

    /// Agent for seat 2
    #[arg(long, default_value = "heuristic")]
    seat2: AgentKind,

    /// Agent for seat 3
    #[arg(long, default_value = "heuristic")]
    seat3: AgentKind,

    /// Agent for seat 4
    #[arg(long, default_value = "heuristic")]
    seat4: AgentKind,

    /// ISMCTS iterations per decision
    #[arg(long, default_value = "500")]
    iterations: u64,

    /// ISMCTS worker threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// Playout policy used inside ISMCTS
    #[arg(long, default_value = "random")]
    rollout_policy: String,

    /// Base seed; dealing and agent seeds derive from it
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the per-game output with gzip
    #[arg(long)]
    compress: bool,
}

impl Args {
    fn line_up(&self) -> [AgentKind; PLAYERS] {
        match self.seats {
            Some(kind) => [kind; PLAYERS],
            None => [self.seat0, self.seat1, self.seat2, self.seat3, self.seat4],
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Quiet by default: only warnings and errors
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let line_up = args.line_up();
    let base_seed = args.seed.unwrap_or_else(rand::random);
    info!(games = args.games, base_seed, ?line_up, "Starting AI simulator");

    let simulator = Simulator::new(
        line_up,
        AgentSettings {
            iterations: args.iterations,
            threads: args.threads,
            rollout_policy: args.rollout_policy.clone(),
        },
        base_seed,
    );
    let mut output_writer =
        OutputWriter::new(&args.output_dir, args.output_format.clone(), args.compress)?;

    let start = Instant::now();
    let mut summary = Summary::default();

    for game_no in 1..=args.games {
        let game_start = Instant::now();
        match simulator.play_game(game_no) {
            Ok(record) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let metrics = build_game_metrics(&record, line_up, duration_ms);
                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!(game_no, error = %e, "Failed to write game metrics");
                }
                info!(game_no, payouts = ?record.payouts, "Game completed");
                summary.record(&record);
            }
            Err(e) => {
                summary.errors += 1;
                warn!(game_no, error = %e, "Game failed");
            }
        }
    }

    let elapsed = start.elapsed();
    let (games_path, csv_path) = output_writer.output_paths();
    let (games_path, csv_path) = (games_path.clone(), csv_path.clone());
    output_writer.finish()?;

    println!("Results written to: {}", games_path.display());
    println!("Summary CSV written to: {}", csv_path.display());
    print_summary(&summary, &line_up, elapsed, args.games);

    Ok(())
}

fn print_summary(
    summary: &Summary,
    line_up: &[AgentKind; PLAYERS],
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", summary.games, total);
    if summary.errors > 0 {
        println!("Errors: {}", summary.errors);
    }
    println!("Redeals: {}", summary.redeals);
    if summary.fallbacks > 0 {
        println!("Search fallbacks: {}", summary.fallbacks);
    }
    println!("Total time: {elapsed:?}");
    if summary.games > 0 {
        println!("Average time per game: {:?}", elapsed / summary.games);
    }

    match summary.declarer_success_rate() {
        Some(rate) => println!(
            "Declarer success: {}/{} ({rate:.1}%)",
            summary.contracts_made, summary.contracts
        ),
        None => println!("Declarer success: no contracts played"),
    }

    println!("\n=== Results by Seat ===");
    for (seat, kind) in line_up.iter().enumerate() {
        let (declared, made) = summary.declared[seat];
        println!(
            "Seat {seat} ({}): avg={:+.2}, declared={declared}, made={made}",
            kind.name(),
            summary.average_payout(seat),
        );
    }
}
