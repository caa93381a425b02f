use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cpusched_core::{simulate, Algorithm, Process, SimulationResult, Ticks};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Quantum used for round robin when none is given.
const DEFAULT_QUANTUM: Ticks = 2;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a process set under one algorithm
    Run {
        /// JSON file holding `[{ "id", "arrivalTime", "burstTime", "priority" }]`
        file: PathBuf,

        /// fcfs, sjf, srtf, priority or rr
        #[arg(short, long, default_value = "fcfs")]
        algorithm: Algorithm,

        /// Round robin time quantum
        #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
        quantum: Ticks,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate a process set under every algorithm and compare the averages
    Compare {
        file: PathBuf,

        #[arg(short, long, default_value_t = DEFAULT_QUANTUM)]
        quantum: Ticks,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            algorithm,
            quantum,
            json,
        } => {
            let processes = load_processes(&file)?;
            let result = simulate(&processes, algorithm, quantum_for(algorithm, quantum))
                .with_context(|| format!("{} simulation failed", algorithm.name()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", algorithm.name());
                print_report(&result);
            }
        }
        Commands::Compare { file, quantum } => {
            let processes = load_processes(&file)?;

            println!(
                "{:<32} {:>9} {:>11} {:>9}",
                "Algorithm", "Waiting", "Turnaround", "Response"
            );
            for algorithm in Algorithm::ALL {
                let result = simulate(&processes, algorithm, quantum_for(algorithm, quantum))
                    .with_context(|| format!("{} simulation failed", algorithm.name()))?;
                println!(
                    "{:<32} {:>9.2} {:>11.2} {:>9.2}",
                    algorithm.name(),
                    result.avg_waiting,
                    result.avg_turnaround,
                    result.avg_response
                );
            }
        }
    }

    Ok(())
}

fn quantum_for(algorithm: Algorithm, quantum: Ticks) -> Option<Ticks> {
    algorithm.needs_quantum().then_some(quantum)
}

fn load_processes(path: &Path) -> Result<Vec<Process>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let processes: Vec<Process> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!("loaded {} processes from {:?}", processes.len(), path);
    Ok(processes)
}

fn print_report(result: &SimulationResult) {
    println!("\nGantt chart:");
    for segment in &result.segments {
        let owner = match segment.process_id {
            Some(id) => id.to_string(),
            None => "idle".to_string(),
        };
        println!(
            "  [{:>4}, {:>4})  {}",
            segment.start_time,
            segment.end_time(),
            owner
        );
    }

    println!(
        "\n{:>4} {:>7} {:>5} {:>8} {:>5} {:>6} {:>7} {:>10} {:>8}",
        "ID", "Arrival", "Burst", "Priority", "Start", "Finish", "Waiting", "Turnaround", "Response"
    );
    for stats in &result.process_stats {
        println!(
            "{:>4} {:>7} {:>5} {:>8} {:>5} {:>6} {:>7} {:>10} {:>8}",
            stats.id.to_string(),
            stats.arrival_time,
            stats.burst_time,
            stats.priority,
            stats.start_time,
            stats.finish_time,
            stats.waiting_time,
            stats.turnaround_time,
            stats.response_time
        );
    }

    println!("\nTotal time:              {}", result.total_time);
    println!("Idle time:               {}", result.idle_time());
    println!("Average waiting time:    {:.2}", result.avg_waiting);
    println!("Average turnaround time: {:.2}", result.avg_turnaround);
    println!("Average response time:   {:.2}", result.avg_response);
}
