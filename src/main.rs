use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schedsim::{PolicyKind, SimConfig, config::DEFAULT_LOG_FILTER, sim::trace};

/// Replay a job trace through a CPU scheduling policy and record when each
/// job completes.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version)]
struct Args {
    /// Trace file, one `id, arrival, job time` record per line
    trace_file: PathBuf,

    /// Where to write `id, completion time` records
    out_file: PathBuf,

    /// Scheduling policy
    #[arg(value_enum, ignore_case = true)]
    scheduler: PolicyKind,

    /// Keep completion order instead of sorting the output by job id
    #[arg(long)]
    no_sort: bool,

    /// Print turnaround statistics after the run
    #[arg(long)]
    stats: bool,

    /// Log filter used when RUST_LOG is unset (e.g. "schedsim=debug")
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = SimConfig::new(args.trace_file, args.out_file, args.scheduler)
        .with_sort_output(!args.no_sort)
        .with_log_filter(args.log);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    match trace::run_trace(&config) {
        Ok(report) => {
            let summary = report.summary();
            tracing::info!(
                policy = %report.policy,
                jobs = summary.jobs,
                mean_turnaround = summary.mean_turnaround,
                "Run complete"
            );
            if args.stats {
                println!("{summary}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("schedsim: {err}");
            ExitCode::FAILURE
        }
    }
}
