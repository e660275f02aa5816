use anyhow::Result;
use barmon::app::{create_monitor, describe_monitors, RunPlan};
use barmon::config::AppConfig;
use barmon_core::MonitorRunner;
use clap::Parser;
use log::{error, info, warn};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug, Clone)]
#[command(name = "barmon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Config file to read instead of the default location
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Update rate in tenths of a second
    #[arg(short = 'r', long = "rate", value_name = "TENTHS")]
    rate: Option<u64>,

    /// List available monitors and their options
    #[arg(short = 'l', long = "list")]
    list_monitors: bool,

    /// Monitor to run
    #[arg(value_name = "MONITOR", required_unless_present = "list_monitors")]
    monitor: Option<String>,

    /// Monitor options, e.g. -- -t "<total>" -H 80
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting barmon v{}", env!("CARGO_PKG_VERSION"));

    barmon_sources::register_all();

    if cli.list_monitors {
        print!("{}", describe_monitors());
        return;
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("barmon: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }),
    };

    let id = cli
        .monitor
        .ok_or_else(|| anyhow::anyhow!("no monitor given"))?;
    let monitor = create_monitor(&id)?;
    let plan = RunPlan::resolve(
        &config,
        &id,
        cli.rate,
        &cli.args,
        monitor.metadata().default_interval,
    );
    info!("Running {} every {:?} with {:?}", plan.id, plan.interval, plan.args);

    let runner = MonitorRunner::new(Arc::from(monitor), plan.interval);
    let stdout = std::io::stdout();

    tokio::select! {
        _ = runner.run(&plan.args, |line| {
            let mut out = stdout.lock();
            if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
                error!("Failed to write output: {}", e);
            }
        }) => {}
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}
