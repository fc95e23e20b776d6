use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use pixel_pal::engine::RngEntropy;
use pixel_pal::simulate::Simulation;
use pixel_pal::session::watch_summaries;
use pixel_pal::{load_config, PalConfig, PalError, Session};

#[derive(Parser, Debug)]
#[command(name = "pixel-pal", version, about = "A needy terminal pet")]
struct Cli {
    /// Config file (TOML or JSON); defaults to the platform config dir
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for lightning and particles
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Write logs here (the TUI discards them otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Info-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the pet in the terminal (default)
    Run,
    /// Run a live session headless, printing each change as JSON
    Watch,
    /// Replay the engine over virtual time, printing each change as JSON
    Simulate {
        /// Stop sampling after this many virtual milliseconds
        #[arg(long, default_value_t = 60_000)]
        until: u64,
        /// Sampler period in virtual milliseconds
        #[arg(long, default_value_t = 500)]
        step: u64,
        /// Give attention at these virtual times (repeatable)
        #[arg(long = "interact-at")]
        interact_at: Vec<u64>,
        /// Also spawn particles
        #[arg(long)]
        particles: bool,
    },
}

fn init_logging(cli: &Cli, log_file: Option<&PathBuf>, to_stderr: bool) -> anyhow::Result<()> {
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // The TUI owns the terminal, so it only logs to a file
    let writer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if to_stderr => BoxMakeWriter::new(io::stderr),
        None => BoxMakeWriter::new(io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn emit<T: serde::Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Headless live session; prints whenever something other than particle
/// churn changes, until the pet breaks or Ctrl-C.
async fn watch(config: &PalConfig) -> anyhow::Result<()> {
    let handle = Session::spawn(
        config.session_options(),
        Box::new(RngEntropy::from_seed_option(config.seed)),
    );
    let mut stdout = io::stdout().lock();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
        result = watch_summaries(handle.signals(), |signals| emit(&mut stdout, signals)) => {
            let emitted = result?;
            tracing::info!(emitted, "watch finished");
        }
    }

    handle.shutdown().await;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.log_file.is_some() {
        config.log_file.clone_from(&cli.log_file);
    }

    let interactive = matches!(cli.command, None | Some(Command::Run));
    init_logging(&cli, config.log_file.as_ref(), !interactive)?;
    tracing::info!("Starting pixel-pal version {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        None | Some(Command::Run) => pixel_pal::tui::run(&config)
            .await
            .map_err(|e| PalError::terminal(format!("{e:?}")).into()),
        Some(Command::Watch) => watch(&config).await,
        Some(Command::Simulate {
            until,
            step,
            interact_at,
            particles,
        }) => {
            let simulation = Simulation {
                until_ms: until,
                step_ms: step,
                interactions: interact_at,
                particles,
            };
            let mut entropy = RngEntropy::from_seed_option(config.seed);
            let mut stdout = io::stdout().lock();
            for step in simulation.run(&mut entropy) {
                emit(&mut stdout, &step)?;
            }
            Ok(())
        }
    }
}
