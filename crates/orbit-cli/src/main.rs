use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "orbit", version, about = "Orbit agenda CLI")]
struct Cli {
    /// Config file to use instead of ~/.config/orbit/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the agenda from a snapshot of local, calendar and task items
    Agenda(commands::agenda::AgendaArgs),
    /// Find the next free slot
    Slot(commands::slot::SlotArgs),
    /// Detect dates in text and optionally export them as .ics
    Capture(commands::capture::CaptureArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let config_path = cli.config;
    let result = match cli.command {
        Commands::Agenda(args) => commands::agenda::run(args, config_path.as_deref()),
        Commands::Slot(args) => commands::slot::run(args, config_path.as_deref()),
        Commands::Capture(args) => commands::capture::run(args),
        Commands::Config { action } => commands::config::run(action, config_path.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default warn level.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("orbit=warn,orbit_core=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
