/// Harmonic - terminal player for the Harmonic Archive catalog
use anyhow::Context;
use clap::Parser;
use harmonic_cli::{load_catalog, run, CliConfig, Session};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "harmonic")]
#[command(about = "Play the Harmonic Archive catalog from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./harmonic.toml if present)
    #[arg(short, long, env = "HARMONIC_CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Catalog export (JSON) to load
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Fixed shuffle seed
    #[arg(long)]
    seed: Option<u64>,

    /// Initial volume (0.0-1.0)
    #[arg(long)]
    volume: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(catalog) = cli.catalog {
        config.catalog = Some(catalog);
    }
    if let Some(seed) = cli.seed {
        config.playback.shuffle_seed = Some(seed);
    }
    if let Some(volume) = cli.volume {
        config.playback.volume = volume;
    }
    config.validate().context("invalid configuration")?;

    // Logs go to stderr; stdout belongs to the session
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let catalog_path = config
        .catalog
        .clone()
        .context("no catalog given; pass --catalog or set `catalog` in harmonic.toml")?;
    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    tracing::info!("Loaded catalog from {}", catalog_path.display());

    let mut session = Session::new(
        catalog,
        config.playback.clone(),
        Duration::from_millis(config.device.time_update_ms),
        Duration::from_secs(config.device.fallback_duration_secs),
    )?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "harmonic - type `help` for commands")?;
    run(&mut session, stdin.lock(), &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
