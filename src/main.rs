//! Rewardweb main entry point

use anyhow::Context;
use clap::Parser;
use rewardweb_api::start_server;
use rewardweb_config::{Config, SourceKind};
use rewardweb_core::RewardsStore;
use rewardweb_source::{JsonFileSource, SampleSource, SourceRef};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "rewardweb")]
#[command(author = "Rewardweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Customer rewards program dashboard", long_about = None)]
struct Args {
    /// Configuration file path [default: config.yaml, if present]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Serve generated sample transactions instead of the configured source
    #[arg(long)]
    sample: bool,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None if PathBuf::from(DEFAULT_CONFIG).exists() => PathBuf::from(DEFAULT_CONFIG),
        None => return Ok(Config::default()),
    };

    Config::load(&path).map_err(|e| {
        eprintln!("error[{}]: {}", e.code(), e);
        for suggestion in e.suggestions() {
            eprintln!("  help: {}", suggestion);
        }
        anyhow::Error::new(e).context(format!("Failed to load configuration from {}", path.display()))
    })
}

fn build_source(config: &Config) -> SourceRef {
    match config.data.source {
        SourceKind::File => Arc::new(JsonFileSource::new(config.data.path.clone())),
        SourceKind::Sample => Arc::new(SampleSource::new(
            config.data.sample_seed,
            config.data.sample_size,
            chrono::Local::now().date_naive(),
        )),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let mut config = load_config(&args)?;
    if args.sample {
        config.data.source = SourceKind::Sample;
    }

    // RUST_LOG wins over the configured level
    let level = config.log_level().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    log::info!(
        "Config loaded: source={}, path={}, totals_mode={:?}",
        config.data.source,
        config.data.path.display(),
        config.rewards.totals_mode
    );

    let rt = Runtime::new().context("Failed to start the async runtime")?;

    rt.block_on(async {
        let source = build_source(&config);
        log::info!("Reading transactions from {}", source.describe());

        let store = RewardsStore::new(config.clone(), source).shared();

        let initial = Arc::clone(&store);
        tokio::spawn(async move {
            match RewardsStore::refresh(&initial).await {
                Ok(_) => log::info!("Initial load finished"),
                Err(e) => log::error!("Initial load failed: {}", e),
            }
        });

        start_server(config, store).await
    })?;

    Ok(())
}
