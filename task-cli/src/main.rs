use clap::Parser;
use task_cli::cli::{self, Cli};
use task_cli::config::Config;
use task_cli::{JsonStore, Tracker};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let mut config = Config::load()?;
    if let Some(file) = args.file {
        config.file = file;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.level()?)
        .init();
    let store = JsonStore::open(&config.file)?;
    debug!("Using task file {}", store.path().display());
    let mut tracker = Tracker::new(store)?;
    cli::run(
        args.command,
        &mut tracker,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
}
