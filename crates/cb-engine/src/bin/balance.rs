use std::io::Read;
use std::path::Path;

use anyhow::Context;
use cb_engine::{Balancer, BalancerConfig};
use cb_types::{Outcome, PlayerRecord};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "CB_BALANCER_CONFIG";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(std::env::var(CONFIG_ENV).ok())?;

    let outcome = match roster_path(std::env::args().nth(1)) {
        Some(path) => {
            let file = std::fs::File::open(&path)
                .with_context(|| format!("failed to read roster from {path}"))?;
            run(file, config)?
        }
        None => run(std::io::stdin().lock(), config)?,
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Config from the file at `path`, or defaults when no path is given.
fn load_config(path: Option<String>) -> anyhow::Result<BalancerConfig> {
    match path {
        Some(path) => BalancerConfig::load(Path::new(&path))
            .with_context(|| format!("failed to load balancer config from {path}")),
        None => Ok(BalancerConfig::default()),
    }
}

/// `None` means read the roster from stdin.
fn roster_path(arg: Option<String>) -> Option<String> {
    arg.filter(|arg| arg != "-")
}

fn run(mut reader: impl Read, config: BalancerConfig) -> anyhow::Result<Outcome> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .context("failed to read roster")?;

    let roster: Vec<PlayerRecord> =
        serde_json::from_str(&input).context("roster must be a JSON array of player records")?;
    info!("Loaded {} player records", roster.len());

    Ok(Balancer::new(config).balance(&roster)?)
}
