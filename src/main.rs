//! Expands the lookout monitor's node list into Home Assistant config.
//!
//! Reads `config.yaml` and writes `cards.yaml` (dashboard layout) and
//! `hass.yaml` (MQTT sensor definitions), fully overwriting both. Every
//! failure is fatal to the run; a document already written before a
//! later failure stays on disk.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use lookout_confgen::{cards, sensors, Config};

#[derive(Parser)]
#[command(name = "lookout-confgen")]
#[command(about = "Generate dashboard cards and MQTT sensor definitions from the lookout node list")]
struct Cli {
    /// Node list to expand
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Dashboard-card document destination
    #[arg(long, default_value = "cards.yaml")]
    cards: PathBuf,

    /// Sensor-definition document destination
    #[arg(long, default_value = "hass.yaml")]
    sensors: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => {
            println!("All files generated successfully!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config).context("loading config")?;

    cards::write(&config.nodes, &cli.cards)
        .with_context(|| format!("generating {}", cli.cards.display()))?;
    println!("Generated {} successfully", cli.cards.display());

    sensors::write(&config.nodes, &cli.sensors)
        .with_context(|| format!("generating {}", cli.sensors.display()))?;
    println!("Generated {} successfully", cli.sensors.display());

    Ok(())
}
