use std::convert::TryFrom;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::Text;

use weather_core::{
    Config, ExecutionMode, FetchOrchestrator, Field, SortDirection, format,
    provider::provider_from_config, sort_records,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Batch weather table CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Display extra diagnostic output.
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Fetch weather for a list of places and print a sorted table.
    Show {
        /// Place names; when omitted, read interactively one per line.
        places: Vec<String>,

        /// Fetch one place at a time with a pause between requests,
        /// instead of concurrent fan-out.
        #[arg(long)]
        sequential: bool,

        /// Field to sort the table by.
        #[arg(long, default_value = "place")]
        sort: String,

        /// Sort in descending order.
        #[arg(long)]
        desc: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                places,
                sequential,
                sort,
                desc,
            } => show(places, sequential, &sort, desc).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Text::new("OpenWeatherMap API key:").prompt()?;
    config.set_api_key(api_key.trim().to_owned());
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(places: Vec<String>, sequential: bool, sort: &str, desc: bool) -> Result<()> {
    // Configuration problems are fatal before any fetch begins.
    let field = Field::try_from(sort)?;
    let direction = if desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let mode = if sequential {
        ExecutionMode::Sequential
    } else {
        ExecutionMode::Concurrent
    };

    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let places = if places.is_empty() {
        read_places_interactively()?
    } else {
        normalize_places(places)
    };

    if places.is_empty() {
        println!("No places entered, exiting.");
        return Ok(());
    }

    let orchestrator = FetchOrchestrator::new(Arc::new(provider), mode);
    let mut records = orchestrator.fetch_all(&places).await;

    sort_records(&mut records, field, direction);

    println!("{}", format::header());
    for record in &records {
        println!("{}", format::format_record(record));
    }

    Ok(())
}

/// Prompt for place names one per line; a blank line ends the list.
fn read_places_interactively() -> Result<Vec<String>> {
    println!("Enter places (one per line, blank line to end):");

    let mut places = Vec::new();
    loop {
        let line = Text::new(">").prompt()?;
        let place = line.trim();
        if place.is_empty() {
            break;
        }
        places.push(place.to_owned());
    }

    Ok(places)
}

/// Trim place names and drop blank entries so they never reach the fetch
/// layer.
fn normalize_places(places: Vec<String>) -> Vec<String> {
    places
        .into_iter()
        .map(|p| p.trim().to_owned())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_drops_blank_places() {
        let places = normalize_places(vec![
            "  London ".into(),
            "".into(),
            "   ".into(),
            "Oslo".into(),
        ]);

        assert_eq!(places, vec!["London".to_string(), "Oslo".to_string()]);
    }

    #[test]
    fn cli_parses_show_flags() {
        let cli = Cli::parse_from([
            "weather", "show", "--sequential", "--sort", "temperature", "--desc", "London",
        ]);

        match cli.command {
            Command::Show {
                places,
                sequential,
                sort,
                desc,
            } => {
                assert_eq!(places, vec!["London".to_string()]);
                assert!(sequential);
                assert_eq!(sort, "temperature");
                assert!(desc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_defaults_to_concurrent_place_ascending() {
        let cli = Cli::parse_from(["weather", "show", "London"]);

        match cli.command {
            Command::Show {
                sequential,
                sort,
                desc,
                ..
            } => {
                assert!(!sequential);
                assert_eq!(sort, "place");
                assert!(!desc);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
