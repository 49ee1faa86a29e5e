//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use eventfinder_core::Query;

/// eventfinder - Find events near a place across several listing providers
#[derive(Debug, Parser)]
#[command(name = "eventfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "EVENTFINDER_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Fail instead of falling back to rules when the reasoning service
    /// is unavailable
    #[arg(long, env = "ROUTER_REQUIRE_OPENAI", global = true)]
    pub strict: bool,

    /// Reasoning model override
    #[arg(long, env = "OPENAI_ROUTER_MODEL", global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for events
    Search(SearchArgs),

    /// List registered providers
    Providers,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of the `search` command.
#[derive(Debug, Clone, Default, Args)]
pub struct SearchArgs {
    /// City or free-form location
    #[arg(long, short, default_value = "")]
    pub location: String,

    /// Start of the date range (e.g. 2026-02-01 or 2026-02-01T18:00)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End of the date range
    #[arg(long)]
    pub end_date: Option<String>,

    /// Event type hint (concert, sports, theater, festival, ...)
    #[arg(long)]
    pub event_type: Option<String>,

    /// Category hint (music, arts, food, ...)
    #[arg(long)]
    pub category: Option<String>,

    /// Lowest acceptable price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest acceptable price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Latitude (requires --lon)
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude (requires --lat)
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Search radius around the coordinates, in miles
    #[arg(long, requires = "lat")]
    pub radius: Option<f64>,

    // --- Output format flags ---
    /// Output `{events, total}` as JSON
    #[arg(long, group = "output_format")]
    pub json: bool,

    /// Output the full fusion result (routing, per-provider results, errors)
    #[arg(long, group = "output_format")]
    pub debug_view: bool,
}

impl SearchArgs {
    /// Builds the query described by the arguments.
    pub fn to_query(&self) -> Query {
        Query {
            location: self.location.trim().to_string(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            event_type: self.event_type.clone(),
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            lat: self.lat,
            lon: self.lon,
            radius: self.radius,
        }
    }

    /// Returns the selected output format.
    pub fn output_format(&self) -> OutputFormat {
        if self.debug_view {
            OutputFormat::Debug
        } else if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable listing.
    Text,
    /// `{events, total}`.
    Json,
    /// The whole fusion result.
    Debug,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn search_arguments() {
        let cli = parse(&[
            "eventfinder",
            "search",
            "--location",
            "Los Angeles",
            "--start-date",
            "2026-02-01T00:00",
            "--event-type",
            "concert",
            "--max-price",
            "80",
            "--json",
        ]);

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.output_format(), OutputFormat::Json);

        let query = args.to_query();
        assert_eq!(query.location, "Los Angeles");
        assert_eq!(query.start_date.as_deref(), Some("2026-02-01T00:00"));
        assert_eq!(query.event_type.as_deref(), Some("concert"));
        assert_eq!(query.max_price, Some(80.0));
        assert_eq!(query.min_price, None);
    }

    #[test]
    fn coordinates_need_both_parts() {
        assert!(Cli::try_parse_from(["eventfinder", "search", "--lat", "34.05"]).is_err());

        let cli = parse(&[
            "eventfinder", "search", "--lat", "34.05", "--lon", "-118.25", "--radius", "10",
        ]);
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.to_query().coordinates(), Some((34.05, -118.25)));
        assert_eq!(args.output_format(), OutputFormat::Text);
    }

    #[test]
    fn output_flags_are_exclusive() {
        assert!(
            Cli::try_parse_from(["eventfinder", "search", "-l", "Austin", "--json", "--debug-view"])
                .is_err()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["eventfinder", "providers", "--strict", "--model", "gpt-4.1"]);
        assert!(cli.strict);
        assert_eq!(cli.model.as_deref(), Some("gpt-4.1"));
        assert!(matches!(cli.command, Command::Providers));
    }

    #[test]
    fn config_actions() {
        let cli = parse(&["eventfinder", "config", "path"]);
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Path
            }
        ));
    }
}
