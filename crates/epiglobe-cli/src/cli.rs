//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Epiglobe: disease data for the globe dashboard
#[derive(Parser)]
#[command(name = "epiglobe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fetch through a proxy gateway (e.g. http://localhost:3002/api)
    #[arg(long, global = true)]
    pub gateway: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Serve built-in sample data instead of calling any API
    #[arg(long, global = true)]
    pub mock: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the diseases in the catalog
    Diseases {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the global summary for a disease
    Summary {
        /// Disease id (e.g. "hiv") or WHO indicator code
        #[arg(value_name = "DISEASE")]
        disease: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List per-country values for a disease
    Countries {
        /// Disease id (e.g. "tuberculosis") or WHO indicator code
        #[arg(value_name = "DISEASE")]
        disease: String,

        /// Show only the N highest values
        #[arg(long)]
        top: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show one country's recent history
    Country {
        /// 2- or 3-letter country code
        #[arg(value_name = "CODE")]
        code: String,

        /// Number of days of history
        #[arg(short, long)]
        days: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare several countries side by side
    Compare {
        /// Country codes (up to 5)
        #[arg(value_name = "CODE", required = true, num_args = 1..)]
        codes: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List WHO indicators
    Indicators {
        /// Case-insensitive filter on code or name
        #[arg(short, long)]
        search: Option<String>,

        /// Maximum entries to show
        #[arg(short, long, default_value = "25")]
        limit: usize,
    },

    /// Run the proxy gateway
    Serve {
        /// Port for the HTTP server
        #[arg(short, long, default_value = "3002")]
        port: u16,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_compare_requires_codes() {
        assert!(Cli::try_parse_from(["epiglobe", "compare"]).is_err());
        let cli = Cli::try_parse_from(["epiglobe", "--mock", "compare", "US", "FR"]).unwrap();
        assert!(cli.mock);
        match cli.command {
            Commands::Compare { codes, .. } => assert_eq!(codes, vec!["US", "FR"]),
            _ => panic!("expected compare"),
        }
    }
}
