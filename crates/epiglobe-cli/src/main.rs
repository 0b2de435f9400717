//! Epiglobe CLI - disease data for the globe dashboard.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Options;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = Options {
        gateway: cli.gateway,
        timeout: cli.timeout,
        mock: cli.mock,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Diseases { json } => commands::diseases::run(&options, json),

        Commands::Summary { disease, json } => commands::summary::run(&options, disease, json),

        Commands::Countries {
            disease,
            top,
            format,
            output,
        } => commands::countries::run(&options, disease, top, format, output),

        Commands::Country { code, days, json } => {
            commands::country::run(&options, code, days, json)
        }

        Commands::Compare { codes, json } => commands::compare::run(&options, codes, json),

        Commands::Indicators { search, limit } => {
            commands::indicators::run(&options, search, limit)
        }

        Commands::Serve { port } => commands::serve::run(&options, port),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose {
        "epiglobe=debug,epiglobe_cli=debug,tower_http=debug"
    } else {
        "epiglobe=warn,epiglobe_cli=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
