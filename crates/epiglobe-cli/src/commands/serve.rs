//! Serve command - run the proxy gateway.

use colored::Colorize;
use epiglobe::{ApiEndpoints, HttpDiseaseApi};
use tracing::warn;

use super::{Options, block_on};
use crate::server::{app, state::AppState};

pub fn run(options: &Options, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = options.config();
    if matches!(config.endpoints, ApiEndpoints::Gateway { .. }) {
        // The gateway must talk to the upstream APIs, not to itself.
        warn!("Ignoring gateway URL for serve; using upstream APIs directly");
        config.endpoints = ApiEndpoints::default();
    }

    let epiglobe = options.epiglobe_with(config.clone())?;
    let state = if options.mock {
        AppState::new(epiglobe)
    } else {
        AppState::with_upstream(epiglobe, HttpDiseaseApi::new(&config)?)
    };

    let url = format!("http://localhost:{}/api", port);
    println!();
    println!(
        "{} {}",
        "Starting gateway at".cyan().bold(),
        url.white().bold()
    );
    if options.mock {
        println!("  Serving {}", "sample data".yellow());
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    block_on(app::run_server(state, port))?
}
