//! Country command - one country's recent history.

use colored::Colorize;

use super::{Options, block_on, format_number};

pub fn run(
    options: &Options,
    code: String,
    days: Option<u32>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let days = days.unwrap_or(epiglobe.config().history_days);
    let history = block_on(epiglobe.country_history_days(&code, days))??;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    println!(
        "{} {}",
        history.country.display_name.cyan().bold(),
        format!("({}, last {} days)", history.country.code, days).dimmed()
    );
    println!();

    let Some(latest) = history.latest() else {
        println!("{}", "No history available".yellow());
        return Ok(());
    };

    println!("  Cases:     {}", format_number(latest.cases as f64).white().bold());
    println!("  Deaths:    {}", format_number(latest.deaths as f64).red());
    println!("  Recovered: {}", format_number(latest.recovered as f64).green());
    println!("  As of:     {}", latest.date);
    println!();

    println!("{}", "New cases per day:".yellow().bold());
    let daily = history.daily_new_cases();
    let peak = daily.iter().map(|(_, n)| *n).max().unwrap_or(0).max(1);
    for (date, new_cases) in daily {
        let width = ((new_cases as f64 / peak as f64) * 30.0).round() as usize;
        println!(
            "  {}  {:>10}  {}",
            date,
            format_number(new_cases as f64),
            "█".repeat(width).cyan()
        );
    }
    Ok(())
}
