//! Compare command - several countries side by side.

use colored::Colorize;

use super::{Options, block_on, format_number};

pub fn run(
    options: &Options,
    codes: Vec<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let entries = block_on(epiglobe.compare(&codes))??;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No data for any of the requested countries".yellow());
        return Ok(());
    }

    println!("{}", "Country comparison".cyan().bold());
    println!();
    println!(
        "  {:<28} {:>16} {:>14} {:>16} {:>14}",
        "Country".bold(),
        "Cases".bold(),
        "Deaths".bold(),
        "Recovered".bold(),
        "New (period)".bold()
    );
    for entry in &entries {
        let period_new: u64 = entry.history.daily_new_cases().iter().map(|(_, n)| n).sum();
        println!(
            "  {:<28} {:>16} {:>14} {:>16} {:>14}",
            entry.history.country.display_name,
            format_number(entry.cases as f64),
            format_number(entry.deaths as f64).red(),
            format_number(entry.recovered as f64).green(),
            format_number(period_new as f64)
        );
    }

    if entries.len() < codes.len() {
        println!();
        println!(
            "{} {} of {} countries had no history",
            "Note:".yellow(),
            codes.len() - entries.len(),
            codes.len()
        );
    }
    Ok(())
}
