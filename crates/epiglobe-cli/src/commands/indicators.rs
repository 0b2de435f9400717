//! Indicators command - browse the WHO indicator catalog.

use colored::Colorize;

use super::{Options, block_on};

pub fn run(
    options: &Options,
    search: Option<String>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let indicators = block_on(epiglobe.indicators())??;

    let matching: Vec<_> = indicators
        .iter()
        .filter(|i| search.as_deref().is_none_or(|q| i.matches(q)))
        .collect();

    println!(
        "{} {}",
        "WHO indicators".cyan().bold(),
        format!("({} of {})", matching.len().min(limit), matching.len()).dimmed()
    );
    println!();
    for indicator in matching.iter().take(limit) {
        let tracked = epiglobe
            .catalog()
            .find_by_indicator(&indicator.code)
            .map(|d| format!(" [{}]", d.id).green().to_string())
            .unwrap_or_default();
        println!(
            "  {:<24} {}{}",
            indicator.code.white().bold(),
            indicator.name,
            tracked
        );
    }
    Ok(())
}
