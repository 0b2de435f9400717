//! Diseases command - list the catalog.

use colored::Colorize;

use super::Options;

pub fn run(options: &Options, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let catalog = epiglobe.catalog();

    if json_output {
        let diseases: Vec<_> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&diseases)?);
        return Ok(());
    }

    println!("{}", "Diseases:".cyan().bold());
    println!();
    for disease in catalog.iter() {
        let source = disease.source.indicator_code().unwrap_or("live");
        println!(
            "  {:<14} {:<14} {:<16} {}",
            disease.id.white().bold(),
            disease.name,
            source.dimmed(),
            disease.category.label().yellow()
        );
        if options.verbose && !disease.description.is_empty() {
            println!("  {:<14} {}", "", disease.description.dimmed());
        }
    }
    Ok(())
}
