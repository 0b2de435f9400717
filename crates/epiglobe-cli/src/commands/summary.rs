//! Summary command - global figures for one disease.

use colored::Colorize;
use epiglobe::DataStatus;

use super::{Options, block_on, format_number, load_target};

pub fn run(
    options: &Options,
    disease: String,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let snapshot = block_on(load_target(&epiglobe, &disease))??;

    if json_output {
        let summary = serde_json::json!({
            "disease": snapshot.disease.id,
            "status": snapshot.status,
            "summary": snapshot.summary,
            "labels": snapshot.summary.labels(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} {}",
        snapshot.disease.name.cyan().bold(),
        format!("({})", snapshot.disease.category.label()).dimmed()
    );
    println!();

    if let DataStatus::Unavailable { reason } = &snapshot.status {
        println!("{} {}", "Data unavailable:".red().bold(), reason);
        return Ok(());
    }

    let summary = &snapshot.summary;
    let labels = summary.labels();
    println!(
        "  {:<26} {}",
        labels.primary,
        format_number(summary.primary_total).white().bold()
    );
    for (label, metric) in [
        (labels.secondary, summary.secondary_metric),
        (labels.tertiary, summary.tertiary_metric),
    ] {
        let shown = match metric.value() {
            Some(v) => format_number(v).white().to_string(),
            None => "N/A".dimmed().to_string(),
        };
        println!("  {:<26} {}", label, shown);
    }
    println!(
        "  {:<26} {}",
        "Countries reporting",
        summary.affected_country_count.to_string().green()
    );

    if !summary.extras.is_empty() {
        println!();
        for (key, value) in &summary.extras {
            println!("  {:<26} {}", key, format_number(*value as f64));
        }
    }
    Ok(())
}
