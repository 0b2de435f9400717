//! Countries command - per-country values for one disease.

use std::path::PathBuf;

use colored::Colorize;
use epiglobe::{DataStatus, NormalizedCountryMetric};

use super::{Options, block_on, format_number, load_target};
use crate::cli::OutputFormat;

pub fn run(
    options: &Options,
    disease: String,
    top: Option<usize>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let epiglobe = options.epiglobe()?;
    let snapshot = block_on(load_target(&epiglobe, &disease))??;

    if let DataStatus::Unavailable { reason } = &snapshot.status {
        return Err(format!("No data for {}: {}", snapshot.disease.id, reason).into());
    }

    let mut metrics = snapshot.metrics;
    if let Some(n) = top {
        metrics.sort_by(|a, b| b.value.total_cmp(&a.value));
        metrics.truncate(n);
    }

    match (format, output) {
        (OutputFormat::Csv, Some(path)) => {
            epiglobe::export::export_csv(&metrics, &path)?;
            println!("Wrote {} countries to {}", metrics.len(), path.display());
        }
        (OutputFormat::Csv, None) => {
            epiglobe::export::write_csv(&metrics, std::io::stdout().lock())?;
        }
        (OutputFormat::Json, Some(path)) => {
            let file = std::fs::File::create(&path)?;
            serde_json::to_writer_pretty(file, &metrics)?;
            println!("Wrote {} countries to {}", metrics.len(), path.display());
        }
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        (OutputFormat::Table, Some(_)) => {
            return Err("Table output cannot be written to a file; use --format csv or json".into());
        }
        (OutputFormat::Table, None) => print_table(&snapshot.disease.name, &metrics),
    }
    Ok(())
}

fn print_table(name: &str, metrics: &[NormalizedCountryMetric]) {
    println!(
        "{} {}",
        name.cyan().bold(),
        format!("({} countries)", metrics.len()).dimmed()
    );
    println!();
    println!(
        "  {:<5} {:<32} {:>16} {:>8}",
        "Code".bold(),
        "Country".bold(),
        "Value".bold(),
        "As of".bold()
    );
    for metric in metrics {
        println!(
            "  {:<5} {:<32} {:>16} {:>8}",
            metric.country_code,
            truncate(&metric.display_name, 32),
            format_number(metric.value),
            metric.as_of
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export_with_top() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tb.csv");
        let options = Options {
            mock: true,
            ..Default::default()
        };

        run(
            &options,
            "tuberculosis".to_string(),
            Some(2),
            OutputFormat::Csv,
            Some(path.clone()),
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ZAF,"));
        assert!(lines[2].starts_with("IND,"));
    }

    #[test]
    fn test_table_to_file_rejected() {
        let options = Options {
            mock: true,
            ..Default::default()
        };
        let result = run(
            &options,
            "hiv".to_string(),
            None,
            OutputFormat::Table,
            Some(PathBuf::from("out.txt")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("France", 10), "France");
        assert_eq!(truncate("Democratic Republic", 5), "Demo…");
    }
}
