//! CLI command implementations.

pub mod compare;
pub mod countries;
pub mod country;
pub mod diseases;
pub mod indicators;
pub mod serve;
pub mod summary;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use epiglobe::{DiseaseSnapshot, Epiglobe, EpiglobeConfig, EpiglobeError, MockDiseaseApi};

/// Global flags shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub gateway: Option<String>,
    pub timeout: Option<u64>,
    pub mock: bool,
    pub verbose: bool,
}

impl Options {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> EpiglobeConfig {
        let mut config = EpiglobeConfig::from_env();
        if let Some(gateway) = &self.gateway {
            config = config.with_gateway(gateway.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Build the pipeline, over sample data when `--mock` is set.
    pub fn epiglobe(&self) -> Result<Epiglobe, EpiglobeError> {
        self.epiglobe_with(self.config())
    }

    pub fn epiglobe_with(&self, config: EpiglobeConfig) -> Result<Epiglobe, EpiglobeError> {
        if self.mock {
            Ok(Epiglobe::new(Arc::new(MockDiseaseApi::sample()), config))
        } else {
            Epiglobe::from_config(config)
        }
    }
}

/// Run `future` to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}

/// Load a catalog disease, or treat an uppercase code as a WHO indicator.
pub async fn load_target(
    epiglobe: &Epiglobe,
    target: &str,
) -> Result<DiseaseSnapshot, EpiglobeError> {
    if epiglobe.catalog().get(target).is_none() && looks_like_indicator(target) {
        return Ok(epiglobe.load_indicator(target).await);
    }
    epiglobe.load_disease(target).await
}

fn looks_like_indicator(target: &str) -> bool {
    !target.is_empty()
        && target
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Whole number with thousands separators; fractional values keep two decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() != 0.0 && value.abs() < 1_000.0 {
        return format!("{:.2}", value);
    }

    let rounded = value.round().abs() as u64;
    let digits = rounded.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(2.5), "2.50");
        assert_eq!(format_number(-1_000.0), "-1,000");
    }

    #[test]
    fn test_indicator_detection() {
        assert!(looks_like_indicator("WHS4_544"));
        assert!(!looks_like_indicator("hiv"));
        assert!(!looks_like_indicator(""));
    }

    #[test]
    fn test_mock_pipeline_loads() {
        let options = Options {
            mock: true,
            ..Default::default()
        };
        let epiglobe = options.epiglobe().unwrap();
        let snapshot = block_on(load_target(&epiglobe, "WHS4_544")).unwrap().unwrap();
        assert_eq!(snapshot.disease.id, "measles");
    }
}
