//! Disease entries and the built-in catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Upstream source of a disease's per-country data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Live outbreak aggregator (`/global` + `/countries`).
    LiveOutbreak,
    /// WHO GHO indicator, fetched from `/who/data/{code}`.
    WhoIndicator { code: String },
}

impl DataSource {
    /// Indicator code, if this is a WHO source.
    pub fn indicator_code(&self) -> Option<&str> {
        match self {
            DataSource::WhoIndicator { code } => Some(code),
            DataSource::LiveOutbreak => None,
        }
    }
}

/// Aggregation policy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseCategory {
    /// Percentage of a population reached by an intervention.
    Coverage,
    /// Absolute case or event counts.
    Incidence,
    /// Source publishes its own global totals.
    LiveOutbreak,
    /// Anything else; aggregated like incidence.
    Unclassified,
}

impl Default for DiseaseCategory {
    fn default() -> Self {
        DiseaseCategory::Unclassified
    }
}

/// Display labels for the three summary metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricLabels {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub tertiary: &'static str,
}

impl DiseaseCategory {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            DiseaseCategory::Coverage => "Coverage",
            DiseaseCategory::Incidence => "Incidence",
            DiseaseCategory::LiveOutbreak => "Live outbreak",
            DiseaseCategory::Unclassified => "Unclassified",
        }
    }

    /// Labels for the summary metrics under this category's policy.
    pub fn metric_labels(&self) -> MetricLabels {
        match self {
            DiseaseCategory::Coverage => MetricLabels {
                primary: "Estimated people reached",
                secondary: "Highest country estimate",
                tertiary: "Average per country",
            },
            DiseaseCategory::LiveOutbreak => MetricLabels {
                primary: "Total cases",
                secondary: "Total deaths",
                tertiary: "Total recovered",
            },
            DiseaseCategory::Incidence | DiseaseCategory::Unclassified => MetricLabels {
                primary: "Total reported",
                secondary: "Highest country value",
                tertiary: "Average per country",
            },
        }
    }
}

/// One trackable condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub id: String,
    pub name: String,
    pub description: String,
    pub source: DataSource,
    pub category: DiseaseCategory,
    /// Hex colour used for the globe layer.
    pub color: String,
}

impl Disease {
    /// WHO indicator disease.
    pub fn who(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        category: DiseaseCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            source: DataSource::WhoIndicator { code: code.into() },
            category,
            color: "#64748b".to_string(),
        }
    }

    /// Ad hoc entry for an indicator code that has no catalog entry.
    pub fn adhoc_indicator(code: &str) -> Self {
        Self::who(code.to_lowercase(), code, code, DiseaseCategory::Unclassified)
            .with_description(format!("WHO indicator {}", code))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Ordered collection of diseases keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    diseases: IndexMap<String, Disease>,
}

impl Catalog {
    /// Empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the dashboard.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert(Disease {
            id: "covid-19".to_string(),
            name: "COVID-19".to_string(),
            description: "Coronavirus Disease 2019".to_string(),
            source: DataSource::LiveOutbreak,
            category: DiseaseCategory::LiveOutbreak,
            color: "#ef4444".to_string(),
        });
        catalog.insert(
            Disease::who("meningitis", "Meningitis", "MENING_2", DiseaseCategory::Incidence)
                .with_description("Meningitis suspected cases")
                .with_color("#f59e0b"),
        );
        catalog.insert(
            Disease::who("hiv", "HIV/AIDS", "HIV_ARTCOVERAGE", DiseaseCategory::Coverage)
                .with_description("HIV antiretroviral therapy coverage")
                .with_color("#8b5cf6"),
        );
        catalog.insert(
            Disease::who("tuberculosis", "Tuberculosis", "TB_1", DiseaseCategory::Incidence)
                .with_description("Estimated TB incidence")
                .with_color("#10b981"),
        );
        catalog.insert(
            Disease::who(
                "leptospirosis",
                "Leptospirosis",
                "LEPTO_MORTALITY",
                DiseaseCategory::Incidence,
            )
            .with_description("Estimated leptospirosis deaths")
            .with_color("#84cc16"),
        );
        catalog.insert(
            Disease::who("hepatitis", "Hepatitis B", "WHS4_543", DiseaseCategory::Unclassified)
                .with_description("Hepatitis B surface antigen prevalence")
                .with_color("#f97316"),
        );
        catalog.insert(
            Disease::who("measles", "Measles", "WHS4_544", DiseaseCategory::Coverage)
                .with_description("Measles vaccination coverage")
                .with_color("#ec4899"),
        );
        catalog
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, disease: Disease) {
        self.diseases.insert(disease.id.clone(), disease);
    }

    /// Look up by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&Disease> {
        self.diseases.get(id).or_else(|| {
            let lower = id.to_lowercase();
            self.diseases.get(&lower)
        })
    }

    /// Entry whose WHO indicator code matches `code`.
    pub fn find_by_indicator(&self, code: &str) -> Option<&Disease> {
        self.diseases.values().find(|d| {
            d.source
                .indicator_code()
                .is_some_and(|c| c.eq_ignore_ascii_case(code))
        })
    }

    /// Entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Disease> {
        self.diseases.values()
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }
}
