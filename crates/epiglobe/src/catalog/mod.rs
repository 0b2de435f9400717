//! Static catalog of trackable diseases.
//!
//! Each entry names where its data comes from and which aggregation policy
//! applies. The policy is fixed when the entry is defined, so adding a new
//! indicator never depends on matching its code at runtime.

mod disease;

pub use disease::{Catalog, DataSource, Disease, DiseaseCategory, MetricLabels};
