//! Global summaries over normalized metrics.
//!
//! The policy is picked from the disease's [`DiseaseCategory`](crate::catalog::DiseaseCategory),
//! never inferred from the data.

mod summary;

pub use summary::{GlobalSummary, MetricValue, aggregate, from_live};
