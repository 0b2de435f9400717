//! Upstream disease data sources.
//!
//! The pipeline talks to a [`DiseaseApi`]; the HTTP implementation speaks to
//! either the proxy gateway or the upstream APIs directly, and the mock
//! serves canned data for tests and offline demos.
//!
//! # Example
//!
//! ```no_run
//! use epiglobe::{DiseaseApi, EpiglobeConfig, HttpDiseaseApi};
//!
//! # async fn example() -> epiglobe::Result<()> {
//! let api = HttpDiseaseApi::new(&EpiglobeConfig::from_env())?;
//! let global = api.global().await?;
//! println!("{} cases worldwide", global.cases);
//! # Ok(())
//! # }
//! ```

mod api;
mod http;
mod mock;

pub use api::{DiseaseApi, Endpoint};
pub use http::HttpDiseaseApi;
pub use mock::MockDiseaseApi;
