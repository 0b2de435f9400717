//! API request handlers.

mod dashboard;
mod proxy;

pub use dashboard::*;
pub use proxy::*;
