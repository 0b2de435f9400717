//! Country reference table: code → name, flag and coordinates.
//!
//! The table is filled once from the live outbreak country list and then
//! only grows. Codes the list does not know resolve to a synthetic entry
//! built from the embedded tables, so a lookup never fails.

mod table;
pub mod tables;

pub use table::{CountryReference, CountryReferenceTable, ReferenceStatus, fallback_flag_url};
