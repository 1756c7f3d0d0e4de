//! Throws data aggregation.
//!
//! Pure functions from a [`Dataset`](crate::dataset::Dataset) and a
//! [`FilterState`](crate::filter::FilterState) to chart-ready summaries:
//! per-color and per-parade bead totals, throw item totals, and winners.
//! Nothing is cached; every call recomputes from the dataset.

pub mod colors;
pub mod items;
pub mod parades;
pub mod types;
pub mod utility;
pub mod winner;
