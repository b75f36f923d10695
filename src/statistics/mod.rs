//! Summary statistics over whole arrays
//!
//! This module computes the info-panel statistics (min, max, mean, standard
//! deviation) with parallel scans, and the fixed-bin histogram counts used to
//! draw histogram payloads.
//!
//! # Organization
//!
//! - [`operations`]: statistic names and the [`SummaryStats`] record
//! - [`parallel`]: rayon-backed full-array scans
//! - [`histogram`]: equal-width bin counting

pub mod histogram;
pub mod operations;
pub mod parallel;

pub use histogram::{histogram, Histogram};
pub use operations::{Scalar, StatOperation, Summarize, SummaryStats};
pub use parallel::{parallel_extremes, parallel_mean, parallel_std, Extremum};
