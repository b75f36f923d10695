//! Core statistical operations and traits
//!
//! This module defines the statistics reported for an array and the rules for
//! when each one is present.

use super::parallel::{parallel_extremes, parallel_mean, parallel_std, Extremum};
use crate::archive::ArrayData;
use ndarray::ArrayViewD;
use serde::Serialize;
use std::fmt;

/// Supported summary statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatOperation {
    /// Smallest element
    Min,
    /// Largest element
    Max,
    /// Arithmetic mean
    Mean,
    /// Population standard deviation
    StdDev,
}

impl StatOperation {
    /// All statistics in info-panel order
    pub const ALL: [Self; 4] = [Self::Min, Self::Max, Self::Mean, Self::StdDev];

    /// Get the string representation of the operation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "minimum",
            Self::Max => "maximum",
            Self::Mean => "mean",
            Self::StdDev => "standard deviation",
        }
    }

    /// Label used in the info panel
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Min => "Min",
            Self::Max => "Max",
            Self::Mean => "Mean",
            Self::StdDev => "Std Dev",
        }
    }
}

/// Exact element value reported as a minimum or maximum
///
/// Holds the element in its stored type so the info panel prints the same
/// text as the table and the CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
}

impl Scalar {
    /// Numeric value; exact except for integers beyond 2^53
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::UInt(v) => v as f64,
            Self::Float32(v) => f64::from(v),
            Self::Float64(v) => v,
            Self::Bool(v) => f64::from(u8::from(v)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Statistics of one array
///
/// `min`/`max` are present only for non-empty arrays and `mean`/`std_dev`
/// only when there are at least two elements. Absent means "not reported",
/// never zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SummaryStats {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
}

impl SummaryStats {
    /// Value of one statistic, if reported
    #[must_use]
    pub fn get(&self, operation: StatOperation) -> Option<Scalar> {
        match operation {
            StatOperation::Min => self.min,
            StatOperation::Max => self.max,
            StatOperation::Mean => self.mean.map(Scalar::Float64),
            StatOperation::StdDev => self.std_dev.map(Scalar::Float64),
        }
    }
}

/// Trait for arrays that can be summarized in one pass set
pub trait Summarize {
    fn summarize(&self) -> SummaryStats;
}

fn extremes(data: &ArrayData) -> Option<(Scalar, Scalar)> {
    fn wrap<A: Extremum>(
        values: ArrayViewD<'_, A>,
        to_scalar: fn(A) -> Scalar,
    ) -> Option<(Scalar, Scalar)> {
        parallel_extremes(values).map(|(lo, hi)| (to_scalar(lo), to_scalar(hi)))
    }

    match data {
        ArrayData::Int(a) => wrap(a.view(), Scalar::Int),
        ArrayData::UInt(a) => wrap(a.view(), Scalar::UInt),
        ArrayData::Float32(a) => wrap(a.view(), Scalar::Float32),
        ArrayData::Float64(a) => wrap(a.view(), Scalar::Float64),
        ArrayData::Bool(a) => wrap(a.view(), Scalar::Bool),
    }
}

impl Summarize for ArrayData {
    fn summarize(&self) -> SummaryStats {
        let count = self.len();
        if count == 0 {
            return SummaryStats::default();
        }

        let (min, max) = extremes(self).unzip();
        let mut stats = SummaryStats {
            count,
            min,
            max,
            ..SummaryStats::default()
        };

        if count > 1 {
            let values = self.values();
            stats.mean = parallel_mean(values.view());
            stats.std_dev = stats
                .mean
                .and_then(|mean| parallel_std(values.view(), mean));
        }

        stats
    }
}
