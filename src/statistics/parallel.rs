//! Parallel computation implementations for statistical operations
//!
//! Each scan visits every element once on the rayon pool. NaN propagates: a
//! single NaN element makes the statistic NaN.
//!
//! Extremes are found in the element's own type so that 64-bit integers are
//! reported exactly; mean and standard deviation run over `f64`.

use ndarray::parallel::prelude::*;
use ndarray::ArrayViewD;

/// Element types whose smallest and largest values can be scanned for
pub trait Extremum: Copy + Send + Sync {
    #[must_use]
    fn lesser(self, other: Self) -> Self;
    #[must_use]
    fn greater(self, other: Self) -> Self;
}

macro_rules! ordered_extremum {
    ($($t:ty),*) => {$(
        impl Extremum for $t {
            fn lesser(self, other: Self) -> Self {
                Ord::min(self, other)
            }

            fn greater(self, other: Self) -> Self {
                Ord::max(self, other)
            }
        }
    )*};
}

macro_rules! float_extremum {
    ($($t:ty),*) => {$(
        impl Extremum for $t {
            fn lesser(self, other: Self) -> Self {
                if self.is_nan() || other.is_nan() {
                    <$t>::NAN
                } else {
                    self.min(other)
                }
            }

            fn greater(self, other: Self) -> Self {
                if self.is_nan() || other.is_nan() {
                    <$t>::NAN
                } else {
                    self.max(other)
                }
            }
        }
    )*};
}

ordered_extremum!(i64, u64, bool);
float_extremum!(f32, f64);

/// Smallest and largest element, `None` for an empty array
#[must_use]
pub fn parallel_extremes<A: Extremum>(values: ArrayViewD<'_, A>) -> Option<(A, A)> {
    values
        .into_par_iter()
        .map(|&v| (v, v))
        .reduce_with(|(lo, hi), (other_lo, other_hi)| (lo.lesser(other_lo), hi.greater(other_hi)))
}

/// Arithmetic mean, `None` for an empty array
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parallel_mean(values: ArrayViewD<'_, f64>) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    let sum: f64 = values.into_par_iter().copied().sum();
    Some(sum / count as f64)
}

/// Population standard deviation (ddof = 0) around a precomputed mean
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parallel_std(values: ArrayViewD<'_, f64>, mean: f64) -> Option<f64> {
    let count = values.len();
    if count == 0 {
        return None;
    }
    let squared: f64 = values
        .into_par_iter()
        .map(|&v| (v - mean).powi(2))
        .sum();
    Some((squared / count as f64).sqrt())
}
