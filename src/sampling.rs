//! Index selection for bounding render payloads
//!
//! Random selection is always without replacement and always returns exactly
//! `min(amount, length)` distinct indices; which generator drives it does not
//! matter.

use rand::Rng;
use tracing::debug;

/// Picks `min(amount, length)` distinct indices from `0..length`, sorted ascending
#[must_use]
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, length: usize, amount: usize) -> Vec<usize> {
    let amount = amount.min(length);
    let mut indices = rand::seq::index::sample(rng, length, amount).into_vec();
    indices.sort_unstable();
    debug!(length, amount, "sampled indices without replacement");
    indices
}

/// `count` evenly spaced positions over `0..length`, rounded to the nearest index.
///
/// The first and last index are always included when `count >= 2`; a count of 1
/// yields `[0]`. `count` is clamped to `length`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn evenly_spaced(length: usize, count: usize) -> Vec<usize> {
    let count = count.min(length);
    match count {
        0 => Vec::new(),
        1 => vec![0],
        _ => {
            let last = (length - 1) as f64;
            let step = last / (count - 1) as f64;
            (0..count)
                .map(|i| ((i as f64 * step).round() as usize).min(length - 1))
                .collect()
        }
    }
}

/// Largest `side` with `side * side <= n`
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn square_side(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side > 0 && side * side > n {
        side -= 1;
    }
    while (side + 1) * (side + 1) <= n {
        side += 1;
    }
    side
}
