//! Ordering and splitting helpers for paired data
//!
//! A dataset here is two equal-length sequences where `x_data[i]` is paired
//! with `y_data[i]`. Nothing in this module copies feature vectors; elements
//! are moved through the shuffle.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle two paired sequences so the pairing is maintained.
///
/// The permutation is drawn uniformly from the caller's RNG, so a seeded
/// `StdRng` gives a reproducible order.
///
/// # Panics
/// Panics if the sequences have different lengths.
pub fn randomise_order<X, Y, R: Rng + ?Sized>(
    x_data: Vec<X>,
    y_data: Vec<Y>,
    rng: &mut R,
) -> (Vec<X>, Vec<Y>) {
    assert_eq!(
        x_data.len(),
        y_data.len(),
        "x_data and y_data must be the same length"
    );

    let mut pairs: Vec<(X, Y)> = x_data.into_iter().zip(y_data).collect();
    pairs.shuffle(rng);
    pairs.into_iter().unzip()
}

/// Floor-truncated cut point between training and validation partitions.
///
/// Records `[0, ind)` go to training and `[ind, len)` to validation. The cut
/// is pure index arithmetic; any randomization must happen before the split.
pub fn split_index(len: usize, split: f64) -> usize {
    ((split * len as f64).floor() as usize).min(len)
}
