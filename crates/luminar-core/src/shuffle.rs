//! Uniform word-order shuffling.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle `items` in place with a uniform Fisher–Yates shuffle.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
