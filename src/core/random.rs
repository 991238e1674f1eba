//! Uniform random permutations
//!
//! Fisher-Yates (Durstenfeld) shuffle over a copy of the input: a single
//! backwards pass swapping each position with a uniformly chosen position at
//! or before it. Every one of the n! orderings is equally likely and the pass
//! always terminates.

use rand::Rng;

/// A uniformly shuffled copy of `array`, using the thread-local RNG
pub fn shuffle<T: Clone>(array: &[T]) -> Vec<T> {
    shuffle_with(array, &mut rand::rng())
}

/// A uniformly shuffled copy of `array`, drawing from `rng`
///
/// A seeded RNG makes the permutation reproducible.
pub fn shuffle_with<T, R>(array: &[T], rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng,
{
    let mut output = array.to_vec();
    shuffle_in_place(&mut output, rng);
    output
}

/// Shuffle a slice in place
pub fn shuffle_in_place<T, R>(slice: &mut [T], rng: &mut R)
where
    R: Rng,
{
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}
