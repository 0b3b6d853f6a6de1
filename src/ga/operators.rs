//! Bit-chromosome genetic operators.
//!
//! These operate on `&[bool]` gene slices and know nothing about items or
//! capacity; fitness is re-evaluated by the population afterwards.
//!
//! # Crossover
//!
//! - [`draw_cut_points`]: two ordered cut points in `[0, n]`
//! - [`two_point_crossover`]: splice the segment between the cut points
//!   from a second parent into a copy of the first
//!
//! # Mutation
//!
//! - [`bit_flip_mutation`]: independent per-gene flips

use rand::Rng;

/// How many times equal cut points are redrawn before a zero-width segment
/// is accepted.
pub const MAX_CUT_POINT_REDRAWS: usize = 2;

// ============================================================================
// Crossover
// ============================================================================

/// Draws two cut points uniformly from `[0, chromosome_length]` and returns
/// them ordered.
///
/// Equal points are redrawn up to [`MAX_CUT_POINT_REDRAWS`] times; after
/// that the (possibly degenerate) pair is used as is.
pub fn draw_cut_points<R: Rng>(chromosome_length: usize, rng: &mut R) -> (usize, usize) {
    let mut first = rng.random_range(0..=chromosome_length);
    let mut second = rng.random_range(0..=chromosome_length);
    for _ in 0..MAX_CUT_POINT_REDRAWS {
        if first != second {
            break;
        }
        first = rng.random_range(0..=chromosome_length);
        second = rng.random_range(0..=chromosome_length);
    }
    if first <= second {
        (first, second)
    } else {
        (second, first)
    }
}

/// Two-point crossover.
///
/// Gene `g` of the child comes from `parent1` when `g <= first` or
/// `g >= second`, and from `parent2` when `first < g < second`.
///
/// # Panics
/// Panics if the parents differ in length or `first > second`.
///
/// # Examples
///
/// ```
/// use knapsack_ga::ga::operators::two_point_crossover;
///
/// let p1 = [false; 5];
/// let p2 = [true; 5];
/// let child = two_point_crossover(&p1, &p2, (1, 3));
/// assert_eq!(child, vec![false, false, true, false, false]);
/// ```
pub fn two_point_crossover(
    parent1: &[bool],
    parent2: &[bool],
    (first, second): (usize, usize),
) -> Vec<bool> {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(first <= second, "cut points must be ordered");

    parent1
        .iter()
        .zip(parent2)
        .enumerate()
        .map(|(g, (&a, &b))| if g > first && g < second { b } else { a })
        .collect()
}

// ============================================================================
// Mutation
// ============================================================================

/// Flips each gene independently with probability `rate`.
///
/// Returns the number of flipped genes.
pub fn bit_flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) -> usize {
    let mut flipped = 0;
    for gene in genes.iter_mut() {
        if rng.random_range(0.0..1.0) < rate {
            *gene = !*gene;
            flipped += 1;
        }
    }
    flipped
}

// ============================================================================
// Tests
// ============================================================================
