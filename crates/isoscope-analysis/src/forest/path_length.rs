//! Expected path length of an unsuccessful BST search, `c(n)`.
//!
//! `c(n) = 2H(n-1) - 2(n-1)/n` with `H(i) ≈ ln(i) + γ`.
//! Used for the leaf adjustment and as the score normalizer.

use isoscope_core::constants::EULER_GAMMA;

/// Harmonic number approximation `H(i) = ln(i) + γ`.
#[inline]
pub fn harmonic(i: f64) -> f64 {
    i.ln() + EULER_GAMMA
}

/// `c(n)`: 0 for n ≤ 1, 1 for n = 2, `2H(n-1) - 2(n-1)/n` otherwise.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * harmonic(n - 1.0) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Depth bound for trees grown on `subsample_size` observations:
/// `ceil(log2(s))`, computed in integers.
pub fn height_limit(subsample_size: usize) -> usize {
    if subsample_size <= 1 {
        return 0;
    }
    (usize::BITS - (subsample_size - 1).leading_zeros()) as usize
}
