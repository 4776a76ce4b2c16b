//! Start simplex and order vector (component G, spec §4.4).
//!
//! The reference algorithm seeds its order vector's pseudo-random
//! coefficients from whatever the C runtime's default `rand()` state
//! happens to be — deterministic within one run, not reproducible across
//! builds or platforms (§9 Open Questions). Here the seed is explicit:
//! callers pass one in, and the same seed always yields the same order
//! vector.

use crate::generators::GeneratorSet;
use crate::matrix::{rank_destructive, submatrix};
use crate::ring::IntegerRing;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Select `dim` linearly independent generators to seed the facet pool
/// with. Greedy: scan generators in order, keep one iff adding it
/// increases the running rank.
pub fn choose_start_simplex<R, T>(ring: &R, dim: usize, generators: &GeneratorSet<T>) -> Option<Vec<usize>>
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let mut chosen = Vec::with_capacity(dim);
    let mut rank_so_far = 0usize;
    for i in 0..generators.len() {
        if rank_so_far == dim {
            break;
        }
        let mut trial = chosen.clone();
        trial.push(i);
        let mut rows = submatrix(generators.rows(), &trial);
        let rank = rank_destructive(ring, &mut rows);
        if rank > rank_so_far {
            chosen.push(i);
            rank_so_far = rank;
        }
    }
    if rank_so_far == dim {
        Some(chosen)
    } else {
        None
    }
}

/// An integer linear combination of the start simplex's generators with
/// pseudo-random odd positive coefficients (§4.4). Coefficients are drawn
/// from `[1, 2*bound)` and forced odd so the order vector can never be
/// accidentally orthogonal to a coordinate axis the way an even
/// coefficient set might be.
pub fn order_vector<T>(dim: usize, start_simplex: &[Vec<T>], seed: u64, coeff_bound: i64) -> Vec<i64>
where
    T: Clone + Into<i64>,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = vec![0i64; dim];
    for row in start_simplex {
        let mut c = rng.gen_range(1..coeff_bound.max(2));
        if c % 2 == 0 {
            c += 1;
        }
        for (o, x) in out.iter_mut().zip(row.iter()) {
            *o += c * Into::<i64>::into(x.clone());
        }
    }
    out
}

/// `true` iff `hyp` is "excluded" from partial triangulation: its normal
/// satisfies `normal · order_vector <= 0`, with a deterministic
/// lexicographic tie-break among normals that dot to exactly zero (§4.4).
pub fn is_excluded(hyp: &[i64], order_vec: &[i64]) -> bool {
    let dp: i64 = hyp.iter().zip(order_vec.iter()).map(|(a, b)| a * b).sum();
    match dp.cmp(&0) {
        std::cmp::Ordering::Less => true,
        std::cmp::Ordering::Greater => false,
        std::cmp::Ordering::Equal => {
            // lexicographic tie-break: excluded iff the first nonzero
            // entry of `hyp` is negative.
            hyp.iter().find(|&&x| x != 0).map(|&x| x < 0).unwrap_or(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn choose_start_simplex_on_cube_picks_three_independent_rows() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]];
        let gens = GeneratorSet::new(&ring, 3, raw).unwrap();
        let chosen = choose_start_simplex(&ring, 3, &gens).unwrap();
        assert_eq!(chosen.len(), 3);
        assert_eq!(chosen, vec![0, 1, 2]);
    }

    #[test]
    fn order_vector_is_deterministic_for_fixed_seed() {
        let rows = vec![vec![1i64, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        let a = order_vector(3, &rows, 42, 1000);
        let b = order_vector(3, &rows, 42, 1000);
        assert_eq!(a, b);
    }

    #[test]
    fn order_vector_differs_across_seeds_with_high_probability() {
        let rows = vec![vec![1i64, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        let a = order_vector(3, &rows, 1, 1000);
        let b = order_vector(3, &rows, 2, 1000);
        assert_ne!(a, b);
    }

    #[test]
    fn is_excluded_breaks_zero_ties_lexicographically() {
        assert!(is_excluded(&[-1, 0, 0], &[0, 1, 1]));
        assert!(!is_excluded(&[1, 0, 0], &[0, 1, 1]));
        assert!(!is_excluded(&[2, 0, 0], &[1, 0, 0]));
    }
}
