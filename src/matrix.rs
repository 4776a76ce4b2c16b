//! Integer/matrix primitives (component A of the design).
//!
//! Per spec §1, these routines are genuinely external collaborators: the
//! pivot, triangulation, and extreme-ray components only ever call
//! `v_scalar_product`, `rank_destructive`, `submatrix`, `kernel`,
//! `find_linear_form`, and `invert` as black boxes (§6). This module is a
//! minimal, self-contained stand-in for that collaborator, grounded in the
//! same row/column vocabulary the teacher crate's matrix-oracle module
//! uses, but specialized to small dense integer matrices (generator counts
//! in practice range from `dim` to a few thousand, never the huge sparse
//! matrices the teacher's oracle traits were built for).

use crate::ring::IntegerRing;
use num::rational::Ratio;
use num_bigint::BigInt;
use num_traits::Zero;

/// `u · v`, the one operation every other component leans on: sign
/// classification in the pivot (§4.1), height computation in the
/// triangulation extender (§4.2), and the `Z(g)` zero-sets in the
/// extreme-ray checks (§4.7).
pub fn scalar_product<R, T>(ring: &R, u: &[T], v: &[T]) -> T
where
    R: IntegerRing<T>,
    T: Clone,
{
    assert_eq!(u.len(), v.len(), "scalar_product: dimension mismatch");
    let mut acc = ring.zero();
    for (a, b) in u.iter().zip(v.iter()) {
        acc = ring.add(&acc, &ring.multiply(a, b));
    }
    acc
}

/// Divide every entry of `v` by the gcd of its entries, so the result is
/// primitive (gcd of entries = 1). Leaves `v` unchanged if it is already
/// zero or primitive. This is `v_make_prime` in the external-collaborator
/// list (§6); generator intake (§4.6 step 1) and new-facet construction
/// (§4.1 Phase 3) both call it.
pub fn make_primitive<R, T>(ring: &R, v: &mut [T])
where
    R: IntegerRing<T>,
    T: Clone,
{
    let mut g = ring.zero();
    for x in v.iter() {
        g = ring.gcd(&g, x);
    }
    if ring.is_0(&g) || ring.is_1(&g) {
        return;
    }
    for x in v.iter_mut() {
        *x = ring.div_exact(x, &g);
    }
}

/// Select the rows named by `keys` (in the order given) out of `rows`,
/// i.e. `Matrix::submatrix`.
pub fn submatrix<T: Clone>(rows: &[Vec<T>], keys: &[usize]) -> Vec<Vec<T>> {
    keys.iter().map(|&k| rows[k].clone()).collect()
}

/// Rank of an integer matrix via fraction-free (Bareiss) Gaussian
/// elimination, so every intermediate entry stays an exact integer and no
/// division is needed until the very last step. `rows` is consumed
/// ("destructive") because the elimination overwrites it in place — this
/// matches `Matrix::rank_destructive` in the external-collaborator list
/// (§6), which documents the same contract.
pub fn rank_destructive<R, T>(ring: &R, rows: &mut Vec<Vec<T>>) -> usize
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let nrows = rows.len();
    if nrows == 0 {
        return 0;
    }
    let ncols = rows[0].len();
    let mut rank = 0usize;
    let mut prev_pivot = ring.one();

    for col in 0..ncols {
        if rank >= nrows {
            break;
        }
        // find a pivot row at or below `rank` with a nonzero entry in `col`
        let pivot_row = (rank..nrows).find(|&r| !ring.is_0(&rows[r][col]));
        let pivot_row = match pivot_row {
            Some(r) => r,
            None => continue,
        };
        rows.swap(rank, pivot_row);

        let pivot = rows[rank][col].clone();
        for r in (rank + 1)..nrows {
            let factor = rows[r][col].clone();
            if ring.is_0(&factor) {
                continue;
            }
            for c in col..ncols {
                // Bareiss update: (pivot * rows[r][c] - factor * rows[rank][c]) / prev_pivot
                let numerator = ring.subtract(
                    &ring.multiply(&pivot, &rows[r][c].clone()),
                    &ring.multiply(&factor, &rows[rank][c].clone()),
                );
                rows[r][c] = ring.div_exact(&numerator, &prev_pivot);
            }
        }
        prev_pivot = pivot;
        rank += 1;
    }
    rank
}

/// Absolute value of the determinant of a square integer matrix, via the
/// same Bareiss elimination as [`rank_destructive`]: when the matrix has
/// full rank, the last pivot produced equals the determinant up to sign.
/// Used to compute a simplex's `height` (§3) for the starting simplex,
/// whose volume is otherwise never touched by the pivot.
pub fn abs_determinant<R, T>(ring: &R, rows: Vec<Vec<T>>) -> T
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let n = rows.len();
    let mut rows = rows;
    let rank = rank_destructive(ring, &mut rows);
    if rank < n {
        return ring.zero();
    }
    let det = rows[n - 1][n - 1].clone();
    if ring.sign(&det) < 0 {
        ring.negate(&det)
    } else {
        det
    }
}

/// Kernel (nullspace) basis of an integer matrix, returned as a list of
/// integer row vectors (scaled to be primitive). Needed only by the
/// grading-discovery step of the driver (§4.6 step 3) when no explicit
/// grading is supplied; implemented over exact rationals since the
/// reduced row-echelon form genuinely needs division.
pub fn kernel<T: Clone + Into<i64>>(rows: &[Vec<T>]) -> Vec<Vec<i64>> {
    if rows.is_empty() {
        return Vec::new();
    }
    let nrows = rows.len();
    let ncols = rows[0].len();
    let mut m: Vec<Vec<Ratio<BigInt>>> = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|x| Ratio::from_integer(BigInt::from(x.clone().into())))
                .collect()
        })
        .collect();

    let mut pivot_cols = Vec::new();
    let mut row = 0usize;
    for col in 0..ncols {
        if row >= nrows {
            break;
        }
        let found = (row..nrows).find(|&r| !m[r][col].is_zero());
        let found = match found {
            Some(r) => r,
            None => continue,
        };
        m.swap(row, found);
        let pivot = m[row][col].clone();
        for c in 0..ncols {
            m[row][c] = &m[row][c] / &pivot;
        }
        for r in 0..nrows {
            if r == row {
                continue;
            }
            let factor = m[r][col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..ncols {
                let sub = &factor * &m[row][c].clone();
                m[r][c] = &m[r][c] - &sub;
            }
        }
        pivot_cols.push(col);
        row += 1;
    }

    let free_cols: Vec<usize> = (0..ncols).filter(|c| !pivot_cols.contains(c)).collect();
    let mut basis = Vec::new();
    for &free in &free_cols {
        let mut vec = vec![Ratio::from_integer(BigInt::zero()); ncols];
        vec[free] = Ratio::from_integer(BigInt::from(1));
        for (r, &pcol) in pivot_cols.iter().enumerate() {
            vec[pcol] = -m[r][free].clone();
        }
        basis.push(clear_denominators(&vec));
    }
    basis
}

fn clear_denominators(v: &[Ratio<BigInt>]) -> Vec<i64> {
    use num_traits::ToPrimitive;
    let mut lcm = BigInt::from(1);
    for x in v {
        let d = x.denom().clone();
        lcm = num_integer::lcm(lcm, d);
    }
    v.iter()
        .map(|x| {
            let scaled = x * Ratio::from_integer(lcm.clone());
            scaled.to_integer().to_i64().expect("kernel basis overflowed i64")
        })
        .collect()
}

/// Find a single linear form that is strictly positive on every row of
/// `rows` — used to derive a grading when the cone's extreme rays are
/// known but no grading was supplied explicitly (§4.6 step 3). Returns
/// `None` when no such form exists in the rational span at low search
/// depth (the degenerate/non-pointed case, §8 scenario S3).
pub fn find_linear_form<T: Clone + Into<i64>>(rows: &[Vec<T>]) -> Option<Vec<i64>> {
    if rows.is_empty() {
        return None;
    }
    let dim = rows[0].len();
    // the sum of all rows is positive on every row whenever the rows all
    // lie in an open halfspace containing the positive orthant direction;
    // this is exactly the fallback the reducer (§4.5 step 1) uses when no
    // grading is supplied, so reuse it here too.
    let mut sum = vec![0i64; dim];
    for row in rows {
        for (i, x) in row.iter().enumerate() {
            sum[i] += (*x).clone().into();
        }
    }
    if sum.iter().all(|&x| x == 0) {
        return None;
    }
    for row in rows {
        let dp: i64 = row
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| Into::<i64>::into((*a).clone()) * b)
            .sum();
        if dp <= 0 {
            return None;
        }
    }
    Some(sum)
}

/// Invert a square rational matrix (used only by the post-processing
/// module to express excluded-face forms in generator coordinates, §4.7).
pub fn invert(rows: &[Vec<i64>]) -> Option<Vec<Vec<Ratio<BigInt>>>> {
    let n = rows.len();
    if n == 0 || rows.iter().any(|r| r.len() != n) {
        return None;
    }
    let mut aug: Vec<Vec<Ratio<BigInt>>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r: Vec<Ratio<BigInt>> = row
                .iter()
                .map(|&x| Ratio::from_integer(BigInt::from(x)))
                .collect();
            for j in 0..n {
                r.push(Ratio::from_integer(BigInt::from((i == j) as i64)));
            }
            r
        })
        .collect();

    for col in 0..n {
        let pivot_row = (col..n).find(|&r| !aug[r][col].is_zero())?;
        aug.swap(col, pivot_row);
        let pivot = aug[col][col].clone();
        for c in 0..2 * n {
            aug[col][c] = &aug[col][c] / &pivot;
        }
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = aug[r][col].clone();
            if factor.is_zero() {
                continue;
            }
            for c in 0..2 * n {
                let sub = &factor * &aug[col][c].clone();
                aug[r][c] = &aug[r][c] - &sub;
            }
        }
    }
    Some(aug.into_iter().map(|r| r[n..].to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn scalar_product_is_dot_product() {
        let ring = NativeIntegerRing::<i64>::new();
        assert_eq!(scalar_product(&ring, &[1, 2, 3], &[4, 5, 6]), 32);
    }

    #[test]
    fn make_primitive_divides_by_gcd() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut v = vec![4, 6, 8];
        make_primitive(&ring, &mut v);
        assert_eq!(v, vec![2, 3, 4]);
    }

    #[test]
    fn rank_destructive_identifies_full_rank() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut rows = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        assert_eq!(rank_destructive(&ring, &mut rows), 3);
    }

    #[test]
    fn rank_destructive_identifies_rank_deficiency() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut rows = vec![vec![1, 2, 3], vec![2, 4, 6], vec![0, 1, 1]];
        assert_eq!(rank_destructive(&ring, &mut rows), 2);
    }

    #[test]
    fn abs_determinant_of_identity_is_one() {
        let ring = NativeIntegerRing::<i64>::new();
        let rows = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]];
        assert_eq!(abs_determinant(&ring, rows), 1);
    }

    #[test]
    fn abs_determinant_of_scaled_matrix() {
        let ring = NativeIntegerRing::<i64>::new();
        let rows = vec![vec![2, 0], vec![0, 3]];
        assert_eq!(abs_determinant(&ring, rows), 6);
    }

    #[test]
    fn kernel_of_rank_deficient_matrix_is_nonempty() {
        let rows = vec![vec![1i64, 2, 3], vec![2i64, 4, 6]];
        let basis = kernel(&rows);
        assert_eq!(basis.len(), 2);
        for v in &basis {
            let dp: i64 = v.iter().zip(rows[0].iter()).map(|(a, b)| a * b).sum();
            assert_eq!(dp, 0);
        }
    }

    #[test]
    fn find_linear_form_on_unit_cube_generators() {
        let rows = vec![vec![1i64, 0, 0], vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]];
        let form = find_linear_form(&rows).unwrap();
        for row in &rows {
            let dp: i64 = row.iter().zip(form.iter()).map(|(a, b)| a * b).sum();
            assert!(dp > 0);
        }
    }
}
