//! Generator intake (spec §3, §4.6 step 1).
//!
//! A [`GeneratorSet`] owns the immutable list of generator vectors the rest
//! of the engine indexes by key. Intake primitivizes every row, drops zero
//! rows, and deduplicates — after construction, every consumer downstream
//! can assume the invariants hold without re-checking them.

use crate::error::{BadInputReason, ConeError, ConeResult};
use crate::matrix::{make_primitive, rank_destructive};
use crate::ring::IntegerRing;

/// The generator matrix, after intake normalization.
#[derive(Debug, Clone)]
pub struct GeneratorSet<T> {
    dim: usize,
    rows: Vec<Vec<T>>,
}

impl<T> GeneratorSet<T>
where
    T: Clone + PartialEq,
{
    /// Primitivize, dedup, and drop zero rows. Rejects an empty result and
    /// any row whose length isn't `dim`.
    pub fn new<R>(ring: &R, dim: usize, raw: Vec<Vec<T>>) -> ConeResult<Self>
    where
        R: IntegerRing<T>,
    {
        let mut rows: Vec<Vec<T>> = Vec::with_capacity(raw.len());
        for (index, mut row) in raw.into_iter().enumerate() {
            if row.len() != dim {
                return Err(ConeError::BadInput(BadInputReason::RaggedRow {
                    index,
                    expected: dim,
                    actual: row.len(),
                }));
            }
            make_primitive(ring, &mut row);
            if row.iter().all(|x| ring.is_0(x)) {
                continue;
            }
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return Err(ConeError::BadInput(BadInputReason::Empty));
        }
        Ok(GeneratorSet { dim, rows })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: usize) -> &[T] {
        &self.rows[key]
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Verify the generator matrix has full rank `dim`, as `FullCone`'s
    /// constructor requires (§6).
    pub fn check_full_rank<R>(&self, ring: &R) -> ConeResult<()>
    where
        R: IntegerRing<T>,
    {
        let mut rows = self.rows.clone();
        let rank = rank_destructive(ring, &mut rows);
        if rank != self.dim {
            return Err(ConeError::BadInput(BadInputReason::NotFullRank {
                rank,
                dim: self.dim,
            }));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn dedups_and_drops_zero_rows() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw = vec![
            vec![1, 0, 0],
            vec![2, 0, 0], // not primitive -> reduces to (1,0,0), a dup
            vec![0, 0, 0], // zero row, dropped
            vec![0, 1, 0],
            vec![0, 0, 1],
        ];
        let gens = GeneratorSet::new(&ring, 3, raw).unwrap();
        assert_eq!(gens.len(), 3);
    }

    #[test]
    fn rejects_empty_input() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw: Vec<Vec<i64>> = vec![vec![0, 0, 0]];
        let err = GeneratorSet::new(&ring, 3, raw).unwrap_err();
        assert!(matches!(
            err,
            ConeError::BadInput(BadInputReason::Empty)
        ));
    }

    #[test]
    fn full_rank_check_passes_for_cube() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]];
        let gens = GeneratorSet::new(&ring, 3, raw).unwrap();
        assert!(gens.check_full_rank(&ring).is_ok());
    }

    #[test]
    fn rejects_ragged_row_without_panicking() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw = vec![vec![1, 0, 0], vec![0, 1]];
        let err = GeneratorSet::new(&ring, 3, raw).unwrap_err();
        assert!(matches!(
            err,
            ConeError::BadInput(BadInputReason::RaggedRow {
                index: 1,
                expected: 3,
                actual: 2,
            })
        ));
    }

    #[test]
    fn full_rank_check_fails_for_deficient_input() {
        let ring = NativeIntegerRing::<i64>::new();
        let raw = vec![vec![1, 0, 0], vec![2, 0, 0], vec![0, 1, 0]];
        // after dedup this is rank-2 in dim 3
        let gens = GeneratorSet::new(&ring, 3, raw).unwrap();
        let err = gens.check_full_rank(&ring).unwrap_err();
        assert!(matches!(
            err,
            ConeError::BadInput(BadInputReason::NotFullRank { rank: 2, dim: 3 })
        ));
    }
}
