//! Facet pool (component C, spec §3, §4.1 invariants).
//!
//! A [`Facet`] is the unit of work the pivot (`crate::pivot`) creates,
//! classifies, and prunes. The pool just owns a flat `Vec<Facet<T>>`; the
//! pivot is responsible for maintaining the invariants listed in the data
//! model (every `GenInHyp` a subset of inserted generators, `Hyp`
//! primitive, no duplicate normals, negative facets pruned after each
//! insertion).

use crate::bitset::GenSet;

/// A candidate support hyperplane, with the provenance metadata the pivot
/// needs to apply its shortcuts (mother-daughter, extension).
#[derive(Debug, Clone)]
pub struct Facet<T> {
    /// Inward normal, always primitive.
    pub hyp: Vec<T>,
    /// Which already-inserted generators lie on this facet.
    pub gen_in_hyp: GenSet,
    /// Scratch: `hyp · g` for the generator currently being inserted.
    pub val_new_gen: T,
    /// Globally unique id, assigned at creation.
    pub ident: u64,
    /// `ident` of the facet this one was pivoted from, or `0` if none
    /// (the starting simplex's facets have no mother).
    pub mother: u64,
    /// Count of generators already inserted at the moment of creation.
    pub born_at: usize,
}

impl<T> Facet<T> {
    pub fn new(hyp: Vec<T>, gen_in_hyp: GenSet, val_new_gen: T, ident: u64, mother: u64, born_at: usize) -> Self {
        Facet {
            hyp,
            gen_in_hyp,
            val_new_gen,
            ident,
            mother,
            born_at,
        }
    }

    /// A facet is simplicial iff exactly `dim - 1` inserted generators lie
    /// on it (§4.1 Phase 1). The bitset count is capped at `dim` since
    /// that's all the caller needs to distinguish "simplicial",
    /// "non-simplicial", and "degenerate" (more than `dim` can't happen on
    /// a valid facet but we don't assert it here).
    pub fn is_simplicial(&self, dim: usize) -> bool {
        self.gen_in_hyp.count_capped(dim) == dim - 1
    }
}

/// Monotone id generator, one per worker so ids stay unique without a
/// shared counter on the hot path: thread `t` hands out `t, t + n, t + 2n,
/// ...` for `n` threads (spec §5, "facet `Ident` is unique but not
/// monotone across threads").
#[derive(Debug)]
pub struct IdentStriper {
    next: u64,
    stride: u64,
}

impl IdentStriper {
    pub fn new(thread_index: usize, num_threads: usize) -> Self {
        IdentStriper {
            next: (thread_index as u64) + 1, // reserve 0 to mean "no mother"
            stride: num_threads.max(1) as u64,
        }
    }

    pub fn next_ident(&mut self) -> u64 {
        let id = self.next;
        self.next += self.stride;
        id
    }
}

/// The live set of candidate support hyperplanes.
#[derive(Debug, Clone, Default)]
pub struct FacetPool<T> {
    facets: Vec<Facet<T>>,
}

impl<T> FacetPool<T> {
    pub fn new() -> Self {
        FacetPool { facets: Vec::new() }
    }

    pub fn push(&mut self, f: Facet<T>) {
        self.facets.push(f);
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Facet<T>> {
        self.facets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Facet<T>> {
        self.facets.iter_mut()
    }

    /// Drop every facet with negative `val_new_gen` (§4.1 Phase 4).
    pub fn prune_negative<R>(&mut self, ring: &R)
    where
        R: crate::ring::IntegerRing<T>,
    {
        self.facets.retain(|f| ring.sign(&f.val_new_gen) >= 0);
    }

    pub fn into_vec(self) -> Vec<Facet<T>> {
        self.facets
    }

    pub fn as_slice(&self) -> &[Facet<T>] {
        &self.facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    fn mkfacet(hyp: Vec<i64>, on: &[usize], val: i64, ident: u64) -> Facet<i64> {
        let mut g = GenSet::with_capacity(on.iter().copied().max().map(|m| m + 1).unwrap_or(0));
        for &i in on {
            g.insert(i);
        }
        Facet::new(hyp, g, val, ident, 0, 0)
    }

    #[test]
    fn simplicial_test_counts_bits() {
        let f = mkfacet(vec![1, 0, 0], &[0, 1], 0, 1);
        assert!(f.is_simplicial(3)); // dim-1 = 2 bits set
        let g = mkfacet(vec![1, 0, 0], &[0], 0, 2);
        assert!(!g.is_simplicial(3));
    }

    #[test]
    fn ident_striper_produces_disjoint_sequences() {
        let mut a = IdentStriper::new(0, 2);
        let mut b = IdentStriper::new(1, 2);
        let seq_a: Vec<u64> = (0..3).map(|_| a.next_ident()).collect();
        let seq_b: Vec<u64> = (0..3).map(|_| b.next_ident()).collect();
        for x in &seq_a {
            assert!(!seq_b.contains(x));
        }
    }

    #[test]
    fn prune_negative_removes_only_negative_facets() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut pool = FacetPool::new();
        pool.push(mkfacet(vec![1, 0, 0], &[0, 1], -1, 1));
        pool.push(mkfacet(vec![0, 1, 0], &[0, 1], 0, 2));
        pool.push(mkfacet(vec![0, 0, 1], &[0, 1], 2, 3));
        pool.prune_negative(&ring);
        assert_eq!(pool.len(), 2);
        assert!(pool.iter().all(|f| f.val_new_gen >= 0));
    }
}
