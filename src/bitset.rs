//! `GenInHyp`: the bitset marking which already-inserted generators lie on
//! a facet (spec §3).
//!
//! The teacher crate has no bitset type of its own (its sparse-matrix
//! design represents index sets as `HashSet`/sorted `Vec`), so this is
//! enriched from elsewhere in the pack: `fixedbitset` is the bitset crate
//! `petgraph` (and, transitively, several of the pack's graph/topology
//! crates) already depends on, and is a closer fit here than a hand-rolled
//! word array — the engine needs fast `&`, `|`, popcount, and iteration
//! over set bits, all of which `fixedbitset` provides directly.

use fixedbitset::FixedBitSet;

/// A fixed-capacity bitset over generator indices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenSet(FixedBitSet);

impl GenSet {
    /// An empty set over `n` possible generator indices.
    pub fn with_capacity(n: usize) -> Self {
        GenSet(FixedBitSet::with_capacity(n))
    }

    pub fn insert(&mut self, i: usize) {
        self.0.grow(i + 1);
        self.0.insert(i);
    }

    pub fn remove(&mut self, i: usize) {
        if i < self.0.len() {
            self.0.set(i, false);
        }
    }

    pub fn contains(&self, i: usize) -> bool {
        i < self.0.len() && self.0.contains(i)
    }

    /// Number of set bits, capped scan up to `cap` entries — used by the
    /// simpliciality test (§4.1 Phase 1), which only needs to know whether
    /// the count is `<= dim - 1`, `== dim - 1`, or more.
    pub fn count_capped(&self, cap: usize) -> usize {
        let mut n = 0;
        for _ in self.0.ones() {
            n += 1;
            if n > cap {
                break;
            }
        }
        n
    }

    pub fn count(&self) -> usize {
        self.0.count_ones(..)
    }

    pub fn union_with(&mut self, other: &GenSet) {
        self.0.grow(other.0.len());
        self.0.union_with(&other.0);
    }

    pub fn intersection(&self, other: &GenSet) -> GenSet {
        let mut out = self.0.clone();
        out.grow(other.0.len());
        let mut other_grown = other.0.clone();
        other_grown.grow(out.len());
        out.intersect_with(&other_grown);
        GenSet(out)
    }

    /// `true` iff every bit set in `self` is also set in `other`
    /// (`self ⊆ other`) — the subset test the extreme-ray "compare
    /// strategy" (§4.7) and subfacet containment checks (§4.1 Phase 2)
    /// both need.
    pub fn is_subset_of(&self, other: &GenSet) -> bool {
        self.0.ones().all(|i| other.contains(i))
    }

    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_contains() {
        let mut s = GenSet::with_capacity(4);
        s.insert(1);
        s.insert(3);
        assert!(s.contains(1));
        assert!(s.contains(3));
        assert!(!s.contains(0));
        assert!(!s.contains(2));
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn intersection_and_subset() {
        let mut a = GenSet::with_capacity(4);
        a.insert(0);
        a.insert(1);
        let mut b = GenSet::with_capacity(4);
        b.insert(1);
        b.insert(2);
        let i = a.intersection(&b);
        assert!(i.contains(1));
        assert!(!i.contains(0));
        assert!(!i.contains(2));
        assert!(i.is_subset_of(&a));
        assert!(i.is_subset_of(&b));
        assert!(!a.is_subset_of(&b));
    }

    #[test]
    fn count_capped_stops_early() {
        let mut s = GenSet::with_capacity(10);
        for i in 0..8 {
            s.insert(i);
        }
        assert_eq!(s.count_capped(3), 4); // stops once it exceeds cap
        assert_eq!(s.count(), 8);
    }
}
