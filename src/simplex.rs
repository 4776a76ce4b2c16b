//! Triangulation extender (component E, spec §3, §4.2).
//!
//! [`Triangulation`] owns the append-only list of [`ShortSimplex`] records
//! plus the per-vertex section index used to look up, for any already
//! inserted generator, the contiguous run of simplices created when it was
//! inserted.

use crate::bitset::GenSet;
use crate::facet::Facet;
use crate::ring::IntegerRing;

/// One simplicial sub-cone: `dim` generator keys plus a height (the
/// absolute determinant-like volume lower bound) and, once the evaluator
/// has run, a volume.
#[derive(Debug, Clone)]
pub struct ShortSimplex<T> {
    pub key: Vec<usize>,
    pub height: T,
    pub vol: Option<T>,
}

/// Append-only triangulation list plus per-vertex section brackets
/// (`TriSectionFirst`/`TriSectionLast`, spec §3).
#[derive(Debug, Clone, Default)]
pub struct Triangulation<T> {
    simplices: Vec<ShortSimplex<T>>,
    section_first: Vec<usize>,
    section_last: Vec<usize>,
}

impl<T> Triangulation<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        Triangulation {
            simplices: Vec::new(),
            section_first: Vec::new(),
            section_last: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.simplices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    pub fn as_slice(&self) -> &[ShortSimplex<T>] {
        &self.simplices
    }

    /// Seed the triangulation with the initial full-dimensional simplex
    /// chosen by `crate::start_simplex::choose_start_simplex`: one
    /// `ShortSimplex` over `key`, with every vertex's section pointing
    /// back at it.
    pub fn seed_start_simplex(&mut self, key: Vec<usize>, height: T) {
        let idx = self.simplices.len();
        for &v in &key {
            while self.section_first.len() <= v {
                self.section_first.push(idx);
                self.section_last.push(idx);
            }
            self.section_first[v] = idx;
            self.section_last[v] = idx + 1;
        }
        self.simplices.push(ShortSimplex { key, height, vol: None });
    }

    fn section(&self, v: usize) -> Option<(usize, usize)> {
        if v < self.section_first.len() {
            Some((self.section_first[v], self.section_last[v]))
        } else {
            None
        }
    }

    /// Extend the triangulation when inserting generator `k`, given the
    /// set of visible facets (`ValNewGen < 0`) just before they are pruned
    /// from the pool (§4.2).
    pub fn extend<R>(
        &mut self,
        ring: &R,
        dim: usize,
        visible: &[&Facet<T>],
        k: usize,
        excluded: impl Fn(&Facet<T>) -> bool,
    ) where
        R: IntegerRing<T>,
        T: Clone + PartialEq,
    {
        let start = self.simplices.len();
        for f in visible {
            let height = ring.negate(&f.val_new_gen); // |ValNewGen| since ValNewGen < 0 here
            let skip = excluded(f);
            if f.is_simplicial(dim) {
                let mut key: Vec<usize> = f.gen_in_hyp.iter_ones().collect();
                key.push(k);
                self.simplices.push(ShortSimplex {
                    key,
                    height: if skip { ring.zero() } else { height },
                    vol: None,
                });
                continue;
            }
            self.extend_non_simplicial(ring, dim, f, k, &height, skip);
        }
        while self.section_first.len() <= k {
            self.section_first.push(start);
            self.section_last.push(start);
        }
        self.section_first[k] = start;
        self.section_last[k] = self.simplices.len();
    }

    /// Non-simplicial case (§4.2): for each already-inserted on-facet
    /// generator `v` past the first `dim - 2` (a deterministic
    /// duplicate-avoidance skip), scan `v`'s section for a simplex
    /// missing exactly one key found on `f`, and replace that key with
    /// `k`.
    fn extend_non_simplicial<R>(&mut self, ring: &R, dim: usize, f: &Facet<T>, k: usize, height: &T, skip: bool)
    where
        R: IntegerRing<T>,
        T: Clone + PartialEq,
    {
        let on_facet: Vec<usize> = f.gen_in_hyp.iter_ones().collect();
        let skip_count = dim.saturating_sub(2).min(on_facet.len());
        for &v in &on_facet[skip_count..] {
            let (lo, hi) = match self.section(v) {
                Some(range) => range,
                None => continue,
            };
            for idx in lo..hi {
                let s = &self.simplices[idx];
                let missing: Vec<usize> = s.key.iter().copied().filter(|g| !f_contains(f, *g)).collect();
                if missing.len() == 1 {
                    let mut new_key = s.key.clone();
                    let pos = new_key.iter().position(|g| *g == missing[0]).unwrap();
                    new_key[pos] = k;
                    self.simplices.push(ShortSimplex {
                        key: new_key,
                        height: if skip { ring.zero() } else { height.clone() },
                        vol: None,
                    });
                }
            }
        }
    }
}

fn f_contains<T>(f: &Facet<T>, g: usize) -> bool {
    f.gen_in_hyp.contains(g)
}

/// Restrict a `GenSet` to generator indices present in `keys`, used by
/// callers that need a facet's on-facet set as a plain key list.
pub fn genset_to_sorted_vec(s: &GenSet) -> Vec<usize> {
    s.iter_ones().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn simplicial_facet_produces_one_simplex_with_new_generator() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut tri = Triangulation::new();
        let mut gens = GenSet::with_capacity(3);
        gens.insert(0);
        gens.insert(1);
        let facet = Facet::new(vec![0, 0, 1], gens, -2, 1, 0, 2);
        tri.extend(&ring, 3, &[&facet], 2, |_| false);
        assert_eq!(tri.len(), 1);
        let s = &tri.as_slice()[0];
        assert_eq!(s.height, 2);
        let mut key = s.key.clone();
        key.sort();
        assert_eq!(key, vec![0, 1, 2]);
    }

    #[test]
    fn excluded_facet_gets_zero_height() {
        let ring = NativeIntegerRing::<i64>::new();
        let mut tri = Triangulation::new();
        let mut gens = GenSet::with_capacity(3);
        gens.insert(0);
        gens.insert(1);
        let facet = Facet::new(vec![0, 0, 1], gens, -5, 1, 0, 2);
        tri.extend(&ring, 3, &[&facet], 2, |_| true);
        assert_eq!(tri.as_slice()[0].height, 0);
    }
}
