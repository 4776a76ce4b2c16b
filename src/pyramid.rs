//! Pyramid dispatcher (component F, spec §4.3).
//!
//! A pyramid is the sub-cone spanned by `{apex} ∪ (generators on one
//! visible facet)`. This module owns the threshold constants that decide
//! when the driver should descend into one instead of pairing every
//! positive/negative facet directly, plus the bookkeeping for pyramids
//! that have been queued but not yet evaluated.

/// Tunable thresholds controlling recursion, deferral, and buffer drains.
/// Defaults match the constants documented in the reference algorithm's
/// source (spec §4.3, §9).
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Thresholds {
    /// `SUPP_HYP_FACTOR` in `REC_BOUND_SUPP_HYP = SUPP_HYP_FACTOR · d⁴`.
    pub supp_hyp_factor: u64,
    /// Factor in the "large pyramid" classification.
    pub large_pyramid_factor: u64,
    pub eval_bound_triang: u64,
    pub eval_bound_pyr: u64,
    pub eval_bound_rec_pyr: u64,
    pub intermed_red_bound_hb: u64,
    pub rec_bound_triang: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            supp_hyp_factor: 100,
            large_pyramid_factor: 20,
            eval_bound_triang: 2_500_000,
            eval_bound_pyr: 200_000,
            eval_bound_rec_pyr: 20_000,
            intermed_red_bound_hb: 2_000_000,
            rec_bound_triang: 1_000_000,
        }
    }
}

impl Thresholds {
    /// `REC_BOUND_SUPP_HYP`: once `pos · neg` at a node exceeds this, every
    /// subsequent insertion at that node switches to pyramidal mode.
    pub fn rec_bound_supp_hyp(&self, dim: usize) -> u64 {
        self.supp_hyp_factor * (dim as u64).pow(4)
    }

    /// `true` iff a sub-pyramid with `comparisons_at_parent_size`
    /// candidate comparisons relative to `old_supp_hyp_count` should be
    /// classified "large" (deferred, matched facet-by-facet against the
    /// parent rather than rebuilt).
    pub fn is_large_pyramid(&self, comparisons_at_parent_size: u64, old_supp_hyp_count: u64) -> bool {
        self.large_pyramid_factor * comparisons_at_parent_size > old_supp_hyp_count
    }
}

/// Whether a queued pyramid reports its facets back to the parent
/// (`Recursive`) or only contributes triangulation (`NonRecursive`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PyramidKind {
    Recursive,
    NonRecursive,
}

/// A queued, unevaluated sub-problem: the apex plus the generators on one
/// visible facet, expressed as indices into the *parent* generator set.
#[derive(Debug, Clone)]
pub struct Pyramid {
    /// On-facet generators, as indices into the parent's generator set.
    pub key: Vec<usize>,
    /// The generator whose insertion spawned this pyramid, also as a
    /// parent generator index. `{apex} ∪ key` spans the pyramid's own
    /// full-dimensional sub-cone.
    pub apex: usize,
    pub kind: PyramidKind,
    /// `0` encodes "skip triangulation for this pyramid" (its simplices
    /// were already counted by an ancestor).
    pub height: u64,
    /// Ident of the mother facet, used to re-attach a recursive pyramid's
    /// reported facets to the right place in the parent pool.
    pub mother_ident: u64,
    pub store_level: usize,
}

/// Buckets of queued pyramids, one per recursion-depth level, drained
/// deepest-first by the driver (§4.6 step 6).
#[derive(Debug, Clone, Default)]
pub struct PyramidStore {
    levels: Vec<Vec<Pyramid>>,
}

impl PyramidStore {
    pub fn new() -> Self {
        PyramidStore { levels: Vec::new() }
    }

    pub fn push(&mut self, p: Pyramid) {
        while self.levels.len() <= p.store_level {
            self.levels.push(Vec::new());
        }
        self.levels[p.store_level].push(p);
    }

    pub fn total_count(&self) -> usize {
        self.levels.iter().map(|l| l.len()).sum()
    }

    /// Deepest-first drain order: pop the whole bucket at the highest
    /// populated level.
    pub fn drain_deepest(&mut self) -> Option<Vec<Pyramid>> {
        while let Some(level) = self.levels.last() {
            if level.is_empty() {
                self.levels.pop();
                continue;
            }
            return self.levels.pop();
        }
        None
    }
}

/// Filters a recursive child pyramid's reported facets down to those that
/// (a) contain the apex and (b) lie on the positive side of every
/// already-inserted generator outside the pyramid's key set
/// (`select_supphyps_from`, §4.3). `child_facets` and `apex` are already
/// expressed in the parent's generator indices.
pub fn select_supphyps_from<R, T>(
    ring: &R,
    child_facets: &[crate::facet::Facet<T>],
    apex: usize,
    outside_generators: &[&[T]],
) -> Vec<crate::facet::Facet<T>>
where
    R: crate::ring::IntegerRing<T>,
    T: Clone,
{
    child_facets
        .iter()
        .filter(|f| f.gen_in_hyp.contains(apex))
        .filter(|f| {
            outside_generators.iter().all(|g| {
                let v = crate::matrix::scalar_product(ring, &f.hyp, g);
                ring.sign(&v) >= 0
            })
        })
        .cloned()
        .collect()
}
