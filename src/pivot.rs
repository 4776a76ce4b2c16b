//! Fourier–Motzkin pivot (component D, spec §4.1).
//!
//! [`pivot_generator`] is the heart of the enumeration loop: given the
//! current facet pool and a new generator `k`, it derives every new facet
//! that appears when `k` is added to the partial cone, and leaves the pool
//! pruned of everything `k` renders non-facet.

use crate::bitset::GenSet;
use crate::error::{ConeError, ConeResult};
use crate::facet::{Facet, FacetPool, IdentStriper};
use crate::generators::GeneratorSet;
use crate::matrix::{make_primitive, rank_destructive, scalar_product, submatrix};
use crate::ring::IntegerRing;
use std::collections::HashMap;

/// Tallies from one pivot step, surfaced for the driver's threshold
/// decisions (§4.3) and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PivotStats {
    pub positive: usize,
    pub negative: usize,
    pub zero: usize,
    pub new_facets: usize,
}

/// Run one pivot step for generator `k`. `inserted_before` is the number
/// of generators already in the cone (used for `BornAt`); on return, the
/// pool has had every negative facet removed (§4.1 Phase 4) and the zero
/// facets carry `k` in their `GenInHyp`.
pub fn pivot_generator<R, T>(
    ring: &R,
    dim: usize,
    generators: &GeneratorSet<T>,
    pool: &mut FacetPool<T>,
    k: usize,
    inserted_before: usize,
    striper: &mut IdentStriper,
    check_overflow: bool,
) -> ConeResult<PivotStats>
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let gk = generators.row(k).to_vec();

    // Phase 1: sign classification.
    for f in pool.iter_mut() {
        let val = scalar_product(ring, &f.hyp, &gk);
        if check_overflow {
            shadow_check(ring, &f.hyp, &gk, &val, k)?;
        }
        f.val_new_gen = val;
    }

    let facets = pool.as_slice();
    let pos: Vec<usize> = (0..facets.len())
        .filter(|&i| ring.sign(&facets[i].val_new_gen) > 0)
        .collect();
    let neg: Vec<usize> = (0..facets.len())
        .filter(|&i| ring.sign(&facets[i].val_new_gen) < 0)
        .collect();
    let zero_count = facets.len() - pos.len() - neg.len();

    // Phase 2: candidate subfacet enumeration. Subfacets produced by
    // removing one on-facet generator from a negative simplicial facet,
    // restricted to generators that also sit on some positive facet.
    // A subfacet produced twice is shared by two negative simplicial
    // facets and cannot be a new facet (its "outward" side is entirely
    // negative), so pairs reaching it are rejected in Phase 3 below.
    let mut zero_positive = GenSet::with_capacity(inserted_before + 1);
    for &i in &pos {
        zero_positive.union_with(&facets[i].gen_in_hyp);
    }
    let mut zero_negative = GenSet::with_capacity(inserted_before + 1);
    for &i in &neg {
        zero_negative.union_with(&facets[i].gen_in_hyp);
    }
    let filter_mask = zero_positive.intersection(&zero_negative);

    let mut subfacet_occurrences: HashMap<Vec<usize>, u32> = HashMap::new();
    for &i in &neg {
        if facets[i].is_simplicial(dim) {
            for g in facets[i].gen_in_hyp.iter_ones() {
                if !filter_mask.contains(g) {
                    continue;
                }
                let mut sub = facets[i].gen_in_hyp.clone();
                sub.remove(g);
                let key: Vec<usize> = sub.iter_ones().collect();
                *subfacet_occurrences.entry(key).or_insert(0) += 1;
            }
        }
    }

    let non_simplicial_count = neg.iter().filter(|&&i| !facets[i].is_simplicial(dim)).count()
        + pos.iter().filter(|&&i| !facets[i].is_simplicial(dim)).count();

    // Phase 3: pairing.
    let mut new_facets = Vec::new();
    for &pi in &pos {
        for &qi in &neg {
            let p = &facets[pi];
            let q = &facets[qi];
            let common = p.gen_in_hyp.intersection(&q.gen_in_hyp);
            let common_count = common.count();
            if common_count < dim.saturating_sub(2) {
                continue;
            }

            let mother_daughter = p.ident == q.mother || q.ident == p.mother;

            let is_subfacet = if mother_daughter {
                true
            } else {
                // Reject pairs whose shared face is a duplicated
                // negative-simplicial subfacet candidate before paying
                // for a rank or comparison test.
                if q.is_simplicial(dim) {
                    let key: Vec<usize> = common.iter_ones().collect();
                    if subfacet_occurrences.get(&key).copied().unwrap_or(0) > 1 {
                        continue;
                    }
                }
                subfacet_test(ring, generators, facets, dim, pi, qi, &common, non_simplicial_count)
            };

            if is_subfacet {
                let mut hyp_new = combine_hyp(ring, p, q);
                make_primitive(ring, &mut hyp_new);
                let mut gen_in_hyp_new = p.gen_in_hyp.intersection(&q.gen_in_hyp);
                gen_in_hyp_new.insert(k);
                let ident = striper.next_ident();
                new_facets.push(Facet::new(
                    hyp_new,
                    gen_in_hyp_new,
                    ring.zero(),
                    ident,
                    p.ident,
                    inserted_before,
                ));
            }
        }
    }

    let new_count = new_facets.len();
    for f in new_facets {
        pool.push(f);
    }
    // mark generator k as present on every facet that already contains it
    for f in pool.iter_mut() {
        if ring.is_0(&f.val_new_gen) {
            f.gen_in_hyp.insert(k);
        }
    }

    // Phase 4: prune.
    pool.prune_negative(ring);

    Ok(PivotStats {
        positive: pos.len(),
        negative: neg.len(),
        zero: zero_count,
        new_facets: new_count,
    })
}

/// `Hyp_new = p.ValNewGen · q.Hyp − q.ValNewGen · p.Hyp` (§4.1 New-facet
/// construction).
fn combine_hyp<R, T>(ring: &R, p: &Facet<T>, q: &Facet<T>) -> Vec<T>
where
    R: IntegerRing<T>,
    T: Clone,
{
    p.hyp
        .iter()
        .zip(q.hyp.iter())
        .map(|(ph, qh)| {
            ring.subtract(
                &ring.multiply(&p.val_new_gen, qh),
                &ring.multiply(&q.val_new_gen, ph),
            )
        })
        .collect()
}

/// Decide whether `p ∩ q` is a genuine (d-2)-face, choosing the rank test
/// or the comparison test by the same cost heuristic as the source
/// (§4.1 Phase 3).
fn subfacet_test<R, T>(
    ring: &R,
    generators: &GeneratorSet<T>,
    facets: &[Facet<T>],
    dim: usize,
    pi: usize,
    qi: usize,
    common: &GenSet,
    non_simplicial_count: usize,
) -> bool
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let use_rank = (non_simplicial_count as f64) > (dim * dim) as f64 * (common.count() as f64) / 3.0;
    if use_rank {
        rank_test(ring, generators, common, dim)
    } else {
        comparison_test(facets, pi, qi, common)
    }
}

/// Rank test: the common generators span a genuine (d-2)-face iff they
/// have rank `dim - 2`.
fn rank_test<R, T>(ring: &R, generators: &GeneratorSet<T>, common: &GenSet, dim: usize) -> bool
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let keys: Vec<usize> = common.iter_ones().collect();
    if keys.len() < dim.saturating_sub(2) {
        return false;
    }
    let mut rows = submatrix(generators.rows(), &keys);
    rank_destructive(ring, &mut rows) == dim.saturating_sub(2)
}

/// Comparison test: `p ∩ q` fails to be a facet iff some other facet `t`
/// contains every generator common to `p` and `q`.
fn comparison_test<T>(facets: &[Facet<T>], pi: usize, qi: usize, common: &GenSet) -> bool {
    !facets
        .iter()
        .enumerate()
        .any(|(ti, t)| ti != pi && ti != qi && common.is_subset_of(&t.gen_in_hyp))
}

/// Best-effort overflow detector: recompute the scalar product in `f64`
/// from the raw ring elements (via `to_f64`) and compare against the
/// ring-computed value. A fixed-width ring that silently wrapped will
/// disagree with the `f64` shadow well outside rounding error.
fn shadow_check<R, T>(ring: &R, hyp: &[T], g: &[T], val: &T, generator: usize) -> ConeResult<()>
where
    R: IntegerRing<T>,
{
    let shadow: f64 = hyp
        .iter()
        .zip(g.iter())
        .map(|(a, b)| ring.to_f64(a) * ring.to_f64(b))
        .sum();
    let actual = ring.to_f64(val);
    let tolerance = (shadow.abs() + 1.0) * 1e-6;
    if (shadow - actual).abs() > tolerance {
        return Err(ConeError::Arithmetic {
            generator,
            context: "scalar product shadow mismatch, likely fixed-width overflow".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    fn unit_cube_start(ring: &NativeIntegerRing<i64>) -> (GeneratorSet<i64>, FacetPool<i64>) {
        let raw = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]];
        let gens = GeneratorSet::new(ring, 3, raw).unwrap();
        let mut pool = FacetPool::new();
        // facets of the simplex spanned by generators 0,1,2: the three
        // coordinate planes, each containing two of the three start
        // generators.
        let mut g01 = GenSet::with_capacity(3);
        g01.insert(0);
        g01.insert(1);
        let mut g02 = GenSet::with_capacity(3);
        g02.insert(0);
        g02.insert(2);
        let mut g12 = GenSet::with_capacity(3);
        g12.insert(1);
        g12.insert(2);
        pool.push(Facet::new(vec![0, 0, 1], g01, -1, 1, 0, 0));
        pool.push(Facet::new(vec![0, 1, 0], g02, -1, 2, 0, 0));
        pool.push(Facet::new(vec![1, 0, 0], g12, -1, 3, 0, 0));
        (gens, pool)
    }

    #[test]
    fn pivot_inserting_diagonal_generator_produces_three_new_facets() {
        let ring = NativeIntegerRing::<i64>::new();
        let (gens, mut pool) = unit_cube_start(&ring);
        let mut striper = IdentStriper::new(0, 1);
        let stats = pivot_generator(&ring, 3, &gens, &mut pool, 3, 3, &mut striper, false).unwrap();
        // the new generator (1,1,1) is positive on all three coordinate
        // planes, so nothing is pruned and no new facet is created yet
        // (the start facets all had ValNewGen = 1 > 0).
        assert_eq!(stats.negative, 0);
        assert_eq!(pool.len(), 3);
    }
}
