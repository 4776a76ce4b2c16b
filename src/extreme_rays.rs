//! Extreme-ray and post-processing checks (component J, spec §4.7).

use crate::bitset::GenSet;
use crate::matrix::{rank_destructive, scalar_product, submatrix};
use crate::ring::IntegerRing;

/// `Z(g) = { f in hyperplanes : f·g = 0 }` for generator `g`, as a bitset
/// over hyperplane indices.
fn zero_set<R, T>(ring: &R, hyperplanes: &[Vec<T>], g: &[T]) -> GenSet
where
    R: IntegerRing<T>,
    T: Clone,
{
    let mut z = GenSet::with_capacity(hyperplanes.len());
    for (i, h) in hyperplanes.iter().enumerate() {
        if ring.is_0(&scalar_product(ring, h, g)) {
            z.insert(i);
        }
    }
    z
}

/// Rank strategy (§4.7): `g` is extreme iff `|Z(g)| >= dim - 1` and the
/// matrix of those hyperplane normals has rank `dim - 1`.
pub fn is_extreme_rank_strategy<R, T>(ring: &R, dim: usize, hyperplanes: &[Vec<T>], g: &[T]) -> bool
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let z = zero_set(ring, hyperplanes, g);
    let keys: Vec<usize> = z.iter_ones().collect();
    if keys.len() < dim.saturating_sub(1) {
        return false;
    }
    let mut rows = submatrix(hyperplanes, &keys);
    rank_destructive(ring, &mut rows) == dim.saturating_sub(1)
}

/// Compare strategy (§4.7): `g` is extreme iff no other generator `g'` has
/// a strictly larger zero-set (`Z(g) ⊊ Z(g')`).
pub fn extreme_flags_compare_strategy<R, T>(ring: &R, hyperplanes: &[Vec<T>], generators: &[Vec<T>]) -> Vec<bool>
where
    R: IntegerRing<T>,
    T: Clone,
{
    let zero_sets: Vec<GenSet> = generators.iter().map(|g| zero_set(ring, hyperplanes, g)).collect();
    (0..generators.len())
        .map(|i| {
            !zero_sets.iter().enumerate().any(|(j, zj)| {
                j != i && zero_sets[i].is_subset_of(zj) && zj.count() > zero_sets[i].count()
            })
        })
        .collect()
}

/// Choose the cheaper strategy, per the dispatch rule `d · |hyperplanes| <
/// n` in §4.7, and apply it to every generator.
pub fn extreme_ray_flags<R, T>(ring: &R, dim: usize, hyperplanes: &[Vec<T>], generators: &[Vec<T>]) -> Vec<bool>
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    if dim * hyperplanes.len() < generators.len() {
        generators
            .iter()
            .map(|g| is_extreme_rank_strategy(ring, dim, hyperplanes, g))
            .collect()
    } else {
        extreme_flags_compare_strategy(ring, hyperplanes, generators)
    }
}

/// The cone is pointed iff the support-hyperplane matrix has rank `dim`.
pub fn is_pointed<R, T>(ring: &R, dim: usize, hyperplanes: &[Vec<T>]) -> bool
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let mut rows = hyperplanes.to_vec();
    rank_destructive(ring, &mut rows) == dim
}

/// Sign-alternating inclusion-exclusion table over excluded-face forms
/// (§4.7): pairwise intersections (as generator zero-sets) with alternating
/// sign, deduplicated, zero-multiplicity entries dropped. `faces` are
/// linear forms in the same coordinates as `generators`, supplied by the
/// caller via `FullCone::set_excluded_faces`.
pub fn excluded_faces_table<R, T>(ring: &R, faces: &[Vec<T>], generators: &[Vec<T>]) -> Vec<(GenSet, i64)>
where
    R: IntegerRing<T>,
    T: Clone,
{
    let mut table: Vec<(GenSet, i64)> = Vec::new();
    for face in faces {
        let mut z = GenSet::with_capacity(generators.len());
        for (i, g) in generators.iter().enumerate() {
            if ring.is_0(&scalar_product(ring, face, g)) {
                z.insert(i);
            }
        }
        let mut merged = Vec::new();
        let mut absorbed = false;
        for (existing, sign) in &table {
            let inter = existing.intersection(&z);
            if inter == *existing {
                merged.push((existing.clone(), *sign));
                absorbed = true;
            } else {
                merged.push((existing.clone(), *sign));
                merged.push((inter, -sign));
            }
        }
        if !absorbed {
            merged.push((z, 1));
        }
        table = merged;
    }
    // drop zero-multiplicity and merge exact duplicates by summing signs
    let mut dedup: Vec<(GenSet, i64)> = Vec::new();
    for (z, sign) in table {
        if let Some(existing) = dedup.iter_mut().find(|(e, _)| *e == z) {
            existing.1 += sign;
        } else {
            dedup.push((z, sign));
        }
    }
    dedup.retain(|(_, s)| *s != 0);
    dedup
}
