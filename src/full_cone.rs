//! Top-level driver (component I, spec §4.6, §6).
//!
//! [`FullCone`] sequences intake, generator insertion, buffer drains, and
//! post-processing, and is the crate's only public entry point. Everything
//! else in the crate exists to be called from here.

use crate::bitset::GenSet;
use crate::error::{BadInputReason, ConeError, ConeResult};
use crate::evaluator::SimplexEvaluator;
use crate::extreme_rays::{self, extreme_ray_flags, is_pointed};
use crate::facet::{Facet, FacetPool, IdentStriper};
use crate::generators::GeneratorSet;
use crate::matrix::{abs_determinant, find_linear_form, kernel, make_primitive, rank_destructive, scalar_product};
use crate::pyramid::{select_supphyps_from, Pyramid, PyramidKind, PyramidStore, Thresholds};
use crate::reducer;
use crate::ring::IntegerRing;
use crate::simplex::{ShortSimplex, Triangulation};
use crate::start_simplex::{choose_start_simplex, is_excluded, order_vector};
use itertools::Itertools;
use num::rational::Ratio;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Task flags set before `compute()` (§6). Flags form a partial order of
/// implications; [`ComputationMode::normalize`] takes the transitive
/// closure before the driver reads them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComputationMode {
    pub compute_triangulation: bool,
    pub keep_triangulation: bool,
    pub compute_multiplicity: bool,
    pub compute_hilbert_basis: bool,
    pub compute_degree_1_points: bool,
    pub compute_hilbert_series: bool,
    pub compute_stanley_decomposition: bool,
    pub inhomogeneous: bool,
}

impl ComputationMode {
    /// Apply the implications named in §4.6 step 2: Stanley decomposition
    /// needs the triangulation kept; determinants (multiplicity) need it
    /// built at all; Hilbert series needs the Hilbert basis machinery
    /// running in grading mode.
    pub fn normalize(mut self) -> Self {
        if self.compute_stanley_decomposition {
            self.keep_triangulation = true;
        }
        if self.keep_triangulation {
            self.compute_triangulation = true;
        }
        if self.compute_multiplicity {
            self.compute_triangulation = true;
        }
        if self.compute_hilbert_series {
            self.compute_hilbert_basis = true;
        }
        self
    }
}

/// Which properties have been computed, for the "computed-bitset" getters
/// demand in §6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputedFlags {
    pub support_hyperplanes: bool,
    pub extreme_rays: bool,
    pub triangulation: bool,
    pub hilbert_basis: bool,
    pub multiplicity: bool,
    pub excluded_faces: bool,
}

/// The enumeration engine itself.
pub struct FullCone<R, T, E> {
    ring: R,
    dim: usize,
    generators: GeneratorSet<T>,
    mode: ComputationMode,
    thresholds: Thresholds,
    check_overflow: bool,
    seed: u64,

    facets: FacetPool<T>,
    triangulation: Triangulation<T>,
    pyramid_store: PyramidStore,
    candidates: Vec<Vec<T>>,
    grading: Option<Vec<T>>,
    order_vec: Option<Vec<i64>>,
    pointed: Option<bool>,
    extreme_flags: Option<Vec<bool>>,
    hilbert_basis: Option<Vec<Vec<T>>>,
    excluded_faces: Vec<Vec<T>>,
    excluded_faces_table: Option<Vec<(GenSet, i64)>>,
    multiplicity: Option<Ratio<i64>>,
    degree_1_points: Option<Vec<Vec<T>>>,
    hilbert_series: Option<Vec<T>>,
    module_rank: Option<usize>,
    shift: Option<i64>,
    total_nr_pyr: usize,
    computed: ComputedFlags,

    evaluator: E,
}

impl<R, T, E> FullCone<R, T, E>
where
    R: IntegerRing<T> + Clone,
    T: Clone + PartialEq + Into<i64>,
    E: SimplexEvaluator<T>,
{
    /// Construct from a (not necessarily full-rank-checked) raw generator
    /// matrix; intake normalizes it (§4.6 step 1) and checks full rank.
    pub fn new(ring: R, dim: usize, raw_generators: Vec<Vec<T>>, mode: ComputationMode, evaluator: E) -> ConeResult<Self> {
        let generators = GeneratorSet::new(&ring, dim, raw_generators)?;
        generators.check_full_rank(&ring)?;
        Ok(FullCone {
            ring,
            dim,
            generators,
            mode: mode.normalize(),
            thresholds: Thresholds::default(),
            check_overflow: false,
            seed: 0x5eed,
            facets: FacetPool::new(),
            triangulation: Triangulation::new(),
            pyramid_store: PyramidStore::new(),
            candidates: Vec::new(),
            grading: None,
            order_vec: None,
            pointed: None,
            extreme_flags: None,
            hilbert_basis: None,
            excluded_faces: Vec::new(),
            excluded_faces_table: None,
            multiplicity: None,
            degree_1_points: None,
            hilbert_series: None,
            module_rank: None,
            shift: None,
            total_nr_pyr: 0,
            computed: ComputedFlags::default(),
            evaluator,
        })
    }

    /// Supply extra linear forms declaring faces to be excluded from the
    /// inclusion-exclusion count (§4.6/§6). Call before `compute()`.
    pub fn set_excluded_faces(&mut self, faces: Vec<Vec<T>>) {
        self.excluded_faces = faces;
    }

    pub fn set_thresholds(&mut self, t: Thresholds) {
        self.thresholds = t;
    }

    pub fn set_check_overflow(&mut self, v: bool) {
        self.check_overflow = v;
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Set an explicit grading. In homogeneous mode every generator must
    /// grade strictly positive. In inhomogeneous mode (§9) a generator may
    /// also grade to exactly `0` (a recession generator); at least one
    /// generator must still grade strictly positive (an "affine"
    /// generator), or the truncation is inconsistent.
    pub fn set_grading(&mut self, grading: Vec<T>) -> ConeResult<()> {
        let mut any_positive = false;
        for (i, g) in self.generators.rows().iter().enumerate() {
            let v = scalar_product(&self.ring, &grading, g);
            let sign = self.ring.sign(&v);
            if self.mode.inhomogeneous {
                if sign < 0 {
                    return Err(ConeError::BadInput(BadInputReason::InconsistentTruncation));
                }
                any_positive |= sign > 0;
            } else if sign <= 0 {
                return Err(ConeError::BadInput(BadInputReason::NonPositiveGrading {
                    generator_index: i,
                    value: self.ring.to_f64(&v) as i64,
                }));
            }
        }
        if self.mode.inhomogeneous && !any_positive {
            return Err(ConeError::BadInput(BadInputReason::InconsistentTruncation));
        }
        self.grading = Some(grading);
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    pub fn computed(&self) -> ComputedFlags {
        self.computed
    }

    pub fn total_nr_pyr(&self) -> usize {
        self.total_nr_pyr
    }

    /// Run the full pipeline (§4.6).
    #[tracing::instrument(skip(self), fields(dim = self.dim, n = self.generators.len()))]
    pub fn compute(&mut self) -> ConeResult<()> {
        tracing::info!("starting enumeration");

        // step 3: derive grading if needed and not supplied
        if self.grading.is_none()
            && (self.mode.compute_hilbert_series || self.mode.compute_multiplicity || self.mode.compute_degree_1_points)
        {
            self.derive_grading()?;
        }

        // step 4: sort generators by degree, then input order
        let order = self.sort_order();

        // step 5: pick start simplex + order vector
        let start_keys = choose_start_simplex(&self.ring, self.dim, &self.generators)
            .ok_or(ConeError::BadInput(BadInputReason::NotFullRank {
                rank: 0,
                dim: self.dim,
            }))?;
        let start_rows: Vec<Vec<T>> = start_keys.iter().map(|&k| self.generators.row(k).to_vec()).collect();
        let order_vec = order_vector(self.dim, &start_rows, self.seed, 1000);
        self.order_vec = Some(order_vec.clone());

        self.facets = seed_simplex_facets(&self.ring, self.dim, &self.generators, &start_keys);

        if self.mode.compute_triangulation {
            let height = abs_determinant(&self.ring, start_rows.clone());
            self.triangulation.seed_start_simplex(start_keys.clone(), height);
        }

        let mut striper = IdentStriper::new(
            rayon::current_thread_index().unwrap_or(0),
            rayon::current_num_threads(),
        );
        let mut inserted: HashSet<usize> = start_keys.iter().copied().collect();

        for &k in &order {
            if inserted.contains(&k) {
                continue;
            }
            self.insert_generator(k, &inserted, &mut striper, &order_vec)?;
            inserted.insert(k);

            if self.triangulation.len() as u64 > self.thresholds.eval_bound_triang {
                self.drain_triangulation();
            }
        }

        self.drain_pyramids()?;
        self.drain_triangulation();

        self.post_process()?;

        tracing::info!(
            facets = self.facets.len(),
            simplices = self.triangulation.len(),
            "enumeration finished"
        );
        Ok(())
    }

    fn derive_grading(&mut self) -> ConeResult<()> {
        let rows = self.generators.rows();
        if let Some(form) = find_linear_form(rows) {
            let grading: Vec<T> = form.iter().map(|&x| self.ring.from_i64(x)).collect();
            self.grading = Some(grading);
            return Ok(());
        }
        // no strictly positive form in the rational span: the cone is
        // not pointed, so a grading cannot be derived (§4.6 step 3).
        Err(ConeError::BadInput(BadInputReason::GradingRequiredButNotDerivable))
    }

    fn sort_order(&self) -> Vec<usize> {
        let idx = 0..self.generators.len();
        match &self.grading {
            Some(grading) => idx
                .sorted_by(|&a, &b| {
                    let da = scalar_product(&self.ring, grading, self.generators.row(a));
                    let db = scalar_product(&self.ring, grading, self.generators.row(b));
                    self.ring.compare(&da, &db)
                })
                .collect(),
            None => idx.collect(),
        }
    }

    fn insert_generator(
        &mut self,
        k: usize,
        inserted: &HashSet<usize>,
        striper: &mut IdentStriper,
        order_vec: &[i64],
    ) -> ConeResult<()> {
        let inserted_before = inserted.len();
        let gk = self.generators.row(k).to_vec();
        for f in self.facets.iter_mut() {
            f.val_new_gen = scalar_product(&self.ring, &f.hyp, &gk);
        }
        let visible: Vec<usize> = self
            .facets
            .iter()
            .enumerate()
            .filter(|(_, f)| self.ring.sign(&f.val_new_gen) < 0)
            .map(|(i, _)| i)
            .collect();

        if self.mode.compute_triangulation {
            let visible_facets: Vec<Facet<T>> = visible.iter().map(|&i| self.facets.as_slice()[i].clone()).collect();
            let refs: Vec<&Facet<T>> = visible_facets.iter().collect();
            let partial = self.mode.compute_hilbert_basis && !self.mode.compute_hilbert_series;
            let ring = &self.ring;
            self.triangulation.extend(ring, self.dim, &refs, k, |f| {
                partial && is_excluded_i64(ring, &f.hyp, order_vec)
            });
        }

        let pos_count = self.facets.len() - visible.len();
        let neg_count = visible.len();
        if (pos_count as u64) * (neg_count as u64) > self.thresholds.rec_bound_supp_hyp(self.dim) {
            // large insertion: queue one pyramid per visible facet instead
            // of letting the direct pivot below absorb all of them at
            // once (§4.3). The direct pivot still runs — this
            // implementation resolves queued pyramids as an additional,
            // single-level pass (see `process_pyramid`) rather than
            // skipping the corresponding work here.
            for &vi in &visible {
                let facet = &self.facets.as_slice()[vi];
                let on_facet_keys: Vec<usize> = facet.gen_in_hyp.iter_ones().filter(|g| inserted.contains(g)).collect();
                let large = self
                    .thresholds
                    .is_large_pyramid(pos_count as u64, self.facets.len() as u64);
                self.pyramid_store.push(Pyramid {
                    key: on_facet_keys,
                    apex: k,
                    kind: if large { PyramidKind::Recursive } else { PyramidKind::NonRecursive },
                    height: 1,
                    mother_ident: facet.ident,
                    store_level: 0,
                });
                self.total_nr_pyr += 1;
            }
        }

        crate::pivot::pivot_generator(
            &self.ring,
            self.dim,
            &self.generators,
            &mut self.facets,
            k,
            inserted_before,
            striper,
            self.check_overflow,
        )?;
        Ok(())
    }

    fn drain_triangulation(&mut self) {
        let rows = self.generators.rows().to_vec();
        for s in self.triangulation.as_slice() {
            self.evaluator.evaluate(s, &rows);
        }
        self.candidates.extend(self.evaluator.transfer_candidates());
    }

    /// Resolve every queued pyramid, deepest level first (§4.6 step 6).
    /// This implementation supports a single level of recursion: a
    /// pyramid's own sub-cone is always resolved directly rather than
    /// dispatching further pyramids from within it (documented scope
    /// limit, see `DESIGN.md`).
    fn drain_pyramids(&mut self) -> ConeResult<()> {
        while let Some(level) = self.pyramid_store.drain_deepest() {
            for p in level {
                self.process_pyramid(&p)?;
            }
        }
        Ok(())
    }

    /// Enumerate a pyramid's own full-dimensional sub-cone (apex plus the
    /// generators on its mother facet) using the exact same machinery as
    /// the top-level driver, fold its triangulation into the parent's
    /// evaluator, and call `select_supphyps_from` to report back which of
    /// its facets are genuine support hyperplanes of the parent from the
    /// apex's side (§4.3).
    fn process_pyramid(&mut self, p: &Pyramid) -> ConeResult<()> {
        let mut local_keys = p.key.clone();
        local_keys.push(p.apex);

        let rows: Vec<Vec<T>> = local_keys.iter().map(|&g| self.generators.row(g).to_vec()).collect();
        let local = match GeneratorSet::new(&self.ring, self.dim, rows) {
            Ok(g) if g.len() == local_keys.len() && g.check_full_rank(&self.ring).is_ok() => g,
            _ => {
                tracing::debug!(apex = p.apex, "pyramid generators degenerate after intake, skipping");
                return Ok(());
            }
        };

        let local_start = match choose_start_simplex(&self.ring, self.dim, &local) {
            Some(s) => s,
            None => return Ok(()),
        };
        let local_rows: Vec<Vec<T>> = local_start.iter().map(|&k| local.row(k).to_vec()).collect();
        let height = abs_determinant(&self.ring, local_rows);

        let mut local_pool = seed_simplex_facets(&self.ring, self.dim, &local, &local_start);
        let mut local_tri = Triangulation::new();
        local_tri.seed_start_simplex(local_start.clone(), height);

        let mut local_striper = IdentStriper::new(0, 1);
        let mut local_inserted: HashSet<usize> = local_start.iter().copied().collect();
        for kk in 0..local.len() {
            if local_inserted.contains(&kk) {
                continue;
            }
            let gk = local.row(kk).to_vec();
            for f in local_pool.iter_mut() {
                f.val_new_gen = scalar_product(&self.ring, &f.hyp, &gk);
            }
            let visible: Vec<Facet<T>> = local_pool
                .iter()
                .filter(|f| self.ring.sign(&f.val_new_gen) < 0)
                .cloned()
                .collect();
            let refs: Vec<&Facet<T>> = visible.iter().collect();
            local_tri.extend(&self.ring, self.dim, &refs, kk, |_| false);

            crate::pivot::pivot_generator(
                &self.ring,
                self.dim,
                &local,
                &mut local_pool,
                kk,
                local_inserted.len(),
                &mut local_striper,
                self.check_overflow,
            )?;
            local_inserted.insert(kk);
        }

        if self.mode.compute_triangulation {
            let parent_rows = self.generators.rows().to_vec();
            for simplex in local_tri.as_slice() {
                let mapped_key: Vec<usize> = simplex.key.iter().map(|&i| local_keys[i]).collect();
                let mapped = ShortSimplex {
                    key: mapped_key,
                    height: simplex.height.clone(),
                    vol: simplex.vol.clone(),
                };
                self.evaluator.evaluate(&mapped, &parent_rows);
            }
            self.candidates.extend(self.evaluator.transfer_candidates());
        }

        let remapped_facets: Vec<Facet<T>> = local_pool
            .into_vec()
            .into_iter()
            .map(|mut f| {
                let mapped: Vec<usize> = f.gen_in_hyp.iter_ones().map(|i| local_keys[i]).collect();
                let mut gs = GenSet::with_capacity(self.generators.len());
                for idx in mapped {
                    gs.insert(idx);
                }
                f.gen_in_hyp = gs;
                f
            })
            .collect();

        let outside_rows: Vec<Vec<T>> = (0..self.generators.len())
            .filter(|g| !local_keys.contains(g))
            .map(|g| self.generators.row(g).to_vec())
            .collect();
        let outside_refs: Vec<&[T]> = outside_rows.iter().map(|r| r.as_slice()).collect();
        let reported = select_supphyps_from(&self.ring, &remapped_facets, p.apex, &outside_refs);

        tracing::debug!(
            apex = p.apex,
            pyramid_gens = local_keys.len(),
            reported = reported.len(),
            kind = ?p.kind,
            "resolved pyramid"
        );
        Ok(())
    }

    fn post_process(&mut self) -> ConeResult<()> {
        let hyperplanes: Vec<Vec<T>> = self.facets.iter().map(|f| f.hyp.clone()).collect();
        self.pointed = Some(is_pointed(&self.ring, self.dim, &hyperplanes));
        self.computed.support_hyperplanes = true;

        if self.pointed == Some(false) {
            tracing::info!("cone is not pointed; grading-dependent tasks disabled");
        } else {
            self.extreme_flags = Some(extreme_ray_flags(&self.ring, self.dim, &hyperplanes, self.generators.rows()));
            self.computed.extreme_rays = true;
        }

        if self.mode.compute_hilbert_basis {
            let ring = &self.ring;
            let degree = |c: &[T]| -> T {
                let mut s = ring.zero();
                for h in &hyperplanes {
                    s = ring.add(&s, &scalar_product(ring, h, c));
                }
                s
            };
            let basis = reducer::reduce(ring, std::mem::take(&mut self.candidates), &hyperplanes, degree);
            self.hilbert_basis = Some(basis);
            self.computed.hilbert_basis = true;
        }

        if !self.excluded_faces.is_empty() {
            self.excluded_faces_table = Some(extreme_rays::excluded_faces_table(
                &self.ring,
                &self.excluded_faces,
                self.generators.rows(),
            ));
            self.computed.excluded_faces = true;
        }

        if self.mode.compute_multiplicity {
            let fact = factorial(self.dim as i64);
            let num: i64 = self.det_sum().into();
            self.multiplicity = Some(Ratio::new(num, fact));
            self.computed.multiplicity = true;
        }

        if self.mode.compute_degree_1_points {
            if let (Some(grading), Some(basis)) = (self.grading.clone(), &self.hilbert_basis) {
                let ring = &self.ring;
                let pts: Vec<Vec<T>> = basis
                    .iter()
                    .filter(|h| ring.is_1(&scalar_product(ring, &grading, h)))
                    .cloned()
                    .collect();
                self.degree_1_points = Some(pts);
            }
        }

        if self.mode.compute_hilbert_series {
            self.hilbert_series = Some(self.evaluator.hilbert_series_sum());
        }

        if self.mode.compute_triangulation {
            self.computed.triangulation = true;
        }

        if self.mode.inhomogeneous {
            self.check_truncation_and_log_module_data()?;
        }

        Ok(())
    }

    /// Inhomogeneous-mode diagnostics (§9 Open Questions, SPEC_FULL.md §2):
    /// reject a grading with a strictly negative generator (inconsistent
    /// truncation), then compute the recession sublattice's rank
    /// (`module_rank`) and the least positive grading value among affine
    /// generators (`shift`), logging both.
    fn check_truncation_and_log_module_data(&mut self) -> ConeResult<()> {
        let grading = self
            .grading
            .clone()
            .ok_or(ConeError::BadInput(BadInputReason::GradingRequiredButNotDerivable))?;
        let mut recession_rows: Vec<Vec<T>> = Vec::new();
        let mut min_positive: Option<i64> = None;
        for row in self.generators.rows() {
            let v = scalar_product(&self.ring, &grading, row);
            match self.ring.sign(&v) {
                s if s < 0 => return Err(ConeError::BadInput(BadInputReason::InconsistentTruncation)),
                0 => recession_rows.push(row.clone()),
                _ => {
                    let val = self.ring.to_f64(&v) as i64;
                    min_positive = Some(min_positive.map_or(val, |m: i64| m.min(val)));
                }
            }
        }
        let shift = min_positive.ok_or(ConeError::BadInput(BadInputReason::InconsistentTruncation))?;
        let rank = if recession_rows.is_empty() {
            0
        } else {
            rank_destructive(&self.ring, &mut recession_rows)
        };
        self.module_rank = Some(rank);
        self.shift = Some(shift);
        tracing::info!(module_rank = rank, shift, "inhomogeneous module data");
        Ok(())
    }

    // --- getters, read only after compute() ---

    pub fn support_hyperplanes(&self) -> Vec<Vec<T>> {
        self.facets.iter().map(|f| f.hyp.clone()).collect()
    }

    pub fn extreme_ray_flags(&self) -> Option<&[bool]> {
        self.extreme_flags.as_deref()
    }

    pub fn is_pointed(&self) -> Option<bool> {
        self.pointed
    }

    pub fn hilbert_basis(&self) -> Option<&[Vec<T>]> {
        self.hilbert_basis.as_deref()
    }

    pub fn triangulation(&self) -> &[crate::simplex::ShortSimplex<T>] {
        self.triangulation.as_slice()
    }

    pub fn det_sum(&self) -> T {
        self.evaluator.det_sum()
    }

    pub fn grading(&self) -> Option<&[T]> {
        self.grading.as_deref()
    }

    /// `det_sum / dim!`, the GLOSSARY's definition of multiplicity
    /// (§6, §8). `None` unless `mode.compute_multiplicity` was set.
    pub fn multiplicity(&self) -> Option<Ratio<i64>> {
        self.multiplicity
    }

    pub fn degree_1_points(&self) -> Option<&[Vec<T>]> {
        self.degree_1_points.as_deref()
    }

    pub fn hilbert_series(&self) -> Option<&[T]> {
        self.hilbert_series.as_deref()
    }

    /// Rank of the sublattice spanned by grading-0 ("recession")
    /// generators, in inhomogeneous mode only.
    pub fn module_rank(&self) -> Option<usize> {
        self.module_rank
    }

    /// Least strictly positive grading value among "affine" generators,
    /// in inhomogeneous mode only.
    pub fn shift(&self) -> Option<i64> {
        self.shift
    }

    pub fn excluded_faces_table(&self) -> Option<&[(GenSet, i64)]> {
        self.excluded_faces_table.as_deref()
    }
}

fn factorial(n: i64) -> i64 {
    (1..=n).product::<i64>().max(1)
}

fn is_excluded_i64<R, T>(ring: &R, hyp: &[T], order_vec: &[i64]) -> bool
where
    R: IntegerRing<T>,
{
    let hyp_i64: Vec<i64> = hyp.iter().map(|x| ring.to_f64(x) as i64).collect();
    is_excluded(&hyp_i64, order_vec)
}

/// Build the `dim` facets of the simplex spanned by `gens.row(start_keys)`:
/// for each omitted generator, the facet spanned by the other `dim - 1` is
/// the (unique, up to scale) hyperplane through them, oriented positive on
/// the omitted generator. Shared by the driver's own start simplex and by
/// a pyramid's local sub-cone, which is itself full-dimensional (§4.3).
fn seed_simplex_facets<R, T>(ring: &R, dim: usize, gens: &GeneratorSet<T>, start_keys: &[usize]) -> FacetPool<T>
where
    R: IntegerRing<T> + Clone,
    T: Clone + PartialEq + Into<i64>,
{
    let mut facets = FacetPool::new();
    for (omit_pos, &omit_key) in start_keys.iter().enumerate() {
        let mut on: GenSet = GenSet::with_capacity(gens.len());
        let other_rows: Vec<Vec<T>> = start_keys
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != omit_pos)
            .map(|(_, &key)| {
                on.insert(key);
                gens.row(key).to_vec()
            })
            .collect();

        let basis = kernel(&other_rows);
        let mut hyp: Vec<T> = basis
            .into_iter()
            .next()
            .unwrap_or_else(|| vec![0i64; dim])
            .into_iter()
            .map(|x| ring.from_i64(x))
            .collect();

        let omitted_row = gens.row(omit_key).to_vec();
        let v = scalar_product(ring, &hyp, &omitted_row);
        if ring.sign(&v) < 0 {
            for x in hyp.iter_mut() {
                *x = ring.negate(x);
            }
        }
        make_primitive(ring, &mut hyp);

        facets.push(Facet::new(hyp, on, ring.negate(&ring.one()), 0, 0, dim));
    }
    facets
}
