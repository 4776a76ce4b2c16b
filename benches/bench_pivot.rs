use criterion::{criterion_group, criterion_main, Criterion};
use fullcone::facet::{Facet, FacetPool, IdentStriper};
use fullcone::generators::GeneratorSet;
use fullcone::pivot::pivot_generator;
use fullcone::ring_native::NativeIntegerRing;
use fullcone::bitset::GenSet;

/// Build a cross-polytope-style generator set in dimension `dim`: the
/// `dim` unit vectors plus their negations, which forces every insertion
/// past the first `dim` generators through a nontrivial positive/negative
/// split (the case the pivot's thresholds are tuned around, §4.3).
fn cross_polytope_generators(dim: usize) -> Vec<Vec<i64>> {
    let mut gens = Vec::new();
    for i in 0..dim {
        let mut row = vec![0i64; dim];
        row[i] = 1;
        gens.push(row);
    }
    for i in 0..dim {
        let mut row = vec![0i64; dim];
        row[i] = -1;
        gens.push(row);
    }
    gens
}

fn bench_pivot(c: &mut Criterion) {
    let ring = NativeIntegerRing::<i64>::new();
    let dim = 6;
    let raw = cross_polytope_generators(dim);
    let gens = GeneratorSet::new(&ring, dim, raw).unwrap();

    c.bench_function("pivot_generator on cross-polytope-like facets", |b| {
        b.iter(|| {
            let mut pool = FacetPool::new();
            for i in 0..dim {
                let mut on = GenSet::with_capacity(dim);
                for j in 0..dim {
                    if j != i {
                        on.insert(j);
                    }
                }
                pool.push(Facet::new(vec![0i64; dim], on, -1, 0, 0, dim));
            }
            let mut striper = IdentStriper::new(0, 1);
            let _ = pivot_generator(&ring, dim, &gens, &mut pool, dim, dim, &mut striper, false);
        });
    });
}

criterion_group!(benches, bench_pivot);
criterion_main!(benches);
