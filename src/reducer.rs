//! Global Hilbert basis reducer (component H, spec §4.5).
//!
//! Candidates are processed in norm order, smallest first, the way the
//! teacher crate's binary heap (`utilities::heaps::heap`) processes
//! user-ranked items: a min-structure keyed by a caller-supplied order,
//! here the degree `δ·c` rather than an arbitrary comparator. Unlike the
//! teacher's heap this reducer needs the *whole* sorted run at once (to
//! find the norm-doubling prefix), so it sorts a `Vec` once up front
//! instead of maintaining a live heap.

use crate::ring::IntegerRing;

/// Reduce `candidates` against `hyperplanes` to a minimal generating
/// subset, per §4.5.
///
/// `degree` assigns each candidate a positive integer; callers derive it
/// either from an explicit grading or — per step 1 of the algorithm —
/// from the sum of all (primitivized) support hyperplane normals.
pub fn reduce<R, T>(
    ring: &R,
    candidates: Vec<Vec<T>>,
    hyperplanes: &[Vec<T>],
    degree: impl Fn(&[T]) -> T,
) -> Vec<Vec<T>>
where
    R: IntegerRing<T>,
    T: Clone + PartialEq,
{
    let mut scored: Vec<(T, Vec<T>)> = candidates
        .into_iter()
        .map(|c| {
            let d = degree(&c);
            (d, c)
        })
        .collect();
    scored.sort_by(|a, b| ring.compare(&a.0, &b.0));

    let mut basis: Vec<Vec<T>> = Vec::new();
    let mut reducers: Vec<Vec<T>> = Vec::new(); // S·h for each h already in the basis
    let mut remaining: std::collections::VecDeque<(T, Vec<T>)> = scored.into();

    while let Some((front_norm, _)) = remaining.front().cloned() {
        let two_front = ring.add(&front_norm, &front_norm);
        // move the whole prefix with norm < 2 * front_norm into the basis
        let mut moved = Vec::new();
        while let Some((n, _)) = remaining.front() {
            if ring.compare(n, &two_front) != std::cmp::Ordering::Less {
                break;
            }
            let (_, v) = remaining.pop_front().unwrap();
            moved.push(v);
        }
        for h in moved {
            let sh: Vec<T> = hyperplanes
                .iter()
                .map(|hyp| crate::matrix::scalar_product(ring, hyp, &h))
                .collect();
            reducers.push(sh);
            basis.push(h);
        }

        // filter the rest against the newly expanded reducer set
        let mut survivors = std::collections::VecDeque::new();
        'outer: while let Some((n, c)) = remaining.pop_front() {
            let sc: Vec<T> = hyperplanes
                .iter()
                .map(|hyp| crate::matrix::scalar_product(ring, hyp, &c))
                .collect();
            for (ri, r) in reducers.iter().enumerate() {
                if r.iter().zip(sc.iter()).all(|(a, b)| ring.compare(a, b) != std::cmp::Ordering::Greater) {
                    // c is reducible; bump the matching reducer to the
                    // front for locality, per §4.5 step 5.
                    if ri != 0 {
                        reducers.swap(0, ri);
                    }
                    continue 'outer;
                }
            }
            survivors.push_back((n, c));
        }
        remaining = survivors;
    }

    basis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring_native::NativeIntegerRing;

    #[test]
    fn reduces_s6_scenario_to_the_two_unit_vectors() {
        let ring = NativeIntegerRing::<i64>::new();
        let candidates = vec![
            vec![1i64, 0],
            vec![0, 1],
            vec![1, 1],
            vec![2, 1],
            vec![1, 2],
        ];
        let hyperplanes = vec![vec![1i64, 0], vec![0, 1]];
        let degree = |c: &[i64]| c.iter().sum();
        let mut basis = reduce(&ring, candidates, &hyperplanes, degree);
        basis.sort();
        assert_eq!(basis, vec![vec![0, 1], vec![1, 0]]);
    }
}
