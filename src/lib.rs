//! A primal enumeration engine for rational polyhedral cones.
//!
//! Given a set of integer generator vectors, [`full_cone::FullCone`]
//! incrementally builds the cone they span: it discovers support
//! hyperplanes by a Fourier–Motzkin-style pivot ([`pivot`]), maintains a
//! triangulation into simplicial sub-cones ([`simplex`]), descends into
//! sub-cone "pyramids" when the pairing cost would explode ([`pyramid`]),
//! and drives a caller-supplied [`evaluator::SimplexEvaluator`] over each
//! simplex to collect volume, Hilbert-basis candidates, and series
//! contributions. A [`reducer`] then collapses the accumulated candidates
//! to a minimal Hilbert basis, and [`extreme_rays`] classifies which
//! generators are extreme and whether the cone is pointed.
//!
//! The engine is generic over the integer representation via the
//! [`ring::IntegerRing`] trait: instantiate it with
//! [`ring_native::NativeIntegerRing`] for speed, or
//! [`ring_native::BigIntRing`] when a fixed-width pivot might overflow.
//!
//! # Example
//!
//! ```
//! use fullcone::evaluator::ReferenceEvaluator;
//! use fullcone::full_cone::{ComputationMode, FullCone};
//! use fullcone::ring_native::NativeIntegerRing;
//!
//! let ring = NativeIntegerRing::<i64>::new();
//! let generators = vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]];
//! let mode = ComputationMode {
//!     compute_triangulation: true,
//!     keep_triangulation: true,
//!     compute_hilbert_basis: true,
//!     ..Default::default()
//! };
//! let evaluator = ReferenceEvaluator::new(ring);
//! let mut cone = FullCone::new(ring, 3, generators, mode, evaluator).unwrap();
//! cone.compute().unwrap();
//! // (1,1,1) lies in the interior of the orthant spanned by the unit
//! // vectors, so the cone still has exactly the three coordinate facets.
//! assert_eq!(cone.support_hyperplanes().len(), 3);
//! ```

pub mod bitset;
pub mod error;
pub mod evaluator;
pub mod extreme_rays;
pub mod facet;
pub mod full_cone;
pub mod generators;
pub mod matrix;
pub mod pivot;
pub mod pyramid;
pub mod reducer;
pub mod ring;
pub mod ring_native;
pub mod simplex;
pub mod start_simplex;

pub use error::{BadInputReason, ConeError, ConeResult};
pub use full_cone::{ComputationMode, ComputedFlags, FullCone};
