//! # Thymos Core
//!
//! Core types for the Thymos negative-selection immune classifier.
//!
//! In the thymus, developing T-cells are exposed to the body's own
//! proteins. Any cell that reacts to self is destroyed; the survivors
//! react only to what the body has never seen. Thymos applies the same
//! idea to anomaly detection: it compiles a training population into
//! **self particles**, generates **detectors** censored against that
//! population, and flags any vector a detector recognizes as non-self.
//!
//! This crate holds the pieces everything else is built from:
//!
//! - **Schema** — per-attribute description of the input vectors
//!   (categorical/continuous, fuzzy membership annotation)
//! - **Morphology** — the field layout mapping raw attributes onto
//!   particle positions, with optional MHC reordering
//! - **Particle** — the internal representation (bit-string or fuzzy)
//!   and the contiguous matching rule
//!
//! ## Quick Start
//!
//! ```rust
//! use thymos_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let schema = DataSchema::new(vec![
//!     Attribute::categorical("proto", 4),
//!     Attribute::categorical("flags", 8),
//! ]);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let morphology =
//!     Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng).unwrap();
//! let particle = Particle::compile(&morphology, &[2.0, 5.0]).unwrap();
//! assert_eq!(particle.len(), morphology.particle_length());
//! ```

pub mod error;
pub mod morphology;
pub mod particle;
pub mod prelude;
pub mod schema;
pub mod types;
