//! # Thymos
//!
//! A negative-selection artificial immune system for anomaly detection.
//!
//! Thymos learns a boundary around a "self" population of feature
//! vectors and flags novel vectors as non-self: training generates a
//! population of detectors guaranteed not to match any self example,
//! and classification tests new vectors against that population — the
//! computational analog of T-cell maturation in the thymus.
//!
//! ## Quick Start
//!
//! ```rust
//! use thymos::prelude::*;
//!
//! // Describe the feature vectors
//! let schema = DataSchema::new(vec![
//!     Attribute::categorical("proto", 2),
//!     Attribute::categorical("flags", 2),
//!     Attribute::categorical("state", 2),
//!     Attribute::categorical("dir", 2),
//! ]);
//!
//! // Configure and train a body on normal traffic
//! let config = BodyConfig {
//!     representation: Representation::Bit,
//!     match_length: 3,
//!     detector_target: 8,
//!     seed: Some(42),
//!     ..BodyConfig::default()
//! };
//! let mut body = Body::init(config, schema.clone()).unwrap();
//! let normal = VecPresenter::new(schema, vec![vec![0.0, 0.0, 1.0, 1.0]]).unwrap();
//! body.train(&normal).unwrap();
//!
//! // Classify: 0 is self, 1 is non-self
//! let verdict = body.classify(&[0.0, 0.0, 1.0, 1.0]).unwrap();
//! assert_eq!(verdict.label(), 0);
//! ```
//!
//! ## Architecture
//!
//! Thymos is organized into three crates:
//!
//! - [`thymos_core`] — schema, morphology (field layout, MHC
//!   reordering), particles, and the contiguous matching rule
//! - [`thymos_detectors`] — detector entities and the two generation
//!   strategies (rejection sampling and tabular counting/unranking)
//! - [`thymos_body`] — the train/classify lifecycle and session
//!   persistence

pub use thymos_body;
pub use thymos_core;
pub use thymos_detectors;

/// Convenient imports for common usage.
pub mod prelude {
    pub use thymos_body::prelude::*;
}
