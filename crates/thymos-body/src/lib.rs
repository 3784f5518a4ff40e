//! # Thymos Body
//!
//! The body is the classifier: it owns a morphology, a self set, and a
//! detector set, and exposes the train/classify lifecycle. Training
//! compiles every self instance through the morphology and delegates to
//! the configured detector-generation strategy; classification compiles
//! an antigen and asks the detector set whether anything recognizes it.
//!
//! ## Quick Start
//!
//! ```rust
//! use thymos_body::prelude::*;
//!
//! let schema = DataSchema::new(vec![
//!     Attribute::categorical("a", 2),
//!     Attribute::categorical("b", 2),
//!     Attribute::categorical("c", 2),
//!     Attribute::categorical("d", 2),
//! ]);
//! let config = BodyConfig {
//!     representation: Representation::Bit,
//!     match_length: 3,
//!     detector_target: 4,
//!     seed: Some(42),
//!     ..BodyConfig::default()
//! };
//!
//! let mut body = Body::init(config, schema.clone()).unwrap();
//! let presenter = VecPresenter::new(schema, vec![vec![0.0, 0.0, 1.0, 1.0]]).unwrap();
//! body.train(&presenter).unwrap();
//!
//! let verdict = body.classify(&[0.0, 0.0, 1.0, 1.0]).unwrap();
//! assert_eq!(verdict.label(), 0); // the trained self vector stays self
//! ```

pub mod body;
pub mod prelude;
pub mod presenter;
pub mod session;

pub use body::{Body, BodyConfig, TrainingReport};
pub use presenter::{InstancePresenter, VecPresenter};
pub use session::{load_body, save_body, BodySnapshot, SessionMetadata};
