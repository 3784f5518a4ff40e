//! Thymos Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use thymos_core::prelude::*;
//! ```

// Re-export commonly used types
pub use crate::types::{
    BodyId, Classification, DetectorAlgorithm, DetectorId, MatchOutcome, MatchRule, MhcMode,
    Representation,
};

// Re-export the data-schema contract
pub use crate::schema::{
    Attribute, AttributeKind, DataSchema, FuzzyField, MembershipFunction,
};

// Re-export the field layout and particle machinery
pub use crate::morphology::Morphology;
pub use crate::particle::{BitVector, Particle, ParticleData};

// Re-export error types
pub use crate::error::{Result, ThymosError};
