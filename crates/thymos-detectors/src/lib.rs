//! # Thymos Detectors
//!
//! Detector entities and the two negative-selection generation strategies:
//!
//! - **Random** — rejection sampling: randomize a candidate, censor it
//!   against every self particle, keep it only if nothing matched
//!   (fixed retry cap per slot, shortfall reported, never raised)
//! - **Tabular** — dynamic-programming schema counting over the fuzzy
//!   symbol space, then uniform unranking of distinct indices into
//!   explicit detectors without materializing the space

pub mod detector;
pub mod prelude;
pub mod random;
pub mod report;
pub mod set;
pub mod tabular;

pub use detector::Detector;
pub use random::RandomGenerator;
pub use report::GenerationReport;
pub use set::DetectorSet;
pub use tabular::{TabularGenerator, TabularTarget};
