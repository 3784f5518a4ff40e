//! Thymos Detectors Prelude — convenient imports for common usage.
//!
//! ```rust
//! use thymos_detectors::prelude::*;
//! ```

pub use crate::detector::Detector;
pub use crate::random::{RandomGenerator, DEFAULT_MAX_TRIES};
pub use crate::report::GenerationReport;
pub use crate::set::DetectorSet;
pub use crate::tabular::{TabularGenerator, TabularTarget, MAX_TABLE_ENTRIES};
