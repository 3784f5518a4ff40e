//! Thymos Body Prelude — convenient imports for common usage.
//!
//! ```rust
//! use thymos_body::prelude::*;
//! ```

pub use crate::body::{Body, BodyConfig, TrainingReport};
pub use crate::presenter::{InstancePresenter, VecPresenter};
pub use crate::session::{load_body, save_body, BodySnapshot, SessionMetadata};

// The core vocabulary a body's caller needs.
pub use thymos_core::prelude::*;
pub use thymos_detectors::prelude::*;
