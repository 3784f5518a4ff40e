//! Shared types used across all Thymos crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a body (one trained classifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a deterministic ID (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(seed, seed))
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectorId(pub Uuid);

impl DetectorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a deterministic ID (for testing).
    pub fn from_seed(seed: u64) -> Self {
        Self(Uuid::from_u64_pair(seed, seed))
    }
}

impl Default for DetectorId {
    fn default() -> Self {
        Self::new()
    }
}

/// The internal particle representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representation {
    /// Categorical attributes expanded into bit positions.
    Bit,
    /// One real-valued particle position per attribute.
    Fuzzy,
}

/// MHC reordering mode for the morphology's field positions.
///
/// Analogous to MHC diversity in biological immune systems: a random
/// permutation decorrelates adjacent particle positions from
/// semantically adjacent attributes (experimental gene shuffling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MhcMode {
    /// Field positions keep their construction order.
    None,
    /// Field positions are uniformly randomly permuted once, at build time.
    Random,
}

/// The matching rule between two particles.
///
/// Only contiguous matching is defined; the enum exists so the
/// configuration round-trips through persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchRule {
    /// Score by position-wise agreement within a window of `match_length`.
    Contiguous,
}

/// Which detector-generation strategy a body uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorAlgorithm {
    /// Rejection sampling: randomize, censor against self, repeat.
    Random,
    /// Dynamic-programming schema counting with uniform unranking (fuzzy only).
    Tabular,
}

/// Classification result from negative selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Normal — no detector recognized the antigen.
    IsSelf,
    /// Anomalous — a detector matched, with this degree (0.0-1.0).
    NonSelf(f64),
}

impl Classification {
    /// Class label: 0 for self, 1 for non-self.
    pub fn label(&self) -> u8 {
        match self {
            Classification::IsSelf => 0,
            Classification::NonSelf(_) => 1,
        }
    }

    /// Confidence array with 1.0 at the chosen class index.
    pub fn confidence(&self) -> [f64; 2] {
        match self {
            Classification::IsSelf => [1.0, 0.0],
            Classification::NonSelf(_) => [0.0, 1.0],
        }
    }

    pub fn is_non_self(&self) -> bool {
        matches!(self, Classification::NonSelf(_))
    }
}

/// Outcome of matching one particle against another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    /// Bit particles: length of the longest run of agreeing positions.
    /// Fuzzy particles: best windowed sum of per-position match values.
    pub score: f64,
    /// Start of the winning run/window.
    pub position: usize,
    /// Whether the score reached the required match length.
    pub matched: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_ids_are_deterministic() {
        assert_eq!(BodyId::from_seed(42), BodyId::from_seed(42));
        assert_ne!(DetectorId::from_seed(1), DetectorId::from_seed(2));
    }

    #[test]
    fn classification_labels_and_confidence() {
        assert_eq!(Classification::IsSelf.label(), 0);
        assert_eq!(Classification::NonSelf(1.0).label(), 1);
        assert_eq!(Classification::IsSelf.confidence(), [1.0, 0.0]);
        assert_eq!(Classification::NonSelf(0.5).confidence(), [0.0, 1.0]);
        assert!(Classification::NonSelf(0.5).is_non_self());
    }
}
