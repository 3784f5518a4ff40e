//! Data schema — the input contract for raw feature vectors.
//!
//! The data-loading collaborator describes each attribute of its vectors:
//! whether it is active (participates in the particle), categorical or
//! continuous, and — for fuzzy non-crisp matching — its membership
//! functions and threshold. The morphology fails fast at build time when
//! the schema does not fit the requested representation.

use crate::error::{Result, SchemaError, ThymosError};
use serde::{Deserialize, Serialize};

/// A fuzzy membership function over a continuous attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Rises from `a` to peak `b`, falls to `c`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises from `a` to `b`, plateaus to `c`, falls to `d`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    /// Bell around `mean` with width `sigma`.
    Gaussian { mean: f64, sigma: f64 },
}

impl MembershipFunction {
    /// Degree of membership of `x`, in `[0, 1]`.
    pub fn membership(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x <= b {
                    if b > a { (x - a) / (b - a) } else { 1.0 }
                } else if c > b {
                    (c - x) / (c - b)
                } else {
                    1.0
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    if b > a { (x - a) / (b - a) } else { 1.0 }
                } else if x <= c {
                    1.0
                } else if d > c {
                    (d - x) / (d - c)
                } else {
                    1.0
                }
            }
            MembershipFunction::Gaussian { mean, sigma } => {
                if sigma == 0.0 {
                    if x == mean { 1.0 } else { 0.0 }
                } else {
                    (-0.5 * ((x - mean) / sigma).powi(2)).exp()
                }
            }
        }
    }
}

/// Fuzzy annotation of an attribute: its symbol alphabet for detectors.
///
/// Each membership function is one symbol a detector can carry at the
/// attribute's particle position; a position matches when the symbol's
/// membership, evaluated at the observed value, exceeds the threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyField {
    pub sets: Vec<MembershipFunction>,
    pub threshold: f64,
}

/// Whether an attribute carries category codes or arbitrary reals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeKind {
    /// Integer-coded categories `0..categories`.
    Categorical { categories: usize },
    /// Arbitrary real values.
    Continuous,
}

/// One attribute of the raw feature vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    /// Inactive attributes are skipped by the morphology.
    pub active: bool,
    pub kind: AttributeKind,
    /// Required for fuzzy non-crisp matching.
    pub fuzzy: Option<FuzzyField>,
}

impl Attribute {
    pub fn categorical(name: impl Into<String>, categories: usize) -> Self {
        Self {
            name: name.into(),
            active: true,
            kind: AttributeKind::Categorical { categories },
            fuzzy: None,
        }
    }

    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            kind: AttributeKind::Continuous,
            fuzzy: None,
        }
    }

    pub fn with_fuzzy(mut self, sets: Vec<MembershipFunction>, threshold: f64) -> Self {
        self.fuzzy = Some(FuzzyField { sets, threshold });
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Schema of the raw feature vectors: one entry per vector position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSchema {
    pub attributes: Vec<Attribute>,
    /// Supervised goal attribute, if any. Class 0 is the self class.
    /// Must not be active.
    pub goal: Option<usize>,
}

impl DataSchema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes,
            goal: None,
        }
    }

    pub fn with_goal(mut self, goal: usize) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Indices of the active attributes, in schema order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.active)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of vector positions an instance must provide.
    pub fn width(&self) -> usize {
        self.attributes.len()
    }

    /// Structural checks independent of the representation.
    pub fn validate(&self) -> Result<()> {
        if self.active_indices().is_empty() {
            return Err(ThymosError::Schema(SchemaError::NoActiveAttributes));
        }
        if let Some(goal) = self.goal {
            if goal >= self.attributes.len() {
                return Err(ThymosError::Schema(SchemaError::GoalOutOfRange(goal)));
            }
            if self.attributes[goal].active {
                return Err(ThymosError::Schema(SchemaError::GoalActive(goal)));
            }
        }
        Ok(())
    }
}
