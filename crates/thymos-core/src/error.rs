//! Error types for Thymos operations.
//!
//! Provides structured error handling instead of panics.

use std::error::Error;
use std::fmt;

/// Result type for Thymos operations.
pub type Result<T> = std::result::Result<T, ThymosError>;

/// Errors that can occur during Thymos operations.
#[derive(Debug, Clone)]
pub enum ThymosError {
    /// Data-schema errors.
    Schema(SchemaError),
    /// Configuration errors.
    Config(ConfigError),
    /// Particle compilation/matching errors.
    Particle(ParticleError),
    /// Capacity and overflow errors from detector generation.
    Capacity(CapacityError),
    /// Lifecycle errors (train/classify ordering).
    State(StateError),
    /// I/O errors (wrapped).
    Io(String),
    /// Serialization errors.
    Serialization(String),
}

impl fmt::Display for ThymosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThymosError::Schema(e) => write!(f, "Schema error: {}", e),
            ThymosError::Config(e) => write!(f, "Config error: {}", e),
            ThymosError::Particle(e) => write!(f, "Particle error: {}", e),
            ThymosError::Capacity(e) => write!(f, "Capacity error: {}", e),
            ThymosError::State(e) => write!(f, "State error: {}", e),
            ThymosError::Io(msg) => write!(f, "I/O error: {}", msg),
            ThymosError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for ThymosError {}

impl From<std::io::Error> for ThymosError {
    fn from(e: std::io::Error) -> Self {
        ThymosError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for ThymosError {
    fn from(e: serde_json::Error) -> Self {
        ThymosError::Serialization(e.to_string())
    }
}

/// Data-schema errors.
#[derive(Debug, Clone)]
pub enum SchemaError {
    /// Bit or crisp-fuzzy mode needs a categorical attribute.
    NonCategorical(String),
    /// Non-crisp fuzzy mode needs a fuzzy annotation on every active attribute.
    MissingFuzzy(String),
    /// No active attributes — nothing to compile a particle from.
    NoActiveAttributes,
    /// The goal attribute must not be active.
    GoalActive(usize),
    /// The goal attribute index is out of range.
    GoalOutOfRange(usize),
    /// Presenter rows do not match the schema width.
    WidthMismatch { expected: usize, found: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NonCategorical(name) => {
                write!(f, "Attribute '{}' must be categorical in this mode", name)
            }
            SchemaError::MissingFuzzy(name) => {
                write!(f, "Attribute '{}' has no fuzzy annotation", name)
            }
            SchemaError::NoActiveAttributes => write!(f, "Schema has no active attributes"),
            SchemaError::GoalActive(idx) => {
                write!(f, "Goal attribute {} must not be active", idx)
            }
            SchemaError::GoalOutOfRange(idx) => {
                write!(f, "Goal attribute index {} is out of range", idx)
            }
            SchemaError::WidthMismatch { expected, found } => {
                write!(f, "Instance width mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Only the contiguous match rule is supported.
    UnsupportedMatchRule(String),
    /// Tabular generation is defined for the fuzzy representation only.
    TabularRequiresFuzzy,
    /// Invalid value.
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsupportedMatchRule(rule) => {
                write!(f, "Unsupported match rule: {}", rule)
            }
            ConfigError::TabularRequiresFuzzy => {
                write!(f, "Tabular generation requires the fuzzy representation")
            }
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value for {}: {} ({})", field, value, reason)
            }
        }
    }
}

/// Particle compilation and matching errors.
#[derive(Debug, Clone)]
pub enum ParticleError {
    /// Particles of different lengths cannot be matched.
    LengthMismatch { left: usize, right: usize },
    /// A bit-string particle cannot be matched against a fuzzy one.
    RepresentationMismatch,
    /// The raw vector is shorter than the attributes the morphology maps.
    VectorTooShort { needed: usize, found: usize },
}

impl fmt::Display for ParticleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleError::LengthMismatch { left, right } => {
                write!(f, "Particle length mismatch: {} vs {}", left, right)
            }
            ParticleError::RepresentationMismatch => {
                write!(f, "Cannot match bit-string against fuzzy particle")
            }
            ParticleError::VectorTooShort { needed, found } => {
                write!(f, "Vector too short: needs {} attributes, found {}", needed, found)
            }
        }
    }
}

/// Capacity and overflow errors from the tabular generator.
#[derive(Debug, Clone)]
pub enum CapacityError {
    /// A schema-count table would exceed the in-memory entry limit.
    TableTooLarge { entries: u128, limit: usize },
    /// Schema counting overflowed the integer range.
    AlgorithmOverflow { window: usize },
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::TableTooLarge { entries, limit } => {
                write!(f, "Schema table needs {} entries (limit {})", entries, limit)
            }
            CapacityError::AlgorithmOverflow { window } => {
                write!(f, "Detector count overflow at window {}", window)
            }
        }
    }
}

/// Lifecycle errors.
#[derive(Debug, Clone)]
pub enum StateError {
    /// classify() called before a successful train().
    NotTrained,
    /// train() called a second time; re-init the body instead.
    AlreadyTrained,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NotTrained => write!(f, "Body is not trained"),
            StateError::AlreadyTrained => {
                write!(f, "Body is already trained; re-init before training again")
            }
        }
    }
}

// Convenience constructors
impl ThymosError {
    pub fn non_categorical(name: impl Into<String>) -> Self {
        ThymosError::Schema(SchemaError::NonCategorical(name.into()))
    }

    pub fn missing_fuzzy(name: impl Into<String>) -> Self {
        ThymosError::Schema(SchemaError::MissingFuzzy(name.into()))
    }

    pub fn length_mismatch(left: usize, right: usize) -> Self {
        ThymosError::Particle(ParticleError::LengthMismatch { left, right })
    }

    pub fn unsupported_match_rule(rule: impl Into<String>) -> Self {
        ThymosError::Config(ConfigError::UnsupportedMatchRule(rule.into()))
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ThymosError::Config(ConfigError::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}
