//! Session persistence — save/load a trained body.
//!
//! Serializes the configuration, schema, morphology, self set, and
//! detector set to JSON. A restored body is immediately in the trained
//! state and must classify a fixed batch bit-identically to the body it
//! was saved from.

use crate::body::{Body, BodyConfig, BodyState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thymos_core::error::Result;
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use thymos_core::schema::DataSchema;
use thymos_core::types::BodyId;
use thymos_detectors::DetectorSet;

/// Serializable snapshot of a trained body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub config: BodyConfig,
    pub schema: DataSchema,
    pub morphology: Morphology,
    pub selves: Vec<Particle>,
    pub detectors: DetectorSet,
    pub metadata: SessionMetadata,
}

/// Session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    pub body_id: BodyId,
    pub self_count: usize,
    pub detector_count: usize,
    pub particle_length: usize,
    /// Effective (clamped) match length the body classifies with.
    pub match_length: usize,
}

impl Body {
    /// Export the body's trained state.
    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            config: self.config.clone(),
            schema: self.schema.clone(),
            morphology: self.morphology.clone(),
            selves: self.selves.clone(),
            detectors: self.detectors.clone(),
            metadata: SessionMetadata {
                body_id: self.id,
                self_count: self.selves.len(),
                detector_count: self.detectors.len(),
                particle_length: self.morphology.particle_length(),
                match_length: self.match_length,
            },
        }
    }

    /// Rebuild a trained body from a snapshot.
    ///
    /// The generator is reseeded from the configuration; classification
    /// never draws from it, so restored classify() results are identical.
    pub fn from_snapshot(snapshot: BodySnapshot) -> Body {
        let rng = match snapshot.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Body {
            id: snapshot.metadata.body_id,
            config: snapshot.config,
            schema: snapshot.schema,
            morphology: snapshot.morphology,
            selves: snapshot.selves,
            detectors: snapshot.detectors,
            state: BodyState::Trained,
            match_length: snapshot.metadata.match_length,
            rng,
        }
    }
}

/// Save a trained body to a JSON file.
pub fn save_body(body: &Body, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&body.snapshot())?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a trained body from a JSON file.
pub fn load_body(path: &Path) -> Result<Body> {
    let json = fs::read_to_string(path)?;
    let snapshot: BodySnapshot = serde_json::from_str(&json)?;
    Ok(Body::from_snapshot(snapshot))
}
