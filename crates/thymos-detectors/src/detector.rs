//! Detector — a particle that survived negative selection.
//!
//! Besides its particle content, a detector carries the state an online
//! immune-response loop mutates: per-position activation, an aggregate
//! activation level, age, and an idle counter. Generation initializes all
//! of it to zero and marks the detector mature; only an external response
//! loop drives reinforcement and decay.

use serde::{Deserialize, Serialize};
use thymos_core::particle::Particle;
use thymos_core::types::DetectorId;

/// A long-lived detector inside a [`crate::DetectorSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detector {
    pub id: DetectorId,
    particle: Particle,
    /// Whether self-censoring passed. Immature detectors never match.
    pub mature: bool,
    /// Response-loop ticks survived.
    pub age: u64,
    /// Aggregate activation accumulated by the response loop.
    pub activation: f64,
    /// Ticks between re-evaluations in the response loop.
    pub match_period: u64,
    /// Per-position activation levels.
    pub act: Vec<f64>,
    /// Ticks since the last reinforcement.
    pub idle: u64,
}

impl Detector {
    /// Wrap a censored particle as a mature detector with zeroed
    /// response state.
    pub fn new(particle: Particle) -> Self {
        let len = particle.len();
        Self {
            id: DetectorId::new(),
            particle,
            mature: true,
            age: 0,
            activation: 0.0,
            match_period: 0,
            act: vec![0.0; len],
            idle: 0,
        }
    }

    /// Deterministic-ID variant (for testing).
    pub fn with_seed(particle: Particle, seed: u64) -> Self {
        let mut detector = Self::new(particle);
        detector.id = DetectorId::from_seed(seed);
        detector
    }

    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub fn len(&self) -> usize {
        self.particle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particle.is_empty()
    }

    /// Reinforce the activation at one particle position.
    pub fn reinforce(&mut self, position: usize, amount: f64) {
        self.act[position] += amount;
        self.activation += amount;
        self.idle = 0;
    }

    /// Decay all activation by `rate` and advance the idle counter.
    pub fn decay(&mut self, rate: f64) {
        let keep = (1.0 - rate).clamp(0.0, 1.0);
        for a in &mut self.act {
            *a *= keep;
        }
        self.activation *= keep;
        self.idle += 1;
        self.age += 1;
    }

    /// Whether accumulated activation crossed the response threshold.
    pub fn over_activated(&self, threshold: f64) -> bool {
        self.activation > threshold
    }
}
