//! DetectorSet — the detector population owned by one body.

use crate::detector::Detector;
use serde::{Deserialize, Serialize};
use thymos_core::error::Result;
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use thymos_core::prelude::ThymosError;

/// An owned collection of detectors, all of one particle length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorSet {
    particle_length: usize,
    detectors: Vec<Detector>,
}

impl DetectorSet {
    pub fn new(particle_length: usize) -> Self {
        Self {
            particle_length,
            detectors: Vec::new(),
        }
    }

    pub fn particle_length(&self) -> usize {
        self.particle_length
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    pub fn detectors(&self) -> &[Detector] {
        &self.detectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detector> {
        self.detectors.iter()
    }

    /// Add a detector, enforcing the shared-length invariant.
    pub fn push(&mut self, detector: Detector) -> Result<()> {
        if detector.len() != self.particle_length {
            return Err(ThymosError::length_mismatch(
                self.particle_length,
                detector.len(),
            ));
        }
        self.detectors.push(detector);
        Ok(())
    }

    /// Extend with generated detectors, enforcing the length invariant.
    pub fn extend(&mut self, detectors: Vec<Detector>) -> Result<()> {
        for detector in detectors {
            self.push(detector)?;
        }
        Ok(())
    }

    /// First mature detector the particle matches at `match_length`, if any.
    pub fn match_any(
        &self,
        particle: &Particle,
        morphology: &Morphology,
        match_length: usize,
    ) -> Result<Option<&Detector>> {
        for detector in &self.detectors {
            if !detector.mature {
                continue;
            }
            let outcome = particle.matches(detector.particle(), morphology, match_length)?;
            if outcome.matched {
                return Ok(Some(detector));
            }
        }
        Ok(None)
    }
}
