//! Random detector generation — negative selection by rejection.
//!
//! Randomize a fresh candidate, test it against every self particle, and
//! keep it only when nothing matches at the body's match length. A slot
//! that exhausts its retry budget is abandoned with a warning; the caller
//! sees the shortfall in the report. Expected cost grows quickly as the
//! self set covers more of the particle space — requests beyond the
//! accessible non-self volume are best-effort by design.

use crate::detector::Detector;
use crate::report::GenerationReport;
use rand::rngs::StdRng;
use thymos_core::error::Result;
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use tracing::{debug, warn};

/// Attempts per detector slot before giving up on it.
pub const DEFAULT_MAX_TRIES: usize = 1000;

/// Rejection-sampling generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomGenerator {
    pub max_tries: usize,
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
        }
    }
}

impl RandomGenerator {
    pub fn new(max_tries: usize) -> Self {
        Self { max_tries }
    }

    /// Generate up to `target` censored detectors.
    ///
    /// Self particles are the receivers of the match test, so fuzzy
    /// non-crisp candidates are evaluated against observed values the
    /// same way classification evaluates antigens.
    pub fn generate(
        &self,
        morphology: &Morphology,
        selves: &[Particle],
        match_length: usize,
        target: usize,
        rng: &mut StdRng,
    ) -> Result<(Vec<Detector>, GenerationReport)> {
        let mut detectors = Vec::with_capacity(target);
        let mut candidates_tried: u64 = 0;

        'slots: for slot in 0..target {
            for _ in 0..self.max_tries {
                let candidate = Particle::random_detector(morphology, rng);
                candidates_tried += 1;
                if Self::survives_censoring(&candidate, morphology, selves, match_length)? {
                    detectors.push(Detector::new(candidate));
                    continue 'slots;
                }
            }
            warn!(slot, max_tries = self.max_tries, "detector slot abandoned");
        }

        let report = GenerationReport {
            requested: target,
            generated: detectors.len(),
            candidates_tried,
            space_size: None,
        };
        if report.shortfall() > 0 {
            warn!(
                requested = report.requested,
                generated = report.generated,
                "random generation fell short of the requested detector count"
            );
        } else {
            debug!(
                generated = report.generated,
                candidates_tried, "random generation complete"
            );
        }
        Ok((detectors, report))
    }

    fn survives_censoring(
        candidate: &Particle,
        morphology: &Morphology,
        selves: &[Particle],
        match_length: usize,
    ) -> Result<bool> {
        for own in selves {
            if own.matches(candidate, morphology, match_length)?.matched {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use thymos_core::schema::{Attribute, DataSchema};
    use thymos_core::types::{MhcMode, Representation};

    fn bit_morphology(attrs: usize) -> Morphology {
        let schema = DataSchema::new(
            (0..attrs)
                .map(|i| Attribute::categorical(format!("b{}", i), 2))
                .collect(),
        );
        let mut rng = StdRng::seed_from_u64(0);
        Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng).unwrap()
    }

    #[test]
    fn generated_detectors_never_match_self() {
        let m = bit_morphology(8);
        let own = Particle::compile(&m, &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
        let selves = vec![own.clone()];

        let mut rng = StdRng::seed_from_u64(11);
        let (detectors, report) = RandomGenerator::default()
            .generate(&m, &selves, 4, 5, &mut rng)
            .unwrap();

        assert_eq!(report.generated, detectors.len());
        for detector in &detectors {
            let outcome = own.matches(detector.particle(), &m, 4).unwrap();
            assert!(!outcome.matched, "detector agrees with self in a 4-bit window");
        }
    }

    #[test]
    fn impossible_request_reports_shortfall() {
        // Self set covers both values of a single boolean attribute, so no
        // candidate can survive censoring at match length 1.
        let m = bit_morphology(1);
        let selves = vec![
            Particle::compile(&m, &[0.0]).unwrap(),
            Particle::compile(&m, &[1.0]).unwrap(),
        ];

        let mut rng = StdRng::seed_from_u64(3);
        let (detectors, report) = RandomGenerator::new(50)
            .generate(&m, &selves, 1, 2, &mut rng)
            .unwrap();

        assert!(detectors.is_empty());
        assert_eq!(report.shortfall(), 2);
        assert_eq!(report.candidates_tried, 100);
    }

    #[test]
    fn empty_self_set_accepts_everything() {
        let m = bit_morphology(4);
        let mut rng = StdRng::seed_from_u64(9);
        let (detectors, report) = RandomGenerator::default()
            .generate(&m, &[], 2, 3, &mut rng)
            .unwrap();
        assert_eq!(detectors.len(), 3);
        assert_eq!(report.candidates_tried, 3);
        assert!(report.is_complete());
    }
}
