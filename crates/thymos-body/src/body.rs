//! Body — the trainable negative-selection classifier.
//!
//! Lifecycle: `init` builds the morphology and validates the
//! configuration against the schema, `train` compiles the self set and
//! generates detectors (once per configuration), and `classify` is a
//! read-only query afterwards. Re-training requires a fresh `init`.
//!
//! All randomness flows through one owned generator seeded from the
//! configuration, so a seeded body trains reproducibly.

use crate::presenter::InstancePresenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thymos_core::error::{Result, SchemaError, StateError, ThymosError};
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use thymos_core::schema::DataSchema;
use thymos_core::types::{
    BodyId, Classification, DetectorAlgorithm, MatchRule, MhcMode, Representation,
};
use thymos_detectors::{
    DetectorSet, GenerationReport, RandomGenerator, TabularGenerator, TabularTarget,
    random::DEFAULT_MAX_TRIES,
};
use tracing::{debug, warn};

/// Configuration of one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub representation: Representation,
    pub match_rule: MatchRule,
    /// Required contiguous agreement. Values beyond the particle length
    /// are clamped at init, not rejected.
    pub match_length: usize,
    /// Fuzzy mode: exact per-position equality instead of membership.
    pub crisp: bool,
    pub mhc: MhcMode,
    pub algorithm: DetectorAlgorithm,
    /// How many detectors to generate.
    pub detector_target: usize,
    /// Tabular only: draw this fraction of the counted space instead of
    /// `detector_target`.
    pub tabular_fraction: Option<f64>,
    /// Retry budget per random-generation slot.
    pub max_tries: usize,
    /// Seed for reproducible training.
    pub seed: Option<u64>,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            representation: Representation::Fuzzy,
            match_rule: MatchRule::Contiguous,
            match_length: 2,
            crisp: true,
            mhc: MhcMode::None,
            algorithm: DetectorAlgorithm::Random,
            detector_target: 10,
            tabular_fraction: None,
            max_tries: DEFAULT_MAX_TRIES,
            seed: None,
        }
    }
}

/// Counts from one training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    /// Instances compiled into the self set.
    pub self_count: usize,
    /// Supervised instances discarded as non-self.
    pub discarded: usize,
    pub generation: GenerationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyState {
    Initialized,
    Trained,
}

/// The classifier: morphology + self set + detector set.
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) config: BodyConfig,
    pub(crate) schema: DataSchema,
    pub(crate) morphology: Morphology,
    pub(crate) selves: Vec<Particle>,
    pub(crate) detectors: DetectorSet,
    pub(crate) state: BodyState,
    pub(crate) match_length: usize,
    pub(crate) rng: StdRng,
}

impl Body {
    /// Validate the configuration against the schema and build the
    /// morphology. The only legal match rule is contiguous matching; a
    /// match length beyond the particle length is clamped with a warning.
    pub fn init(config: BodyConfig, schema: DataSchema) -> Result<Self> {
        let MatchRule::Contiguous = config.match_rule;
        if config.match_length == 0 {
            return Err(ThymosError::invalid_config(
                "match_length",
                "0",
                "must be at least 1",
            ));
        }
        if config.algorithm == DetectorAlgorithm::Tabular
            && config.representation != Representation::Fuzzy
        {
            return Err(ThymosError::Config(
                thymos_core::error::ConfigError::TabularRequiresFuzzy,
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let morphology = Morphology::build(
            &schema,
            config.representation,
            config.crisp,
            config.mhc,
            &mut rng,
        )?;

        let mut match_length = config.match_length;
        if match_length > morphology.particle_length() {
            warn!(
                match_length,
                particle_length = morphology.particle_length(),
                "match length exceeds particle length; clamping"
            );
            match_length = morphology.particle_length();
        }

        let detectors = DetectorSet::new(morphology.particle_length());
        Ok(Self {
            id: BodyId::new(),
            config,
            schema,
            morphology,
            selves: Vec::new(),
            detectors,
            state: BodyState::Initialized,
            match_length,
            rng,
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn config(&self) -> &BodyConfig {
        &self.config
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    pub fn detector_set(&self) -> &DetectorSet {
        &self.detectors
    }

    pub fn self_count(&self) -> usize {
        self.selves.len()
    }

    /// Effective (possibly clamped) match length.
    pub fn match_length(&self) -> usize {
        self.match_length
    }

    pub fn is_trained(&self) -> bool {
        self.state == BodyState::Trained
    }

    /// Compile the self set and generate detectors. Callable once per
    /// init; a failure leaves whatever partial state was built (no
    /// rollback) and the body stays untrained.
    pub fn train(&mut self, presenter: &dyn InstancePresenter) -> Result<TrainingReport> {
        if self.state == BodyState::Trained {
            return Err(ThymosError::State(StateError::AlreadyTrained));
        }
        if presenter.schema().width() != self.schema.width() {
            return Err(ThymosError::Schema(SchemaError::WidthMismatch {
                expected: self.schema.width(),
                found: presenter.schema().width(),
            }));
        }

        let (self_count, discarded) = self.compile_self_set(presenter)?;
        debug!(self_count, discarded, "self set compiled");

        let generation = self.generate_detectors()?;
        self.state = BodyState::Trained;
        Ok(TrainingReport {
            self_count,
            discarded,
            generation,
        })
    }

    /// Compile an antigen and ask the detector set. Any mature detector
    /// match means non-self; an empty or depleted detector set therefore
    /// answers self for everything.
    pub fn classify(&self, vector: &[f64]) -> Result<Classification> {
        if self.state != BodyState::Trained {
            return Err(ThymosError::State(StateError::NotTrained));
        }
        let antigen = Particle::compile(&self.morphology, vector)?;
        match self
            .detectors
            .match_any(&antigen, &self.morphology, self.match_length)?
        {
            Some(_) => Ok(Classification::NonSelf(1.0)),
            None => Ok(Classification::IsSelf),
        }
    }

    /// Supervised data keeps only goal-class 0 (the self class);
    /// unsupervised data is all self.
    fn compile_self_set(&mut self, presenter: &dyn InstancePresenter) -> Result<(usize, usize)> {
        let mut discarded = 0usize;
        self.selves.clear();
        for i in 0..presenter.len() {
            let row = presenter.instance(i);
            if let Some(goal) = self.schema.goal {
                if row[goal] != 0.0 {
                    discarded += 1;
                    continue;
                }
            }
            self.selves.push(Particle::compile(&self.morphology, row)?);
        }
        Ok((self.selves.len(), discarded))
    }

    fn generate_detectors(&mut self) -> Result<GenerationReport> {
        let (generated, report) = match self.config.algorithm {
            DetectorAlgorithm::Random => RandomGenerator::new(self.config.max_tries).generate(
                &self.morphology,
                &self.selves,
                self.match_length,
                self.config.detector_target,
                &mut self.rng,
            )?,
            DetectorAlgorithm::Tabular => {
                let target = match self.config.tabular_fraction {
                    Some(pf) => TabularTarget::Fraction(pf),
                    None => TabularTarget::Count(self.config.detector_target),
                };
                TabularGenerator::new(target).generate(
                    &self.morphology,
                    &self.selves,
                    self.match_length,
                    &mut self.rng,
                )?
            }
        };
        self.detectors.extend(generated)?;
        Ok(report)
    }
}
