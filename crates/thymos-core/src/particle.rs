//! Particle — the internal representation and the contiguous match rule.
//!
//! A particle is compiled once from a raw vector through a morphology and
//! is read-only afterward. Self particles are compiled from training data,
//! antigens from data to classify, and detectors are randomized or
//! reconstructed content that never matches the self set.
//!
//! The two representations deliberately score "contiguous" differently:
//! bit-string particles use the longest run of agreeing bit positions,
//! fuzzy particles use the best windowed sum of per-position match values.
//! The asymmetry is part of the contract, not an accident to unify away.

use crate::error::{ParticleError, Result, ThymosError};
use crate::morphology::Morphology;
use crate::types::{MatchOutcome, Representation};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A fixed-length bit vector packed into 64-bit words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitVector {
    words: Vec<u64>,
    len: usize,
}

impl BitVector {
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    pub fn set(&mut self, i: usize, value: bool) {
        let mask = 1u64 << (i % 64);
        if value {
            self.words[i / 64] |= mask;
        } else {
            self.words[i / 64] &= !mask;
        }
    }

    /// Longest run of positions where both vectors agree, with its start.
    ///
    /// XORs the two vectors and scans for the longest run of zero bits.
    pub fn longest_agreement(&self, other: &BitVector) -> Result<(usize, usize)> {
        if self.len != other.len {
            return Err(ThymosError::length_mismatch(self.len, other.len));
        }
        let mut best = 0usize;
        let mut best_start = 0usize;
        let mut run = 0usize;
        for i in 0..self.len {
            let differs = (self.words[i / 64] ^ other.words[i / 64]) >> (i % 64) & 1 == 1;
            if differs {
                run = 0;
            } else {
                run += 1;
                if run > best {
                    best = run;
                    best_start = i + 1 - run;
                }
            }
        }
        Ok((best, best_start))
    }
}

/// The particle payload: one variant per representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParticleData {
    Bits(BitVector),
    Fuzzy(Vec<f64>),
}

/// An immutable compiled particle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    data: ParticleData,
}

impl Particle {
    pub fn len(&self) -> usize {
        match &self.data {
            ParticleData::Bits(bits) => bits.len(),
            ParticleData::Fuzzy(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The fuzzy payload, if this is a fuzzy particle.
    pub fn fuzzy_values(&self) -> Option<&[f64]> {
        match &self.data {
            ParticleData::Fuzzy(values) => Some(values),
            ParticleData::Bits(_) => None,
        }
    }

    /// Compile a raw instance vector into a particle.
    ///
    /// Fuzzy: copies `vector[fieldPos[i]]`'s attribute value into each
    /// position. Bit: decodes each field position into (attribute, bit)
    /// and copies that bit of the integer-coded category value.
    pub fn compile(morphology: &Morphology, vector: &[f64]) -> Result<Self> {
        if vector.len() < morphology.width() {
            return Err(ThymosError::Particle(ParticleError::VectorTooShort {
                needed: morphology.width(),
                found: vector.len(),
            }));
        }
        let len = morphology.particle_length();
        let data = match morphology.representation() {
            Representation::Bit => {
                let mut bits = BitVector::with_len(len);
                for i in 0..len {
                    let (attr, bit_index) = morphology.bit_source(i);
                    let coded = vector[attr] as u64;
                    bits.set(i, (coded >> bit_index) & 1 == 1);
                }
                ParticleData::Bits(bits)
            }
            Representation::Fuzzy => {
                let mut values = Vec::with_capacity(len);
                for i in 0..len {
                    let attr = morphology.attribute_of_slot(morphology.slot_at(i));
                    values.push(vector[attr]);
                }
                ParticleData::Fuzzy(values)
            }
        };
        Ok(Self { data })
    }

    /// Randomize fresh detector content: uniform bits, or one uniform
    /// symbol per fuzzy position.
    pub fn random_detector(morphology: &Morphology, rng: &mut StdRng) -> Self {
        let len = morphology.particle_length();
        let data = match morphology.representation() {
            Representation::Bit => {
                let mut bits = BitVector::with_len(len);
                for i in 0..len {
                    bits.set(i, rng.gen::<bool>());
                }
                ParticleData::Bits(bits)
            }
            Representation::Fuzzy => {
                let values = (0..len)
                    .map(|i| rng.gen_range(0..morphology.symbols_at(i)) as f64)
                    .collect();
                ParticleData::Fuzzy(values)
            }
        };
        Self { data }
    }

    /// Build a fuzzy detector particle from explicit symbols (tabular
    /// reconstruction path).
    pub fn from_symbols(symbols: &[usize]) -> Self {
        Self {
            data: ParticleData::Fuzzy(symbols.iter().map(|&s| s as f64).collect()),
        }
    }

    /// Contiguous match of this particle against a detector-side particle.
    ///
    /// For fuzzy non-crisp matching the receiver carries observed values
    /// and `detector` carries symbol indices; bit and crisp matching are
    /// symmetric. `match_length` is expected to be clamped to the particle
    /// length by the body configuration.
    pub fn matches(
        &self,
        detector: &Particle,
        morphology: &Morphology,
        match_length: usize,
    ) -> Result<MatchOutcome> {
        if self.len() != detector.len() {
            return Err(ThymosError::length_mismatch(self.len(), detector.len()));
        }
        match (&self.data, &detector.data) {
            (ParticleData::Bits(a), ParticleData::Bits(b)) => {
                let (run, start) = a.longest_agreement(b)?;
                Ok(MatchOutcome {
                    score: run as f64,
                    position: start,
                    matched: run >= match_length,
                })
            }
            (ParticleData::Fuzzy(values), ParticleData::Fuzzy(symbols)) => {
                Ok(windowed_match(values, symbols, morphology, match_length))
            }
            _ => Err(ThymosError::Particle(ParticleError::RepresentationMismatch)),
        }
    }
}

/// Best `match_length`-wide accumulation of per-position match values.
///
/// Not a longest-run scan: a window scores the sum of its 0/1 position
/// matches, and the particle matches when some window is fully agreeing.
fn windowed_match(
    values: &[f64],
    symbols: &[f64],
    morphology: &Morphology,
    match_length: usize,
) -> MatchOutcome {
    let len = values.len();
    let window = match_length.min(len).max(1);

    let marks: Vec<f64> = (0..len)
        .map(|i| {
            if morphology.position_match(i, values[i], symbols[i]) {
                1.0
            } else {
                0.0
            }
        })
        .collect();

    let mut sum: f64 = marks[..window].iter().sum();
    let mut best = sum;
    let mut best_start = 0usize;
    for start in 1..=(len - window) {
        sum += marks[start + window - 1] - marks[start - 1];
        if sum > best {
            best = sum;
            best_start = start;
        }
    }

    MatchOutcome {
        score: best,
        position: best_start,
        matched: best >= match_length as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, DataSchema};
    use crate::types::MhcMode;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn bit_morphology(attrs: usize) -> Morphology {
        let schema = DataSchema::new(
            (0..attrs)
                .map(|i| Attribute::categorical(format!("a{}", i), 2))
                .collect(),
        );
        Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng()).unwrap()
    }

    fn fuzzy_morphology(symbol_counts: &[usize]) -> Morphology {
        let schema = DataSchema::new(
            symbol_counts
                .iter()
                .enumerate()
                .map(|(i, &n)| Attribute::categorical(format!("a{}", i), n))
                .collect(),
        );
        Morphology::build(&schema, Representation::Fuzzy, true, MhcMode::None, &mut rng()).unwrap()
    }

    fn bit_particle(morphology: &Morphology, bits: &[u8]) -> Particle {
        let vector: Vec<f64> = bits.iter().map(|&b| b as f64).collect();
        Particle::compile(morphology, &vector).unwrap()
    }

    #[test]
    fn bitvector_set_get_roundtrip() {
        let mut bits = BitVector::with_len(70);
        bits.set(0, true);
        bits.set(63, true);
        bits.set(64, true);
        assert!(bits.get(0));
        assert!(!bits.get(1));
        assert!(bits.get(63));
        assert!(bits.get(64));
        assert!(!bits.get(69));
    }

    #[test]
    fn longest_agreement_finds_run_and_start() {
        // one boolean attribute per bit, so the vector spells the bits
        let m = bit_morphology(8);
        let a = bit_particle(&m, &[0, 0, 0, 0, 1, 1, 1, 1]);
        let b = bit_particle(&m, &[0, 0, 1, 0, 1, 1, 1, 0]);
        // agree at 0,1,3,4,5,6 -> longest run is 3,4,5,6 (len 4)
        let outcome = a.matches(&b, &m, 4).unwrap();
        assert_eq!(outcome.score, 4.0);
        assert_eq!(outcome.position, 3);
        assert!(outcome.matched);
        assert!(!a.matches(&b, &m, 5).unwrap().matched);
    }

    #[test]
    fn bit_particle_matches_itself_fully() {
        let m = bit_morphology(8);
        let p = bit_particle(&m, &[1, 0, 1, 1, 0, 0, 1, 0]);
        for match_length in 1..=8 {
            let outcome = p.matches(&p, &m, match_length).unwrap();
            assert!(outcome.matched);
            assert_eq!(outcome.score, 8.0);
            assert_eq!(outcome.position, 0);
        }
    }

    #[test]
    fn fuzzy_windowed_sum_not_longest_run() {
        let m = fuzzy_morphology(&[2, 2, 2, 2]);
        let observed = Particle::compile(&m, &[1.0, 0.0, 1.0, 0.0]).unwrap();
        let detector = Particle::from_symbols(&[1, 1, 1, 0]);
        // marks: 1,0,1,1 -> window 2 best sum = 2 at start 2
        let outcome = observed.matches(&detector, &m, 2).unwrap();
        assert_eq!(outcome.score, 2.0);
        assert_eq!(outcome.position, 2);
        assert!(outcome.matched);
        // window 3: best sum 2 < 3, no match even though 3 positions agree overall
        assert!(!observed.matches(&detector, &m, 3).unwrap().matched);
    }

    #[test]
    fn fuzzy_score_is_bounded_by_match_length() {
        let m = fuzzy_morphology(&[2, 2, 2, 2, 2]);
        let mut rng = rng();
        for _ in 0..50 {
            let observed = Particle::random_detector(&m, &mut rng);
            let detector = Particle::random_detector(&m, &mut rng);
            for match_length in 1..=5 {
                let outcome = observed.matches(&detector, &m, match_length).unwrap();
                assert!(outcome.score >= 0.0);
                assert!(outcome.score <= match_length as f64);
            }
        }
    }

    #[test]
    fn length_mismatch_is_a_domain_error() {
        let m4 = fuzzy_morphology(&[2, 2, 2, 2]);
        let m3 = fuzzy_morphology(&[2, 2, 2]);
        let a = Particle::compile(&m4, &[0.0, 0.0, 0.0, 0.0]).unwrap();
        let b = Particle::compile(&m3, &[0.0, 0.0, 0.0]).unwrap();
        assert!(matches!(
            a.matches(&b, &m4, 2),
            Err(ThymosError::Particle(ParticleError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn mixed_representations_cannot_match() {
        let mb = bit_morphology(4);
        let mf = fuzzy_morphology(&[2, 2, 2, 2]);
        let a = bit_particle(&mb, &[0, 0, 0, 0]);
        let b = Particle::compile(&mf, &[0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!(matches!(
            a.matches(&b, &mb, 2),
            Err(ThymosError::Particle(ParticleError::RepresentationMismatch))
        ));
    }

    #[test]
    fn compile_rejects_short_vectors() {
        let m = fuzzy_morphology(&[2, 2, 2]);
        assert!(matches!(
            Particle::compile(&m, &[0.0]),
            Err(ThymosError::Particle(ParticleError::VectorTooShort { .. }))
        ));
    }

    #[test]
    fn bit_compile_reads_category_bits() {
        // single attribute with 8 categories -> 3 bit positions
        let schema = DataSchema::new(vec![Attribute::categorical("a", 8)]);
        let m =
            Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng())
                .unwrap();
        let p = Particle::compile(&m, &[5.0]).unwrap(); // 0b101
        match &p.data {
            ParticleData::Bits(bits) => {
                assert!(bits.get(0));
                assert!(!bits.get(1));
                assert!(bits.get(2));
            }
            _ => unreachable!(),
        }
    }
}
