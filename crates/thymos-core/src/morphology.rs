//! Morphology — the field layout mapping raw vectors onto particles.
//!
//! Built once per body configuration and immutable afterward. For the
//! fuzzy representation every active attribute occupies one particle
//! position; for the bit-string representation every active categorical
//! attribute expands into `ceil(log2(categories))` bit positions.
//!
//! With `MhcMode::Random` the field positions are permuted once at build
//! time, the computational analog of MHC diversity: adjacent particle
//! positions stop corresponding to semantically adjacent attributes.

use crate::error::{Result, ThymosError};
use crate::schema::{AttributeKind, DataSchema, FuzzyField};
use crate::types::{MhcMode, Representation};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Bits needed to encode `categories` distinct values (at least one).
fn bits_for(categories: usize) -> usize {
    if categories <= 2 {
        1
    } else {
        (usize::BITS - (categories - 1).leading_zeros()) as usize
    }
}

/// The field layout of one body: which attribute feeds which particle
/// position, plus the per-attribute symbol alphabets the detectors draw
/// from. Self-contained so a trained body serializes without its schema's
/// provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Morphology {
    representation: Representation,
    crisp: bool,
    mhc: MhcMode,
    particle_length: usize,
    /// Fuzzy: `field_pos[i]` is the active-attribute slot at position `i`.
    /// Bit: `field_pos[i]` encodes `bit_index * num_active + slot`.
    field_pos: Vec<usize>,
    /// Active-attribute slot -> original attribute index in the schema.
    active: Vec<usize>,
    /// Per-slot symbol alphabet size (categories, or membership-set count).
    symbols: Vec<usize>,
    /// Per-slot fuzzy annotation (non-crisp fuzzy mode only).
    fuzzy: Vec<Option<FuzzyField>>,
    /// Width an instance vector must have.
    width: usize,
}

impl Morphology {
    /// Compute the field layout for `schema` under the given representation.
    ///
    /// Fails fast when the schema does not fit the mode: the bit-string
    /// representation requires every active attribute to be categorical,
    /// crisp fuzzy likewise, and non-crisp fuzzy requires a membership
    /// annotation on every active attribute. Deterministic except under
    /// `MhcMode::Random`, which consumes the caller's generator.
    pub fn build(
        schema: &DataSchema,
        representation: Representation,
        crisp: bool,
        mhc: MhcMode,
        rng: &mut StdRng,
    ) -> Result<Self> {
        schema.validate()?;
        let active = schema.active_indices();
        let num_active = active.len();

        let mut symbols = Vec::with_capacity(num_active);
        let mut fuzzy = Vec::with_capacity(num_active);
        let mut field_pos = Vec::new();

        match representation {
            Representation::Bit => {
                // Each attribute contributes its bit positions in order;
                // fieldPos encodes (bit_index, slot) as bit_index * num_active + slot.
                for (slot, &attr_idx) in active.iter().enumerate() {
                    let attr = &schema.attributes[attr_idx];
                    let categories = match attr.kind {
                        AttributeKind::Categorical { categories } => categories,
                        AttributeKind::Continuous => {
                            return Err(ThymosError::non_categorical(&attr.name))
                        }
                    };
                    symbols.push(categories.max(1));
                    fuzzy.push(None);
                    for bit_index in 0..bits_for(categories.max(1)) {
                        field_pos.push(bit_index * num_active + slot);
                    }
                }
            }
            Representation::Fuzzy => {
                for &attr_idx in &active {
                    let attr = &schema.attributes[attr_idx];
                    if crisp {
                        let categories = match attr.kind {
                            AttributeKind::Categorical { categories } => categories,
                            AttributeKind::Continuous => {
                                return Err(ThymosError::non_categorical(&attr.name))
                            }
                        };
                        symbols.push(categories.max(1));
                        fuzzy.push(None);
                    } else {
                        let field = attr
                            .fuzzy
                            .clone()
                            .ok_or_else(|| ThymosError::missing_fuzzy(&attr.name))?;
                        if field.sets.is_empty() {
                            return Err(ThymosError::missing_fuzzy(&attr.name));
                        }
                        symbols.push(field.sets.len());
                        fuzzy.push(Some(field));
                    }
                }
                // One particle position per active attribute, identity layout.
                field_pos = (0..num_active).collect();
            }
        }

        if matches!(mhc, MhcMode::Random) {
            field_pos.shuffle(rng);
        }

        Ok(Self {
            representation,
            crisp,
            mhc,
            particle_length: field_pos.len(),
            field_pos,
            active,
            symbols,
            fuzzy,
            width: schema.width(),
        })
    }

    pub fn representation(&self) -> Representation {
        self.representation
    }

    pub fn crisp(&self) -> bool {
        self.crisp
    }

    pub fn mhc(&self) -> MhcMode {
        self.mhc
    }

    pub fn particle_length(&self) -> usize {
        self.particle_length
    }

    pub fn field_pos(&self) -> &[usize] {
        &self.field_pos
    }

    pub fn num_active(&self) -> usize {
        self.active.len()
    }

    /// Width an instance vector must have to be compiled.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Active-attribute slot feeding particle position `pos` (fuzzy layout).
    pub fn slot_at(&self, pos: usize) -> usize {
        self.field_pos[pos]
    }

    /// Original schema index of the attribute in active slot `slot`.
    pub fn attribute_of_slot(&self, slot: usize) -> usize {
        self.active[slot]
    }

    /// Symbol alphabet size at particle position `pos` (fuzzy layout).
    pub fn symbols_at(&self, pos: usize) -> usize {
        self.symbols[self.field_pos[pos]]
    }

    /// Decode a bit-layout field position into `(attribute index, bit index)`.
    pub fn bit_source(&self, pos: usize) -> (usize, usize) {
        let code = self.field_pos[pos];
        let slot = code % self.active.len();
        let bit_index = code / self.active.len();
        (self.active[slot], bit_index)
    }

    /// Per-position fuzzy match predicate between an observed value and a
    /// detector symbol.
    ///
    /// Crisp mode compares the values bit-for-bit; non-crisp mode checks
    /// whether the symbol's membership function, evaluated at the observed
    /// value, exceeds the attribute's threshold.
    pub fn position_match(&self, pos: usize, observed: f64, detector_symbol: f64) -> bool {
        if self.crisp {
            return observed.to_bits() == detector_symbol.to_bits();
        }
        let slot = self.field_pos[pos];
        match &self.fuzzy[slot] {
            Some(field) => {
                let s = detector_symbol as usize;
                s < field.sets.len() && field.sets[s].membership(observed) > field.threshold
            }
            None => observed.to_bits() == detector_symbol.to_bits(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::schema::{Attribute, MembershipFunction};
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn bits_for_categories() {
        assert_eq!(bits_for(1), 1);
        assert_eq!(bits_for(2), 1);
        assert_eq!(bits_for(3), 2);
        assert_eq!(bits_for(4), 2);
        assert_eq!(bits_for(5), 3);
        assert_eq!(bits_for(8), 3);
        assert_eq!(bits_for(9), 4);
    }

    #[test]
    fn bit_layout_expands_attributes() {
        let schema = DataSchema::new(vec![
            Attribute::categorical("a", 4), // 2 bits
            Attribute::categorical("b", 8), // 3 bits
        ]);
        let m =
            Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng())
                .unwrap();
        assert_eq!(m.particle_length(), 5);
        // First attribute's bits: bit_index * 2 + 0
        assert_eq!(&m.field_pos()[0..2], &[0, 2]);
        // Second attribute's bits: bit_index * 2 + 1
        assert_eq!(&m.field_pos()[2..5], &[1, 3, 5]);
        assert_eq!(m.bit_source(0), (0, 0));
        assert_eq!(m.bit_source(1), (0, 1));
        assert_eq!(m.bit_source(4), (1, 2));
    }

    #[test]
    fn bit_layout_rejects_continuous_attributes() {
        let schema = DataSchema::new(vec![Attribute::continuous("x")]);
        let err = Morphology::build(&schema, Representation::Bit, true, MhcMode::None, &mut rng());
        assert!(matches!(
            err,
            Err(ThymosError::Schema(SchemaError::NonCategorical(_)))
        ));
    }

    #[test]
    fn fuzzy_layout_is_identity() {
        let schema = DataSchema::new(vec![
            Attribute::categorical("a", 3),
            Attribute::categorical("b", 2),
            Attribute::categorical("c", 5),
        ]);
        let m =
            Morphology::build(&schema, Representation::Fuzzy, true, MhcMode::None, &mut rng())
                .unwrap();
        assert_eq!(m.particle_length(), 3);
        assert_eq!(m.field_pos(), &[0, 1, 2]);
        assert_eq!(m.symbols_at(0), 3);
        assert_eq!(m.symbols_at(2), 5);
    }

    #[test]
    fn non_crisp_requires_fuzzy_annotation() {
        let schema = DataSchema::new(vec![Attribute::continuous("x")]);
        let err =
            Morphology::build(&schema, Representation::Fuzzy, false, MhcMode::None, &mut rng());
        assert!(matches!(
            err,
            Err(ThymosError::Schema(SchemaError::MissingFuzzy(_)))
        ));
    }

    #[test]
    fn mhc_random_permutes_but_preserves_positions() {
        let schema = DataSchema::new(
            (0..16)
                .map(|i| Attribute::categorical(format!("a{}", i), 2))
                .collect(),
        );
        let plain =
            Morphology::build(&schema, Representation::Fuzzy, true, MhcMode::None, &mut rng())
                .unwrap();
        let shuffled =
            Morphology::build(&schema, Representation::Fuzzy, true, MhcMode::Random, &mut rng())
                .unwrap();

        let mut sorted = shuffled.field_pos().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, plain.field_pos());
        assert_ne!(shuffled.field_pos(), plain.field_pos());
    }

    #[test]
    fn non_crisp_position_match_uses_threshold() {
        let schema = DataSchema::new(vec![Attribute::continuous("temp").with_fuzzy(
            vec![
                MembershipFunction::Triangular { a: 0.0, b: 1.0, c: 2.0 },
                MembershipFunction::Triangular { a: 2.0, b: 3.0, c: 4.0 },
            ],
            0.5,
        )]);
        let m =
            Morphology::build(&schema, Representation::Fuzzy, false, MhcMode::None, &mut rng())
                .unwrap();
        // Symbol 0 peaks at 1.0; membership(1.0) = 1.0 > 0.5.
        assert!(m.position_match(0, 1.0, 0.0));
        // Symbol 1 peaks at 3.0; membership(1.0) = 0.0.
        assert!(!m.position_match(0, 1.0, 1.0));
        // Shoulder value right at the threshold does not match (strict >).
        assert!(!m.position_match(0, 0.5, 0.0));
    }
}
