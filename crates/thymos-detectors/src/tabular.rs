//! Tabular detector generation — exact counting and uniform sampling.
//!
//! Instead of guessing candidates and rejecting, this generator counts the
//! valid detector space exactly. For every window start `i` it builds a
//! table over the r-symbol schemas occupying positions `[i, i+r)`: a
//! schema that matches any self particle at that window is censored
//! (count 0); otherwise the entry holds the number of full-length
//! detectors consistent with the schema and censored nowhere to its
//! right. A backward recurrence seeds the rightmost window with 1 and
//! sums shifted successors leftward. The table at window 0 then sums to
//! the size of the entire uncensored detector space, and any index into
//! `[0, total)` unranks into an explicit detector by walking the partial
//! sums left to right — an unbiased sample without materializing the
//! space.
//!
//! The price is table size `Π numFMF` per window: sizes and counts are
//! computed with checked arithmetic, and a configuration that would
//! exceed the entry limit or the integer range is refused with a fatal
//! capacity error (callers fall back to random generation).
//!
//! Defined for the fuzzy representation only.

use crate::detector::Detector;
use crate::report::GenerationReport;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::HashSet;
use thymos_core::error::{CapacityError, ConfigError, ParticleError, Result, ThymosError};
use thymos_core::morphology::Morphology;
use thymos_core::particle::Particle;
use thymos_core::types::Representation;
use tracing::{debug, warn};

/// Upper bound on entries in a single window table.
pub const MAX_TABLE_ENTRIES: usize = 1 << 24;

/// How many detectors to draw from the counted space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabularTarget {
    /// An absolute count (capped at the space size).
    Count(usize),
    /// A fraction `pf` of the space size, floor-rounded.
    Fraction(f64),
}

/// Dynamic-programming generator over the fuzzy symbol space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabularGenerator {
    pub target: TabularTarget,
}

impl TabularGenerator {
    pub fn new(target: TabularTarget) -> Self {
        Self { target }
    }

    /// Count the censored space and draw the configured number of
    /// detectors uniformly without replacement.
    pub fn generate(
        &self,
        morphology: &Morphology,
        selves: &[Particle],
        match_length: usize,
        rng: &mut StdRng,
    ) -> Result<(Vec<Detector>, GenerationReport)> {
        if morphology.representation() != Representation::Fuzzy {
            return Err(ThymosError::Config(ConfigError::TabularRequiresFuzzy));
        }
        let tables = SchemaTables::build(morphology, selves, match_length)?;
        let total = tables.total()?;

        let requested = match self.target {
            TabularTarget::Count(count) => count,
            TabularTarget::Fraction(pf) => {
                if !(0.0..=1.0).contains(&pf) {
                    return Err(ThymosError::invalid_config(
                        "tabular_fraction",
                        pf.to_string(),
                        "must be within 0.0-1.0",
                    ));
                }
                (pf * total as f64).floor() as usize
            }
        };

        let drawable = (total.min(usize::MAX as u64)) as usize;
        let count = requested.min(drawable);
        if count < requested {
            warn!(
                requested,
                space_size = total,
                "tabular space smaller than the requested detector count"
            );
        }
        debug!(space_size = total, count, "tabular tables built");

        let mut detectors = Vec::with_capacity(count);
        if count > 0 {
            for index in sample_distinct(total, count, rng) {
                let symbols = tables.unrank(index);
                detectors.push(Detector::new(Particle::from_symbols(&symbols)));
            }
        }

        let report = GenerationReport {
            requested,
            generated: detectors.len(),
            candidates_tried: detectors.len() as u64,
            space_size: Some(total),
        };
        Ok((detectors, report))
    }
}

/// Draw `count` distinct indices uniformly from `[0, total)`.
///
/// Collisions resolve by linear probing upward, which is not uniform
/// under skewed count/total ratios (indices just past a cluster of taken
/// slots are favored). Kept deliberately: this is the original sampling
/// behavior, flagged as a known bias rather than silently corrected.
fn sample_distinct(total: u64, count: usize, rng: &mut StdRng) -> Vec<u64> {
    let mut taken: HashSet<u64> = HashSet::with_capacity(count);
    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let mut index = rng.gen_range(0..total);
        while taken.contains(&index) {
            index = (index + 1) % total;
        }
        taken.insert(index);
        picks.push(index);
    }
    picks
}

/// The per-window schema-count tables.
struct SchemaTables {
    /// Symbol alphabet size per particle position.
    radix: Vec<usize>,
    /// Window width (the match length).
    r: usize,
    /// Start of the rightmost window (`l - r`).
    last: usize,
    /// `tables[i][schema]` = detectors consistent with `schema` at window
    /// `i` and uncensored at every window `>= i`; 0 when censored at `i`.
    tables: Vec<Vec<u64>>,
}

impl SchemaTables {
    fn build(morphology: &Morphology, selves: &[Particle], match_length: usize) -> Result<Self> {
        let l = morphology.particle_length();
        if match_length == 0 {
            return Err(ThymosError::invalid_config(
                "match_length",
                "0",
                "must be at least 1",
            ));
        }
        // Same clamping the body applies at init, so direct callers see
        // the same behavior.
        let r = match_length.min(l);
        if r < match_length {
            warn!(
                match_length,
                particle_length = l,
                "match length exceeds particle length; clamping"
            );
        }

        let radix: Vec<usize> = (0..l).map(|p| morphology.symbols_at(p)).collect();
        let last = l - r;

        // Per self particle and position: which symbols match there.
        let marks = self_marks(morphology, selves, &radix)?;

        let mut tables: Vec<Vec<u64>> = vec![Vec::new(); last + 1];
        let mut syms = vec![0usize; r];

        // Rightmost window: any uncensored schema counts one detector tail.
        let size_last = window_size(&radix, last, r)?;
        let mut table = vec![0u64; size_last];
        for (index, entry) in table.iter_mut().enumerate() {
            decode_schema(&radix, last, index, &mut syms);
            if !censored(&marks, last, &syms) {
                *entry = 1;
            }
        }
        tables[last] = table;

        // Backward recurrence: drop the leftmost symbol, sum over the
        // symbol entering on the right.
        for i in (0..last).rev() {
            let size = window_size(&radix, i, r)?;
            let sub = size / radix[i];
            let next_radix = radix[i + r];
            let mut table = vec![0u64; size];
            for (index, entry) in table.iter_mut().enumerate() {
                decode_schema(&radix, i, index, &mut syms);
                if censored(&marks, i, &syms) {
                    continue;
                }
                let rem = index % sub;
                let mut sum: u64 = 0;
                for s in 0..next_radix {
                    sum = sum
                        .checked_add(tables[i + 1][rem * next_radix + s])
                        .ok_or(ThymosError::Capacity(CapacityError::AlgorithmOverflow {
                            window: i,
                        }))?;
                }
                *entry = sum;
            }
            tables[i] = table;
        }

        Ok(Self {
            radix,
            r,
            last,
            tables,
        })
    }

    /// Size of the entire uncensored detector space.
    ///
    /// The per-entry counts passed checked addition during the recurrence,
    /// but their sum over window 0 can still exceed the integer range; a
    /// truncated total would misreport the space and silently restrict
    /// sampling, so overflow here is fatal too.
    fn total(&self) -> Result<u64> {
        self.tables[0].iter().try_fold(0u64, |acc, &c| {
            acc.checked_add(c)
                .ok_or(ThymosError::Capacity(CapacityError::AlgorithmOverflow {
                    window: 0,
                }))
        })
    }

    /// Reconstruct the detector at rank `index` in `[0, total)`.
    fn unrank(&self, mut index: u64) -> Vec<usize> {
        let l = self.last + self.r;
        let mut symbols = vec![0usize; l];

        // Window 0 fixes the first r symbols.
        let mut schema_index = 0usize;
        for (idx, &count) in self.tables[0].iter().enumerate() {
            if index < count {
                schema_index = idx;
                break;
            }
            index -= count;
        }
        let mut head = vec![0usize; self.r];
        decode_schema(&self.radix, 0, schema_index, &mut head);
        symbols[..self.r].copy_from_slice(&head);

        // Each later window fixes exactly one new position via its
        // partial sums.
        for i in 1..=self.last {
            let new_pos = i + self.r - 1;
            let mut prefix = 0usize;
            for j in i..new_pos {
                prefix = prefix * self.radix[j] + symbols[j];
            }
            let m_new = self.radix[new_pos];
            for s in 0..m_new {
                let count = self.tables[i][prefix * m_new + s];
                if index < count {
                    symbols[new_pos] = s;
                    break;
                }
                index -= count;
            }
        }

        symbols
    }
}

/// Table size for the window starting at `i`, guarded against overflow
/// and the in-memory entry limit.
fn window_size(radix: &[usize], i: usize, r: usize) -> Result<usize> {
    let mut entries: u128 = 1;
    for &m in &radix[i..i + r] {
        entries *= m as u128;
        if entries > MAX_TABLE_ENTRIES as u128 {
            return Err(ThymosError::Capacity(CapacityError::TableTooLarge {
                entries,
                limit: MAX_TABLE_ENTRIES,
            }));
        }
    }
    Ok(entries as usize)
}

/// Decode a mixed-radix schema index (leftmost position most significant)
/// into `syms`.
fn decode_schema(radix: &[usize], window: usize, mut index: usize, syms: &mut [usize]) {
    for j in (0..syms.len()).rev() {
        let m = radix[window + j];
        syms[j] = index % m;
        index /= m;
    }
}

/// `marks[s][p][sym]`: whether self particle `s` matches detector symbol
/// `sym` at position `p`.
fn self_marks(
    morphology: &Morphology,
    selves: &[Particle],
    radix: &[usize],
) -> Result<Vec<Vec<Vec<bool>>>> {
    let mut marks = Vec::with_capacity(selves.len());
    for own in selves {
        let values = own
            .fuzzy_values()
            .ok_or(ThymosError::Particle(ParticleError::RepresentationMismatch))?;
        if values.len() != radix.len() {
            return Err(ThymosError::length_mismatch(radix.len(), values.len()));
        }
        let per_particle: Vec<Vec<bool>> = (0..radix.len())
            .map(|p| {
                (0..radix[p])
                    .map(|sym| morphology.position_match(p, values[p], sym as f64))
                    .collect()
            })
            .collect();
        marks.push(per_particle);
    }
    Ok(marks)
}

/// A schema is censored at window `i` when some self particle matches it
/// at every window position.
fn censored(marks: &[Vec<Vec<bool>>], i: usize, syms: &[usize]) -> bool {
    marks
        .iter()
        .any(|own| syms.iter().enumerate().all(|(j, &sym)| own[i + j][sym]))
}
