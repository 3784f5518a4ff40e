//! Generation outcome accounting.
//!
//! Rejection sampling can legitimately return fewer detectors than
//! requested; the report makes the shortfall explicit instead of raising,
//! so callers decide whether to accept it or re-run with a larger budget.

/// Counts describing one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// How many detectors the caller asked for.
    pub requested: usize,
    /// How many passed censoring.
    pub generated: usize,
    /// Candidates randomized (random) or indices drawn (tabular).
    pub candidates_tried: u64,
    /// Tabular only: size of the uncensored detector space.
    pub space_size: Option<u64>,
}

impl GenerationReport {
    /// Detectors missing relative to the request.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.generated)
    }

    pub fn is_complete(&self) -> bool {
        self.generated >= self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_accounting() {
        let report = GenerationReport {
            requested: 10,
            generated: 7,
            candidates_tried: 4200,
            space_size: None,
        };
        assert_eq!(report.shortfall(), 3);
        assert!(!report.is_complete());
    }
}
