//! Floor-level orchestration: wave-count policy and per-slot aggregation

use super::encounter::{EncounterRecord, Sample};
use super::error::AnalysisError;
use super::summary::FloorSummary;
use super::wave_aggregator::WaveAggregator;
use std::collections::BTreeSet;

/// Result of analyzing one floor
#[derive(Debug, Clone)]
pub struct FloorAnalysis {
    pub summary: FloorSummary,
    /// False when samples disagreed on the number of waves
    pub consistent: bool,
}

pub struct FloorAnalyzer {
    aggregator: WaveAggregator,
}

impl FloorAnalyzer {
    pub fn new(aggregator: WaveAggregator) -> Self {
        Self { aggregator }
    }

    /// Analyze every wave slot of one floor
    ///
    /// The first sample fixes the canonical wave count. Samples with fewer waves
    /// contribute nothing to the missing slots; extra waves are ignored. A count
    /// mismatch is logged and does not stop the analysis.
    pub fn analyze_floor(
        &self,
        dungeon: i64,
        floor: i64,
        samples: &[Sample],
    ) -> Result<FloorAnalysis, AnalysisError> {
        let first = samples
            .first()
            .ok_or(AnalysisError::EmptyFloor { dungeon, floor })?;

        log::info!(
            "dungeon: {}; floor: {}; samples: {}",
            dungeon,
            floor,
            samples.len()
        );

        let num_waves = first.len();
        let consistent = samples.iter().all(|s| s.len() == num_waves);
        if !consistent {
            let counts: BTreeSet<usize> = samples.iter().map(|s| s.len()).collect();
            log::error!(
                "inconsistent number of waves for dungeon {} floor {}: {:?} (using {})",
                dungeon,
                floor,
                counts,
                num_waves
            );
        }

        let mut summary = FloorSummary::new(dungeon, floor);
        for index in 0..num_waves {
            let wave_samples: Vec<&[EncounterRecord]> = samples
                .iter()
                .filter_map(|sample| sample.get(index))
                .map(|wave| wave.as_slice())
                .collect();

            summary.waves.push(self.aggregator.aggregate_wave(&wave_samples));
        }

        Ok(FloorAnalysis { summary, consistent })
    }
}

impl Default for FloorAnalyzer {
    fn default() -> Self {
        Self::new(WaveAggregator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(wave_sizes: &[usize]) -> Sample {
        wave_sizes
            .iter()
            .map(|&n| (0..n).map(|_| EncounterRecord::new(100, 5, 0)).collect())
            .collect()
    }

    #[test]
    fn test_consistent_wave_counts() {
        let samples = vec![sample(&[1, 2, 3]), sample(&[1, 2, 2])];

        let analysis = FloorAnalyzer::default().analyze_floor(1, 2, &samples).unwrap();

        assert!(analysis.consistent);
        assert_eq!(analysis.summary.dungeon, 1);
        assert_eq!(analysis.summary.floor, 2);
        assert!(analysis.summary.invades.is_empty());
        assert_eq!(analysis.summary.waves.len(), 3);
        assert_eq!(analysis.summary.waves[2].min_enemies, 2);
        assert_eq!(analysis.summary.waves[2].max_enemies, 3);
    }

    #[test]
    fn test_shorter_sample_does_not_panic() {
        let samples = vec![sample(&[1; 5]), sample(&[1; 5]), sample(&[2; 4])];

        let analysis = FloorAnalyzer::default().analyze_floor(1, 1, &samples).unwrap();

        assert!(!analysis.consistent);
        assert_eq!(analysis.summary.waves.len(), 5);
        // Slot 4 only has contributions from the first two samples
        assert_eq!(analysis.summary.waves[4].max_enemies, 1);
        assert_eq!(analysis.summary.waves[3].max_enemies, 2);
    }

    #[test]
    fn test_longer_sample_extra_waves_ignored() {
        let samples = vec![sample(&[1, 1]), sample(&[1, 1, 9])];

        let analysis = FloorAnalyzer::default().analyze_floor(1, 1, &samples).unwrap();

        assert!(!analysis.consistent);
        assert_eq!(analysis.summary.waves.len(), 2);
    }

    #[test]
    fn test_empty_floor_rejected() {
        let result = FloorAnalyzer::default().analyze_floor(3, 4, &[]);

        assert!(matches!(
            result,
            Err(AnalysisError::EmptyFloor { dungeon: 3, floor: 4 })
        ));
    }

    #[test]
    fn test_sample_with_no_waves() {
        let samples = vec![Vec::new(), sample(&[1])];

        let analysis = FloorAnalyzer::default().analyze_floor(1, 1, &samples).unwrap();

        assert!(analysis.summary.waves.is_empty());
        assert!(!analysis.consistent);
    }
}
