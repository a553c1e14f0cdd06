//! Corpus driver - fans out over every (dungeon, floor) in the observation store

use super::decoder::SampleDecoder;
use super::error::AnalysisError;
use super::floor_analyzer::FloorAnalyzer;
use super::sink_backend::CorpusSink;
use super::sqlite_reader::ObservationSource;
use super::summary::CorpusResult;
use std::time::Instant;

/// Totals for one run, logged when the corpus is written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub dungeons: usize,
    pub floors: usize,
    pub samples: usize,
    pub inconsistent_floors: usize,
}

pub struct CorpusDriver {
    analyzer: FloorAnalyzer,
}

impl CorpusDriver {
    pub fn new(analyzer: FloorAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Analyze every floor in ascending dungeon-then-floor order
    ///
    /// A blob that fails to decode aborts the whole corpus.
    pub fn analyze_corpus<S, D>(
        &self,
        source: &S,
        decoder: &D,
    ) -> Result<(CorpusResult, RunStats), AnalysisError>
    where
        S: ObservationSource + ?Sized,
        D: SampleDecoder + ?Sized,
    {
        let mut corpus = CorpusResult::new();
        let mut stats = RunStats::default();

        let dungeons = source.dungeons()?;
        stats.dungeons = dungeons.len();

        for dungeon in dungeons {
            for floor in source.floors(dungeon)? {
                let observations = source.observations(dungeon, floor)?;

                let mut samples = Vec::with_capacity(observations.len());
                for observation in &observations {
                    let sample = decoder.decode(&observation.data).map_err(|e| {
                        log::error!(
                            "❌ Failed to decode observation {} (dungeon {} floor {}): {}",
                            observation.row_id,
                            dungeon,
                            floor,
                            e
                        );
                        e
                    })?;
                    samples.push(sample);
                }

                let analysis = self.analyzer.analyze_floor(dungeon, floor, &samples)?;

                stats.floors += 1;
                stats.samples += samples.len();
                if !analysis.consistent {
                    stats.inconsistent_floors += 1;
                }
                corpus.push(analysis.summary);
            }
        }

        Ok((corpus, stats))
    }

    /// Analyze the whole store and persist the result through `sink`
    ///
    /// Nothing reaches the sink unless every floor was analyzed.
    pub async fn run<S, D, K>(
        &self,
        source: &S,
        decoder: &D,
        sink: &mut K,
    ) -> Result<RunStats, AnalysisError>
    where
        S: ObservationSource + ?Sized,
        D: SampleDecoder + ?Sized,
        K: CorpusSink + ?Sized,
    {
        let started = Instant::now();
        log::info!(
            "📖 Analyzing observations (decoder: {}, sink: {})",
            decoder.decoder_name(),
            sink.backend_type()
        );

        let (corpus, stats) = self.analyze_corpus(source, decoder)?;
        sink.write_corpus(&corpus).await?;

        log::info!(
            "✅ Analyzed {} dungeons, {} floors from {} samples in {:.2?} ({} inconsistent)",
            stats.dungeons,
            stats.floors,
            stats.samples,
            started.elapsed(),
            stats.inconsistent_floors
        );

        Ok(stats)
    }
}

impl Default for CorpusDriver {
    fn default() -> Self {
        Self::new(FloorAnalyzer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::decoder::JsonSampleDecoder;
    use crate::analysis_core::sink_backend::SinkError;
    use crate::analysis_core::sqlite_reader::{Observation, ReaderError};
    use async_trait::async_trait;
    use std::collections::BTreeMap;

    /// In-memory store: (dungeon, floor) -> blobs
    #[derive(Default)]
    struct MemorySource {
        rows: BTreeMap<(i64, i64), Vec<String>>,
    }

    impl MemorySource {
        fn insert(&mut self, dungeon: i64, floor: i64, data: &str) {
            self.rows.entry((dungeon, floor)).or_default().push(data.to_string());
        }
    }

    impl ObservationSource for MemorySource {
        fn dungeons(&self) -> Result<Vec<i64>, ReaderError> {
            let mut ids: Vec<i64> = self.rows.keys().map(|(d, _)| *d).collect();
            ids.dedup();
            Ok(ids)
        }

        fn floors(&self, dungeon: i64) -> Result<Vec<i64>, ReaderError> {
            Ok(self
                .rows
                .keys()
                .filter(|(d, _)| *d == dungeon)
                .map(|(_, f)| *f)
                .collect())
        }

        fn observations(&self, dungeon: i64, floor: i64) -> Result<Vec<Observation>, ReaderError> {
            Ok(self
                .rows
                .get(&(dungeon, floor))
                .map(|blobs| {
                    blobs
                        .iter()
                        .enumerate()
                        .map(|(i, data)| Observation {
                            row_id: i as i64 + 1,
                            dungeon,
                            floor,
                            data: data.as_bytes().to_vec(),
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        written: Vec<CorpusResult>,
    }

    #[async_trait]
    impl CorpusSink for RecordingSink {
        async fn write_corpus(&mut self, corpus: &CorpusResult) -> Result<(), SinkError> {
            self.written.push(corpus.clone());
            Ok(())
        }

        fn backend_type(&self) -> &'static str {
            "Memory"
        }
    }

    #[test]
    fn test_floors_in_ascending_order() {
        let mut source = MemorySource::default();
        source.insert(2, 1, "[[]]");
        source.insert(1, 3, "[[]]");
        source.insert(1, 1, "[[], []]");

        let (corpus, stats) = CorpusDriver::default()
            .analyze_corpus(&source, &JsonSampleDecoder)
            .unwrap();

        let order: Vec<(i64, i64)> = corpus.iter().map(|f| (f.dungeon, f.floor)).collect();
        assert_eq!(order, vec![(1, 1), (1, 3), (2, 1)]);
        assert_eq!(corpus[0].waves.len(), 2);
        assert_eq!(
            stats,
            RunStats {
                dungeons: 2,
                floors: 3,
                samples: 3,
                inconsistent_floors: 0,
            }
        );
    }

    #[test]
    fn test_inconsistent_floor_counted() {
        let mut source = MemorySource::default();
        source.insert(1, 1, "[[], [], [], [], []]");
        source.insert(1, 1, "[[], [], [], [], []]");
        source.insert(1, 1, "[[], [], [], []]");

        let (corpus, stats) = CorpusDriver::default()
            .analyze_corpus(&source, &JsonSampleDecoder)
            .unwrap();

        assert_eq!(corpus[0].waves.len(), 5);
        assert_eq!(stats.inconsistent_floors, 1);
    }

    #[tokio::test]
    async fn test_decode_failure_writes_nothing() {
        let mut source = MemorySource::default();
        source.insert(1, 1, "[[]]");
        source.insert(2, 1, "not json");
        let mut sink = RecordingSink::default();

        let result = CorpusDriver::default()
            .run(&source, &JsonSampleDecoder, &mut sink)
            .await;

        assert!(matches!(result, Err(AnalysisError::Decode(_))));
        assert!(sink.written.is_empty());
    }

    #[tokio::test]
    async fn test_run_writes_once() {
        let mut source = MemorySource::default();
        source.insert(1, 1, r#"[[{"enemyId": 100, "level": 5}]]"#);
        let mut sink = RecordingSink::default();

        let stats = CorpusDriver::default()
            .run(&source, &JsonSampleDecoder, &mut sink)
            .await
            .unwrap();

        assert_eq!(stats.floors, 1);
        assert_eq!(sink.written.len(), 1);
        assert_eq!(sink.written[0][0].waves[0].enemies[0].id, 100);
    }

    #[tokio::test]
    async fn test_empty_store_writes_empty_corpus() {
        let source = MemorySource::default();
        let mut sink = RecordingSink::default();

        let stats = CorpusDriver::default()
            .run(&source, &JsonSampleDecoder, &mut sink)
            .await
            .unwrap();

        assert_eq!(stats, RunStats::default());
        assert_eq!(sink.written, vec![Vec::new()]);
    }
}
