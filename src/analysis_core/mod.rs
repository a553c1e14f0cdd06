//! Analysis Core - Wave Composition Inference
//!
//! Reconciles many captured play-throughs of the same floor into one canonical
//! description of every wave: which enemies can appear, their plus value, the
//! drops ever seen from them and the observed enemy count range.
//!
//! # Architecture
//!
//! ```text
//! waves.sqlite3 → SqliteObservationReader (distinct dungeons → floors → rows)
//!     ↓
//! SampleDecoder (blob → waves of EncounterRecord)
//!     ↓
//! FloorAnalyzer (canonical wave count, per-slot fan-out)
//!     ↓
//! WaveAggregator (identity grouping, plus/drop reconciliation, min/max)
//!     ↓
//! CorpusDriver → CorpusSink (waves.json)
//! ```

pub mod decoder;
pub mod driver;
pub mod encounter;
pub mod error;
pub mod floor_analyzer;
pub mod json_writer;
pub mod sink_backend;
pub mod sqlite_reader;
pub mod summary;
pub mod wave_aggregator;

pub use decoder::{DecodeError, JsonSampleDecoder, SampleDecoder};
pub use driver::{CorpusDriver, RunStats};
pub use encounter::{EncounterRecord, EnemyIdentity, Sample, Wave};
pub use error::AnalysisError;
pub use floor_analyzer::{FloorAnalysis, FloorAnalyzer};
pub use json_writer::JsonCorpusWriter;
pub use sink_backend::{CorpusSink, SinkError};
pub use sqlite_reader::{Observation, ObservationSource, ReaderError, SqliteObservationReader};
pub use summary::{CorpusResult, DistinctEnemy, DropEntry, FloorSummary, InvadeSummary, WaveSummary};
pub use wave_aggregator::{DropLevelSource, WaveAggregator};
