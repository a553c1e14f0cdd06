//! Error type for a full analysis run

use super::decoder::DecodeError;
use super::sink_backend::SinkError;
use super::sqlite_reader::ReaderError;

#[derive(Debug)]
pub enum AnalysisError {
    Reader(ReaderError),
    Decode(DecodeError),
    Sink(SinkError),
    /// A floor was handed to the analyzer without any samples
    EmptyFloor { dungeon: i64, floor: i64 },
}

impl From<ReaderError> for AnalysisError {
    fn from(err: ReaderError) -> Self {
        AnalysisError::Reader(err)
    }
}

impl From<DecodeError> for AnalysisError {
    fn from(err: DecodeError) -> Self {
        AnalysisError::Decode(err)
    }
}

impl From<SinkError> for AnalysisError {
    fn from(err: SinkError) -> Self {
        AnalysisError::Sink(err)
    }
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Reader(e) => write!(f, "Observation store error: {}", e),
            AnalysisError::Decode(e) => write!(f, "Decode error: {}", e),
            AnalysisError::Sink(e) => write!(f, "Output error: {}", e),
            AnalysisError::EmptyFloor { dungeon, floor } => {
                write!(f, "No samples for dungeon {} floor {}", dungeon, floor)
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Reader(e) => Some(e),
            AnalysisError::Decode(e) => Some(e),
            AnalysisError::Sink(e) => Some(e),
            AnalysisError::EmptyFloor { .. } => None,
        }
    }
}
