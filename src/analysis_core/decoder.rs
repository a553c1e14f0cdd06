//! Sample decoding - raw observation blob to ordered waves of encounters

use super::encounter::Sample;

/// Bytes of a malformed blob echoed into error messages
const BLOB_PREFIX_LEN: usize = 16;

#[derive(Debug)]
pub enum DecodeError {
    Utf8 {
        source: std::str::Utf8Error,
        blob_prefix: String,
    },
    Json {
        source: serde_json::Error,
        blob_prefix: String,
    },
}

impl DecodeError {
    pub fn blob_prefix(&self) -> &str {
        match self {
            DecodeError::Utf8 { blob_prefix, .. } => blob_prefix,
            DecodeError::Json { blob_prefix, .. } => blob_prefix,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Utf8 { source, blob_prefix } => {
                write!(f, "Invalid UTF-8 in blob {}: {}", blob_prefix, source)
            }
            DecodeError::Json { source, blob_prefix } => {
                write!(f, "Malformed sample in blob {}: {}", blob_prefix, source)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Utf8 { source, .. } => Some(source),
            DecodeError::Json { source, .. } => Some(source),
        }
    }
}

fn blob_prefix(blob: &[u8]) -> String {
    hex::encode(&blob[..blob.len().min(BLOB_PREFIX_LEN)])
}

/// Turns one raw observation into a `Sample`
pub trait SampleDecoder {
    fn decode(&self, blob: &[u8]) -> Result<Sample, DecodeError>;

    /// Get decoder name for logging
    fn decoder_name(&self) -> &'static str;
}

/// Decodes samples stored as a JSON array of waves, each an array of encounter objects
///
/// ```text
/// [[{"enemyId": 100, "level": 5, "plus": 0, "dropItemId": 7, "dropItemLevel": 1}], []]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSampleDecoder;

impl SampleDecoder for JsonSampleDecoder {
    fn decode(&self, blob: &[u8]) -> Result<Sample, DecodeError> {
        let text = std::str::from_utf8(blob).map_err(|source| DecodeError::Utf8 {
            source,
            blob_prefix: blob_prefix(blob),
        })?;

        serde_json::from_str(text).map_err(|source| DecodeError::Json {
            source,
            blob_prefix: blob_prefix(blob),
        })
    }

    fn decoder_name(&self) -> &'static str {
        "JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_core::encounter::EncounterRecord;

    #[test]
    fn test_decode_waves_in_order() {
        let blob = br#"[
            [{"enemyId": 100, "level": 5, "plus": 1, "dropItemId": 7, "dropItemLevel": 1}],
            [],
            [{"enemyId": 200, "level": 3}, {"enemyId": 201, "level": 3}]
        ]"#;

        let sample = JsonSampleDecoder.decode(blob).unwrap();

        assert_eq!(sample.len(), 3);
        assert_eq!(sample[0], vec![EncounterRecord::new(100, 5, 1).with_drop(7, 1)]);
        assert!(sample[1].is_empty());
        assert_eq!(sample[2][1].enemy_id, 201);
    }

    #[test]
    fn test_malformed_json() {
        let err = JsonSampleDecoder.decode(b"[[{\"enemyId\": 1}").unwrap_err();

        assert!(matches!(err, DecodeError::Json { .. }));
        assert_eq!(err.blob_prefix(), hex::encode(b"[[{\"enemyId\": 1}"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = JsonSampleDecoder.decode(br#"[[{"level": 1}]]"#).unwrap_err();

        assert!(matches!(err, DecodeError::Json { .. }));
    }

    #[test]
    fn test_invalid_utf8() {
        let err = JsonSampleDecoder.decode(&[0xff, 0xfe, 0x00]).unwrap_err();

        assert!(matches!(err, DecodeError::Utf8 { .. }));
        assert_eq!(err.blob_prefix(), "fffe00");
    }

    #[test]
    fn test_blob_prefix_truncated() {
        let blob = vec![b'x'; 64];

        assert_eq!(blob_prefix(&blob).len(), BLOB_PREFIX_LEN * 2);
    }
}
