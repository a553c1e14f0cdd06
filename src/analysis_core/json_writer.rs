//! JSON document writer for the wave corpus

use super::sink_backend::{CorpusSink, SinkError};
use super::summary::CorpusResult;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Writes the corpus as one pretty-printed JSON document
///
/// The document is staged next to the target and renamed into place, so a
/// failed run never leaves a truncated document behind.
pub struct JsonCorpusWriter {
    output_path: PathBuf,
}

impl JsonCorpusWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .output_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.output_path.with_file_name(name)
    }
}

/// Four-space indented JSON
pub fn render_document(corpus: &CorpusResult) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    corpus.serialize(&mut serializer)?;
    Ok(buf)
}

#[async_trait]
impl CorpusSink for JsonCorpusWriter {
    async fn write_corpus(&mut self, corpus: &CorpusResult) -> Result<(), SinkError> {
        let document = render_document(corpus)?;

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let staging = self.staging_path();
        let mut file = tokio::fs::File::create(&staging).await?;
        file.write_all(&document).await?;
        file.sync_all().await?;
        drop(file);

        tokio::fs::rename(&staging, &self.output_path).await?;

        log::info!(
            "📝 Wrote {} floors ({} bytes) to: {}",
            corpus.len(),
            document.len(),
            self.output_path.display()
        );
        Ok(())
    }

    fn backend_type(&self) -> &'static str {
        "JSON"
    }
}
