//! Result sinks.
//!
//! The payload is the only thing written to the result channel. Logs go
//! through `tracing`, which never shares a sink with the payload.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use crate::error::Result;
use crate::models::order::ExtractionPayload;

/// Destination for the single payload of an invocation.
///
/// `emit` consumes the sink, so a payload can be emitted at most once.
pub trait ResultSink {
    fn emit(self, payload: &ExtractionPayload) -> Result<()>;
}

/// Writes the payload as JSON to any writer (stdout in the CLI).
pub struct WriterSink<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write> ResultSink for WriterSink<W> {
    fn emit(mut self, payload: &ExtractionPayload) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, payload)?;
        } else {
            serde_json::to_writer(&mut self.writer, payload)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Persists payloads as timestamp-named JSON files.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `payload` as `<supplier>_<unix-millis>.json`, returning the path.
    pub fn persist(&self, payload: &ExtractionPayload) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let mut millis = Utc::now().timestamp_millis();
        let mut path = self.artifact_path(payload, millis);
        // Two payloads within the same millisecond must not overwrite each other
        while path.exists() {
            millis += 1;
            path = self.artifact_path(payload, millis);
        }

        let content = serde_json::to_string_pretty(payload)?;
        fs::write(&path, content)?;

        debug!("Persisted payload to {}", path.display());
        Ok(path)
    }

    fn artifact_path(&self, payload: &ExtractionPayload, millis: i64) -> PathBuf {
        self.dir.join(format!("{}_{}.json", payload.supplier, millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::Supplier;

    fn payload() -> ExtractionPayload {
        ExtractionPayload::success(
            Supplier::Dreamprice,
            Default::default(),
            Vec::new(),
            Supplier::Dreamprice.extractor().columns(),
        )
    }

    #[test]
    fn test_writer_sink_emits_one_json_line() {
        let mut buf = Vec::new();
        WriterSink::new(&mut buf).emit(&payload()).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
        let parsed: ExtractionPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, payload());
    }

    #[test]
    fn test_artifacts_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("out"));

        let first = writer.persist(&payload()).unwrap();
        let second = writer.persist(&payload()).unwrap();
        assert_ne!(first, second);

        let name = first.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("dreamprice_"));
        assert!(name.ends_with(".json"));

        let stored: ExtractionPayload =
            serde_json::from_str(&fs::read_to_string(&first).unwrap()).unwrap();
        assert_eq!(stored, payload());
    }
}
