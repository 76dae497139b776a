use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use std::{fs::File, io::Write, path::Path};

use crate::process::{output_header, OutputRow};

/// CSV writer shared by every batch of a run. The header is written once,
/// from the first batch that supplies one.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    header_written: bool,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::create(path).with_context(|| format!("creating output file {:?}", path))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = WriterBuilder::new().flexible(true).from_writer(inner);
        Self {
            writer,
            header_written: false,
        }
    }

    /// Write `["State", "District", ...original]` unless a header was
    /// already written. Returns whether it wrote.
    pub fn write_header(&mut self, original: &[String]) -> Result<bool> {
        if self.header_written {
            return Ok(false);
        }
        self.writer
            .write_record(output_header(original))
            .context("writing CSV header")?;
        self.header_written = true;
        Ok(true)
    }

    pub fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        for row in rows {
            self.writer.write_record(row).context("writing CSV row")?;
        }
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("flushing CSV output: {}", e.error()))
    }
}
