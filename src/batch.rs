// SPDX-License-Identifier: MPL-2.0
//! Runs the extractor over many files and writes the CSV report.
//!
//! Per-file failures are logged and skipped so one bad file does not stop
//! the run. Signature mismatches and corrupt files are logged separately.

use crate::config::Config;
use crate::directory_scanner::FileList;
use crate::error::Result;
use crate::metadata::{self, DecodeOptions, JpegBackend};
use crate::report::ReportWriter;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome counts of a report run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub not_jpeg: usize,
    pub failed: usize,
}

impl Summary {
    pub fn skipped(&self) -> usize {
        self.not_jpeg + self.failed
    }
}

/// Extracts every candidate file under `inputs` and writes one row per JPEG.
pub fn run<P, W>(inputs: &[P], config: &Config, out: W) -> Result<Summary>
where
    P: AsRef<Path>,
    W: Write,
{
    let files = FileList::collect(inputs, &config.scan)?;
    debug!(count = files.len(), "collected candidate files");

    let options = DecodeOptions::from(config.decode);
    let mut writer = ReportWriter::new(out, config.report.human_readable_size);
    writer.write_header()?;

    let mut summary = Summary::default();
    for path in files.iter() {
        match metadata::extract_with(path, &JpegBackend, &options) {
            Ok((record, _headers)) => {
                writer.write_record(&record)?;
                summary.processed += 1;
            }
            Err(e) if e.is_format_mismatch() => {
                warn!(path = %path.display(), "signature does not match known JPEG signatures");
                summary.not_jpeg += 1;
            }
            Err(e) if e.is_skippable() => {
                warn!(path = %path.display(), error = %e, "skipping file");
                summary.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    writer.into_inner()?;

    info!(
        processed = summary.processed,
        skipped = summary.skipped(),
        "report complete"
    );
    Ok(summary)
}
