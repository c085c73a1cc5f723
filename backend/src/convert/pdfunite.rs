use super::{run_with_timeout, PdfMerger};
use crate::error::MergeError;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// Merges PDFs with poppler's `pdfunite <in>... <out>`.
#[derive(Debug, Clone)]
pub struct PdfUniteMerger {
    program: String,
    timeout: Duration,
}

impl PdfUniteMerger {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl PdfMerger for PdfUniteMerger {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError> {
        let mut command = Command::new(&self.program);
        command.args(inputs).arg(output);

        let finished = run_with_timeout(&mut command, self.timeout)?;
        if !finished.status.success() {
            log::error!("{} failed: {}", self.program, finished.stderr);
            return Err(MergeError::Failed {
                status: finished.status.to_string(),
                stderr: finished.stderr,
            });
        }
        if !output.exists() {
            return Err(MergeError::NoOutput);
        }
        Ok(())
    }
}
