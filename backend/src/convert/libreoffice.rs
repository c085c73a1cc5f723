use super::{run_with_timeout, DocumentConverter};
use crate::error::ConversionError;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

const INPUT_NAME: &str = "report.xlsx";
const OUTPUT_NAME: &str = "report.pdf";

/// Converts workbooks with a headless LibreOffice (`soffice --convert-to pdf`).
///
/// Every call works in its own scratch directory below `work_dir`, which also
/// hosts a throwaway LibreOffice profile so parallel calls do not fight over the
/// user profile lock. The directory is removed when the call returns, on
/// success and failure alike.
#[derive(Debug, Clone)]
pub struct LibreOfficeConverter {
    program: String,
    timeout: Duration,
    work_dir: PathBuf,
}

impl LibreOfficeConverter {
    pub fn new(program: impl Into<String>, timeout: Duration, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout,
            work_dir: work_dir.into(),
        }
    }
}

impl DocumentConverter for LibreOfficeConverter {
    fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConversionError> {
        let scratch = tempfile::Builder::new()
            .prefix("spielbericht-convert-")
            .tempdir_in(&self.work_dir)?;
        let input = scratch.path().join(INPUT_NAME);
        fs::write(&input, document)?;

        let mut command = Command::new(&self.program);
        command
            .arg("--headless")
            .arg(format!(
                "-env:UserInstallation=file://{}",
                scratch.path().join("profile").display()
            ))
            .args(["--convert-to", "pdf", "--outdir"])
            .arg(scratch.path())
            .arg(&input);

        let finished = run_with_timeout(&mut command, self.timeout)?;
        if !finished.status.success() {
            log::error!("{} failed: {}", self.program, finished.stderr);
            return Err(ConversionError::Failed {
                status: finished.status.to_string(),
                stderr: finished.stderr,
            });
        }

        let output = scratch.path().join(OUTPUT_NAME);
        if !output.exists() {
            return Err(ConversionError::NoOutput);
        }
        Ok(fs::read(output)?)
    }
}
