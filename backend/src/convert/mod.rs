//! External document tools.
//!
//! The report pipeline only sees the two traits below. The real implementations
//! shell out to LibreOffice and poppler's `pdfunite`, each bounded by a timeout;
//! tests plug in in-process fakes.

mod libreoffice;
mod pdfunite;

pub use libreoffice::LibreOfficeConverter;
pub use pdfunite::PdfUniteMerger;

use crate::error::{ConversionError, MergeError};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Turns one filled workbook into PDF bytes.
pub trait DocumentConverter: Send + Sync {
    fn convert(&self, document: &[u8]) -> Result<Vec<u8>, ConversionError>;
}

/// Concatenates PDF files, in order, into `output`.
pub trait PdfMerger: Send + Sync {
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError>;
}

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub(crate) enum RunError {
    Spawn(String, std::io::Error),
    TimedOut(Duration),
    Io(std::io::Error),
}

impl From<RunError> for ConversionError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Spawn(program, source) => ConversionError::Spawn { program, source },
            RunError::TimedOut(timeout) => ConversionError::TimedOut(timeout),
            RunError::Io(e) => ConversionError::Io(e),
        }
    }
}

impl From<RunError> for MergeError {
    fn from(err: RunError) -> Self {
        match err {
            RunError::Spawn(program, source) => MergeError::Spawn { program, source },
            RunError::TimedOut(timeout) => MergeError::TimedOut(timeout),
            RunError::Io(e) => MergeError::Io(e),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Finished {
    pub status: ExitStatus,
    pub stderr: String,
}

/// Starts the child as leader of a new process group so a timeout can take
/// down everything it spawned. `soffice` is a wrapper that forks the real
/// worker, which would otherwise outlive the kill.
#[cfg(unix)]
fn own_process_group(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn own_process_group(_command: &mut Command) {}

fn kill_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        // The child leads its own group, so its pid is the group id.
        let group = child.id() as libc::pid_t;
        // SAFETY: killpg only sends a signal; an already gone group yields ESRCH.
        unsafe {
            libc::killpg(group, libc::SIGKILL);
        }
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// Runs `command` to completion, killing it and its descendants once
/// `timeout` has passed.
///
/// stderr goes to an anonymous temp file rather than a pipe, so a chatty tool
/// cannot stall on a full pipe while we poll.
pub(crate) fn run_with_timeout(
    command: &mut Command,
    timeout: Duration,
) -> Result<Finished, RunError> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut stderr_file = tempfile::tempfile().map_err(RunError::Io)?;
    let stderr_sink = stderr_file.try_clone().map_err(RunError::Io)?;

    own_process_group(command);
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::from(stderr_sink))
        .spawn()
        .map_err(|e| RunError::Spawn(program.clone(), e))?;

    let started = Instant::now();
    let status = loop {
        match child.try_wait().map_err(RunError::Io)? {
            Some(status) => break status,
            None if started.elapsed() >= timeout => {
                log::error!("{} timed out after {:?}, killing it", program, timeout);
                kill_tree(&mut child);
                return Err(RunError::TimedOut(timeout));
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    };
    log::debug!("{} exited with {}", program, status);

    let mut raw = Vec::new();
    stderr_file
        .seek(SeekFrom::Start(0))
        .and_then(|_| stderr_file.read_to_end(&mut raw))
        .map_err(RunError::Io)?;
    Ok(Finished {
        status,
        stderr: String::from_utf8_lossy(&raw).trim().to_string(),
    })
}


#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn reports_exit_status_and_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo broken >&2; exit 3"]);
        let finished = run_with_timeout(&mut command, Duration::from_secs(5)).unwrap();

        assert_eq!(finished.status.code(), Some(3));
        assert_eq!(finished.stderr, "broken");
    }

    #[test]
    fn kills_commands_that_run_too_long() {
        let mut command = Command::new("sleep");
        command.arg("5");
        let started = Instant::now();
        let err = run_with_timeout(&mut command, Duration::from_millis(200)).unwrap_err();

        assert!(matches!(err, RunError::TimedOut(_)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(target_os = "linux")]
    fn running(pid: &str) -> bool {
        // Killed processes may linger as zombies until reparented and reaped.
        std::fs::read_to_string(format!("/proc/{}/stat", pid))
            .map(|stat| !stat.contains(") Z "))
            .unwrap_or(false)
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn timeout_also_kills_spawned_workers() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("worker.pid");
        let mut command = Command::new("sh");
        command.args([
            "-c",
            &format!("sleep 7 & echo $! > {}; wait", pid_file.display()),
        ]);

        let err = run_with_timeout(&mut command, Duration::from_millis(300)).unwrap_err();
        assert!(matches!(err, RunError::TimedOut(_)));

        let pid = std::fs::read_to_string(&pid_file).unwrap();
        let pid = pid.trim();
        let deadline = Instant::now() + Duration::from_secs(3);
        while running(pid) && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(50));
        }
        assert!(!running(pid), "worker {} survived the timeout", pid);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut command = Command::new("definitely-not-installed-converter");
        let err = run_with_timeout(&mut command, Duration::from_secs(1)).unwrap_err();

        let err = ConversionError::from(err);
        assert!(matches!(err, ConversionError::Spawn { .. }));
        assert!(err.to_string().contains("definitely-not-installed-converter"));
    }
}
