//! Subprocess execution with captured output and an optional time limit.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::ExportError;

use super::Tool;

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Number of trailing stderr lines quoted in failure messages.
const STDERR_TAIL_LINES: usize = 5;

/// Output of a finished subprocess.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl Captured {
    /// Last few non-empty stderr lines, joined for a one-line message.
    pub fn stderr_tail(&self) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
        lines[start..].join(" | ")
    }

    /// Failure message for a non-zero exit.
    pub fn failure_message(&self, tool: Tool) -> String {
        let tail = self.stderr_tail();
        if tail.is_empty() {
            format!("{} exited with {}", tool, self.status)
        } else {
            format!("{} exited with {}: {}", tool, self.status, tail)
        }
    }
}

/// Reasons a subprocess run did not produce a [`Captured`] result.
#[derive(Debug)]
pub enum RunError {
    Spawn(std::io::Error),
    Wait(std::io::Error),
    Timeout(Duration),
}

impl RunError {
    /// Convert into the pipeline error of the calling stage.
    pub fn into_export<S>(self, tool: Tool, stage: S) -> ExportError
    where
        S: FnOnce(String) -> ExportError,
    {
        match self {
            RunError::Spawn(e) => stage(format!("failed to start {}: {}", tool, e)),
            RunError::Wait(e) => stage(format!("lost track of {}: {}", tool, e)),
            RunError::Timeout(limit) => ExportError::Timeout { tool, limit },
        }
    }
}

/// Run a command to completion, capturing stdout and stderr.
pub fn run_captured(
    mut command: Command,
    timeout: Option<Duration>,
) -> std::result::Result<Captured, RunError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let mut child = command.spawn().map_err(RunError::Spawn)?;

    // Drain both pipes concurrently so a chatty child cannot block on a full buffer.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_reader = thread::spawn(move || read_pipe(stdout));
    let stderr_reader = thread::spawn(move || read_pipe(stderr));

    let status = wait_for(&mut child, timeout)?;

    Ok(Captured {
        status,
        stdout: stdout_reader.join().unwrap_or_default(),
        stderr: stderr_reader.join().unwrap_or_default(),
    })
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf) {
            tracing::debug!("Pipe read ended early: {}", e);
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn wait_for(
    child: &mut Child,
    timeout: Option<Duration>,
) -> std::result::Result<ExitStatus, RunError> {
    let Some(limit) = timeout else {
        return child.wait().map_err(RunError::Wait);
    };

    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait().map_err(RunError::Wait)? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            if let Err(e) = child.kill() {
                tracing::warn!("Failed to kill timed out process: {}", e);
            }
            let _ = child.wait();
            return Err(RunError::Timeout(limit));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
