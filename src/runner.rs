//! Child-process execution for one script run.
//!
//! The controller spawns `<executable> -script <scriptPath>`, drains stdout
//! and stderr on dedicated threads and blocks until the child exits. Within
//! one stream, callbacks fire in line-production order; there is no
//! ordering guarantee between the two streams. Both readers are joined
//! before `run` returns, so no line is dropped and no callback fires after
//! the call completes.

use std::fs;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, error, info};

use crate::config::CommandConfig;

/// Runs the configured interpreter/compiler against the script file.
pub struct ScriptRunner {
    executable: String,
    script_path: PathBuf,
}

impl ScriptRunner {
    pub fn new(command: &CommandConfig) -> Self {
        ScriptRunner {
            executable: command.executable.clone(),
            script_path: command.script_path.clone(),
        }
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    /// Overwrite the script file with the current editor contents. Called
    /// immediately before each run.
    pub fn write_script(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.script_path, contents)
    }

    /// Run the script and block until it terminates, returning its exit
    /// code (-1 when the child was terminated by a signal). Fails with the
    /// spawn error if the executable cannot be launched.
    ///
    /// Callbacks are invoked from the reader threads; marshaling onto a UI
    /// context is the caller's concern. Once launched, a run cannot be
    /// aborted.
    pub fn run<O, E>(&self, on_stdout: O, on_stderr: E) -> io::Result<i32>
    where
        O: FnMut(String) + Send,
        E: FnMut(String) + Send,
    {
        let mut child = Command::new(&self.executable)
            .arg("-script")
            .arg(&self.script_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                error!(error = %e, executable = %self.executable, "process spawn failed");
                e
            })?;
        info!(pid = child.id(), executable = %self.executable, "process spawned");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr not captured"))?;

        let status = thread::scope(|scope| {
            let out = scope.spawn(move || drain_lines(stdout, on_stdout));
            let err = scope.spawn(move || drain_lines(stderr, on_stderr));
            let status = child.wait();
            // Both streams are drained before the status is surfaced.
            if out.join().is_err() {
                error!("stdout reader panicked");
            }
            if err.join().is_err() {
                error!("stderr reader panicked");
            }
            status
        })?;

        let code = status.code().unwrap_or(-1);
        info!(code, "process exited");
        Ok(code)
    }
}

fn drain_lines<R: Read>(stream: R, mut on_line: impl FnMut(String)) {
    for line in BufReader::new(stream).lines() {
        match line {
            Ok(line) => on_line(line),
            Err(e) => {
                debug!(error = %e, "stream read ended");
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
