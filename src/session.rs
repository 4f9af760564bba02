//! The editor session: script text, accumulated output, and one run at a
//! time.
//!
//! The session owns the script source and the output text; both are
//! mutated only here. Highlighting is recomputed from a snapshot on every
//! request, so the session needs no locking beyond the buffer the reader
//! callbacks append to during a run.

use std::fmt;
use std::fs;
use std::io;
use std::ops::Range;
use std::sync::Mutex;
use tracing::{info, instrument, warn};

use crate::color::Color;
use crate::config::{self, Config, Theme};
use crate::error::{ResultExt, ScriptpadError};
use crate::navigate::{self, CursorTarget};
use crate::runner::ScriptRunner;
use crate::transform::{Highlight, Highlighted, OutputHighlighter, ScriptHighlighter};

pub struct Session {
    config: Config,
    theme: Theme,
    script_highlighter: ScriptHighlighter,
    output_highlighter: OutputHighlighter,
    runner: ScriptRunner,
    script: String,
    output: String,
    exit_code: Option<i32>,
}

impl Session {
    /// Build a session from loaded configuration: resolve the theme, load
    /// the keyword dictionary (fatal on failure) and read the script file,
    /// treating a missing or unreadable file as empty text.
    pub fn load(config: Config, theme_name: &str) -> Result<Session, ScriptpadError> {
        let theme = config.theme(theme_name)?.clone();
        let keywords = config::load_keywords(&config.keywords_json)?;
        let script_highlighter = ScriptHighlighter::new(
            theme.text,
            config.colors.string,
            config.colors.comment,
            keywords,
        );
        let output_highlighter = OutputHighlighter::new(
            theme.text,
            config.colors.error,
            config.error_prefix.clone(),
            &config.command.script_path,
        );
        let runner = ScriptRunner::new(&config.command);
        let script = fs::read_to_string(&config.command.script_path)
            .warn_on_err()
            .unwrap_or_default();
        info!(
            script_path = %config.command.script_path.display(),
            theme = theme_name,
            "session ready"
        );
        Ok(Session {
            config,
            theme,
            script_highlighter,
            output_highlighter,
            runner,
            script,
            output: String::new(),
            exit_code: None,
        })
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace a character range of the script with new text (the editor's
    /// one mutation primitive).
    pub fn edit(&mut self, range: Range<usize>, replacement: &str) {
        let start = byte_offset(&self.script, range.start);
        let end = byte_offset(&self.script, range.end.max(range.start));
        self.script.replace_range(start..end, replacement);
    }

    pub fn set_script(&mut self, contents: impl Into<String>) {
        self.script = contents.into();
    }

    /// Persist the script and run it, streaming both output streams into
    /// the session's output text. Stdout lines are appended verbatim;
    /// stderr lines get the configured error prefix. Blocks until the child
    /// exits; there is no mid-run cancellation.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<i32, ScriptpadError> {
        self.output.clear();
        self.exit_code = None;

        self.runner
            .write_script(&self.script)
            .map_err(|e| ScriptpadError::Run {
                message: e.to_string(),
            })?;

        let prefix = self.config.error_prefix.clone();
        let buffer = Mutex::new(String::new());
        let result = self.runner.run(
            |line| {
                let mut out = buffer.lock().unwrap_or_else(|e| e.into_inner());
                out.push_str(&line);
                out.push('\n');
            },
            |line| {
                let mut out = buffer.lock().unwrap_or_else(|e| e.into_inner());
                out.push_str(&prefix);
                out.push(' ');
                out.push_str(&line);
                out.push('\n');
            },
        );
        self.output = buffer.into_inner().unwrap_or_else(|e| e.into_inner());

        match result {
            Ok(code) => {
                self.exit_code = Some(code);
                info!(code, "script run finished");
                Ok(code)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(executable = %self.config.command.executable, "interpreter not found");
                Err(ScriptpadError::Launch {
                    executable: self.config.command.executable.clone(),
                    source: e,
                })
            }
            Err(e) => Err(ScriptpadError::Run {
                message: e.to_string(),
            }),
        }
    }

    /// Compose the single user-visible message for a failed run; never a
    /// raw backtrace.
    pub fn user_message(&self, error: &ScriptpadError) -> String {
        match error {
            ScriptpadError::Launch { source, .. } => {
                format!("{}\n\n{}", self.config.errors.compiler_not_found, source)
            }
            ScriptpadError::Run { message } => {
                format!("{}{}", self.config.errors.generic, message)
            }
            other => other.to_string(),
        }
    }

    pub fn highlight_script(&self) -> Highlighted {
        self.script_highlighter.highlight(&self.script)
    }

    pub fn highlight_output(&self) -> Highlighted {
        self.output_highlighter.highlight(&self.output)
    }

    /// Resolve a click at a transformed offset in the output pane to a
    /// cursor target in the script, or `None` when nothing navigable is
    /// there.
    pub fn click_output(&self, offset: usize) -> Option<CursorTarget> {
        navigate::click(&self.output_highlighter, &self.output, offset, &self.script)
    }

    /// The exit-code display: text plus the color it should render in
    /// (primary for success or not-yet-run, error otherwise).
    pub fn status_line(&self) -> (String, Color) {
        match self.exit_code {
            Some(code) if code != 0 => (format!("Exit Code: {code}"), self.config.colors.error),
            Some(code) => (format!("Exit Code: {code}"), self.config.colors.primary),
            None => ("Exit Code: N/A".to_string(), self.config.colors.primary),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("script_path", &self.config.command.script_path)
            .field("script_chars", &self.script.chars().count())
            .field("output_chars", &self.output.chars().count())
            .field("exit_code", &self.exit_code)
            .finish_non_exhaustive()
    }
}

/// Byte index of a character offset, clamped to the end of the string.
fn byte_offset(s: &str, char_offset: usize) -> usize {
    s.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
