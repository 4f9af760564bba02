#![cfg(unix)]

use super::*;
use crate::config::{CommandConfig, ErrorMessages, Palette, Theme};
use crate::error::ErrorSeverity;
use crate::transform::AnnotationTag;
use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

const SCRIPT: &str = "fun main() {\n    val x = 1\n    println(x)\n}";
const KEYWORD_COLOR: Color = Color::rgb(0xFF, 0x79, 0xC6);

/// Write an executable "interpreter" plus script and keyword fixtures, and
/// return a config pointing at them.
fn fixture_config(dir: &TempDir, interpreter_body: &str) -> Config {
    let executable = dir.path().join("interp.sh");
    fs::write(&executable, format!("#!/bin/sh\n{interpreter_body}\n")).unwrap();
    let mut perms = fs::metadata(&executable).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&executable, perms).unwrap();

    let script_path = dir.path().join("script.kts");
    fs::write(&script_path, SCRIPT).unwrap();

    let keywords_json = dir.path().join("keywords.json");
    fs::write(&keywords_json, r##"[{ "word": "fun", "color": "#FF79C6" }]"##).unwrap();

    let themes: HashMap<String, Theme> = [(
        "dark".to_string(),
        Theme {
            text: Color::rgb(0xF8, 0xF8, 0xF2),
            background: Color::rgb(0x28, 0x2A, 0x36),
            container: Color::rgb(0x44, 0x47, 0x5A),
        },
    )]
    .into_iter()
    .collect();

    Config {
        command: CommandConfig {
            executable: executable.to_string_lossy().into_owned(),
            script_path,
        },
        errors: ErrorMessages {
            compiler_not_found: "Compiler not found. Is it on your PATH?".to_string(),
            generic: "Execution failed: ".to_string(),
        },
        font_size: 14,
        keywords_json,
        error_prefix: "ERR:".to_string(),
        colors: Palette {
            error: Color::rgb(0xFF, 0x55, 0x55),
            primary: Color::rgb(0x50, 0xFA, 0x7B),
            string: Color::rgb(0xF1, 0xFA, 0x8C),
            comment: Color::rgb(0x62, 0x72, 0xA4),
            themes,
        },
    }
}

#[test]
fn load_reads_the_script_file() {
    let dir = TempDir::new().unwrap();
    let session = Session::load(fixture_config(&dir, "exit 0"), "dark").unwrap();
    assert_eq!(session.script(), SCRIPT);
    assert_eq!(session.exit_code(), None);
    assert_eq!(session.status_line().0, "Exit Code: N/A");
}

#[test]
fn sessions_are_debug_printable() {
    let dir = TempDir::new().unwrap();
    let session = Session::load(fixture_config(&dir, "exit 0"), "dark").unwrap();
    let rendered = format!("{session:?}");
    assert!(rendered.contains("Session"));
    assert!(rendered.contains("exit_code: None"));
}

#[test]
fn a_missing_script_file_becomes_empty_text() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture_config(&dir, "exit 0");
    config.command.script_path = dir.path().join("does-not-exist.kts");
    let session = Session::load(config, "dark").unwrap();
    assert_eq!(session.script(), "");
}

#[test]
fn an_unknown_theme_fails_load() {
    let dir = TempDir::new().unwrap();
    let err = Session::load(fixture_config(&dir, "exit 0"), "solarized").unwrap_err();
    assert!(matches!(err, ScriptpadError::UnknownTheme { .. }));
}

#[test]
fn a_missing_keyword_dictionary_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture_config(&dir, "exit 0");
    config.keywords_json = dir.path().join("missing.json");
    let err = Session::load(config, "dark").unwrap_err();
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}

#[test]
fn script_highlighting_uses_the_loaded_dictionary() {
    let dir = TempDir::new().unwrap();
    let session = Session::load(fixture_config(&dir, "exit 0"), "dark").unwrap();
    let highlighted = session.highlight_script();
    assert_eq!(
        highlighted.styled.style_at(0).unwrap().color,
        KEYWORD_COLOR
    );
}

#[test]
fn run_streams_stdout_verbatim_and_prefixes_stderr() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(&dir, "echo \"hello\"\necho \"oops\" 1>&2\nexit 0");
    let mut session = Session::load(config, "dark").unwrap();
    let code = session.run().unwrap();
    assert_eq!(code, 0);
    assert_eq!(session.exit_code(), Some(0));
    assert!(session.output().contains("hello\n"));
    assert!(session.output().contains("ERR: oops\n"));
    let (status, color) = session.status_line();
    assert_eq!(status, "Exit Code: 0");
    assert_eq!(color, Color::rgb(0x50, 0xFA, 0x7B));
}

#[test]
fn a_nonzero_exit_code_uses_the_error_color() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::load(fixture_config(&dir, "exit 7"), "dark").unwrap();
    session.run().unwrap();
    let (status, color) = session.status_line();
    assert_eq!(status, "Exit Code: 7");
    assert_eq!(color, Color::rgb(0xFF, 0x55, 0x55));
}

#[test]
fn run_persists_the_edited_script_first() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::load(fixture_config(&dir, "cat \"$2\""), "dark").unwrap();
    session.set_script("line one\nline two");
    session.run().unwrap();
    assert_eq!(session.output(), "line one\nline two\n");
}

#[test]
fn each_run_replaces_the_previous_output() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::load(fixture_config(&dir, "echo \"only\""), "dark").unwrap();
    session.run().unwrap();
    session.run().unwrap();
    assert_eq!(session.output(), "only\n");
}

#[test]
fn edit_replaces_a_character_range() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::load(fixture_config(&dir, "exit 0"), "dark").unwrap();
    session.set_script("val x = 1");
    session.edit(8..9, "42");
    assert_eq!(session.script(), "val x = 42");
    session.edit(0..3, "var");
    assert_eq!(session.script(), "var x = 42");
}

#[test]
fn a_missing_interpreter_maps_to_the_compiler_not_found_message() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture_config(&dir, "exit 0");
    config.command.executable = dir
        .path()
        .join("no-such-compiler")
        .to_string_lossy()
        .into_owned();
    let mut session = Session::load(config, "dark").unwrap();
    let err = session.run().unwrap_err();
    assert!(matches!(err, ScriptpadError::Launch { .. }));
    assert_eq!(session.exit_code(), None);
    let message = session.user_message(&err);
    assert!(message.starts_with("Compiler not found."));
    assert!(message.contains("\n\n"));
    assert_eq!(session.status_line().0, "Exit Code: N/A");
}

#[test]
fn stderr_locations_are_navigable_after_a_run() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(&dir, "echo \"$2:3:5: boom\" 1>&2\nexit 2");
    let script_path = config.command.script_path.display().to_string();
    let mut session = Session::load(config, "dark").unwrap();
    session.run().unwrap();

    let expected = format!("ERR: {script_path}:3:5: boom\n");
    assert_eq!(session.output(), expected);

    let highlighted = session.highlight_output();
    assert!(highlighted
        .annotations
        .iter()
        .any(|a| a.tag == AnnotationTag::Error));
    let url = highlighted
        .annotations
        .iter()
        .find(|a| a.tag == AnnotationTag::Url)
        .expect("location annotation");
    assert_eq!(url.payload, format!("{script_path}:3:5"));

    let target = session.click_output(url.range.start).expect("navigable");
    assert_eq!(target.line, 2);
    assert_eq!(target.column, 5);
    // Offset lands inside the script's third line.
    assert_eq!(target.offset, 12 + 1 + 13 + 1 + 5);

    // A click on the plain part of the line goes nowhere.
    assert_eq!(session.click_output(0), None);
}
