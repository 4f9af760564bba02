//! Headless driver: load configuration, run the script once, print the
//! transformed output and the exit status.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use scriptpad::error::ResultExt;
use scriptpad::session::Session;
use scriptpad::{config, logging};

#[derive(Parser, Debug)]
#[command(name = "scriptpad", version, about = "Edit and run a script with highlighted, navigable output")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "~/.scriptpad/config.json")]
    config: String,

    /// Override the script path from the configuration
    #[arg(long)]
    script: Option<PathBuf>,

    /// Theme name from the configuration palette
    #[arg(long, default_value = "dark")]
    theme: String,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let _guard = logging::init();

    let mut config = config::load_config(&args.config)
        .context("startup configuration could not be loaded")?;
    if let Some(script) = args.script {
        config.command.script_path = script;
    }

    let mut session =
        Session::load(config, &args.theme).context("session could not be created")?;

    let code = match session.run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", session.user_message(&e));
            1
        }
    };

    // The rendered (tab-expanded) output, as plain text.
    let rendered = session.highlight_output();
    print!("{}", rendered.styled.text);
    println!("{}", session.status_line().0);
    std::io::stdout().flush().log_err();

    Ok(ExitCode::from(exit_status(code)))
}

/// Child exit code to our own process status. A signal-terminated child
/// (reported as -1) must still exit nonzero.
fn exit_status(code: i32) -> u8 {
    if code < 0 {
        1
    } else {
        code.min(255) as u8
    }
}
