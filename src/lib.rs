//! Scriptpad - edit a script, run it, and navigate its output.
//!
//! The library is the whole tool minus the window toolkit: a text
//! transformation engine that highlights script source and process output
//! while keeping an invertible offset map back to the original text, a
//! process controller that streams a child's stdout and stderr without
//! dropping lines, and the navigation glue that turns a click on a
//! `path:line[:col]` reference into a cursor position in the script.

pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigate;
pub mod runner;
pub mod session;
pub mod transform;
