use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde_json::{Value, json};

use crate::core::errors::GateError;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppress non-error output for the rest of the run.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print a success message.
pub fn success(msg: &str) {
    if !quiet() {
        println!("  {} {}", "✓".green(), msg);
    }
}

/// Print a warning message.
pub fn warning(msg: &str) {
    if !quiet() {
        println!("  {} {}", "⚠".yellow(), msg);
    }
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a header line.
pub fn header(msg: &str) {
    if !quiet() {
        println!("\n{}", msg.bold());
    }
}

/// Print a response document on stdout, one line.
pub fn document(value: &Value) {
    println!("{value}");
}

/// The error document for `err`: `error`, plus `message` and `path` when known.
pub fn error_document(err: &GateError) -> Value {
    let mut doc = json!({ "error": err.to_string() });
    if let Some(cause) = err.cause() {
        doc["message"] = Value::String(cause);
    }
    if let Some(path) = err.path() {
        doc["path"] = Value::String(path.to_string());
    }
    doc
}

/// Report a failed command in the selected format.
pub fn failure(err: &GateError, json: bool) {
    if json {
        document(&error_document(err));
        return;
    }
    match err.cause() {
        Some(cause) => error(&format!("Error: {err}: {cause}")),
        None => error(&format!("Error: {err}")),
    }
}
