use colored::Colorize;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::{GateError, Result};
use crate::core::models::audit_entry::{Activity, ActivityDetails, AuditEntry};
use crate::core::traits::audit::AuditLog;

/// Execute the `hostgate log` command.
///
/// Displays the audit log, optionally filtered by activity and limited
/// to the last N entries.
pub fn execute(
    ctx: &Context,
    activity: Option<&str>,
    last: Option<usize>,
    json: bool,
) -> Result<()> {
    let entries = ctx.audit.read_all(activity)?;

    // Apply --last N (take from the end)
    let skip = last.map_or(0, |n| entries.len().saturating_sub(n));
    let display = &entries[skip..];

    if json {
        let value = serde_json::to_value(display).map_err(|e| GateError::AuditError {
            detail: format!("Failed to render audit entries: {e}"),
        })?;
        output::document(&value);
        return Ok(());
    }

    if display.is_empty() {
        output::header("hostgate log");
        output::warning("No audit entries found");
        if activity.is_some() {
            println!("  Try removing --type to see all entries.");
        }
        return Ok(());
    }

    output::header(&format!("hostgate log ({} entries)", display.len()));
    println!("  {}", ctx.audit.path().display().to_string().dimmed());
    println!();

    for entry in display {
        print_entry(entry);
    }

    Ok(())
}

/// Print a single audit entry as a formatted row.
fn print_entry(entry: &AuditEntry) {
    let date = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
    let target = match &entry.details {
        ActivityDetails::File { full_path } => full_path.clone(),
        ActivityDetails::Process {} => {
            format!("{} (pid {})", entry.command_line, entry.process_id)
        }
        ActivityDetails::Network(net) => format!(
            "{}:{} → {}:{} ({} bytes)",
            net.source_address,
            net.source_port,
            net.destination_address,
            net.destination_port,
            net.data_sent
        ),
    };

    println!(
        "  {} {} {:<14} {} {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        format_activity(entry.activity),
        target,
        entry.username.dimmed(),
    );
}

/// Format an activity as a colored string.
fn format_activity(activity: Activity) -> String {
    let name = activity.as_str();
    match activity {
        Activity::Create => name.green().to_string(),
        Activity::Update => name.yellow().to_string(),
        Activity::Delete => name.red().to_string(),
        Activity::ProcessStart => name.cyan().to_string(),
        Activity::NetworkSend => name.blue().to_string(),
    }
}
