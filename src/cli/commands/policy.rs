use colored::Colorize;
use serde_json::json;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::platform::Platform;

/// Execute the `hostgate policy` command.
///
/// Shows the detected platform and the executables allowed on it.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let allowlist = ctx.policy.allowlist(ctx.platform);

    if json {
        output::document(&json!({
            "platform": ctx.platform,
            "allowlist": allowlist,
        }));
        return Ok(());
    }

    output::header(&format!("Platform: {}", ctx.platform.to_string().cyan()));
    if ctx.platform == Platform::Unknown {
        output::warning("Unsupported platform: process spawning is disabled");
        return Ok(());
    }
    if allowlist.is_empty() {
        output::warning("No executables are allowed");
        return Ok(());
    }
    for exe in allowlist {
        output::success(exe);
    }

    Ok(())
}
