use serde_json::json;

use crate::cli::ProcessAction;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `hostgate process` commands.
pub fn execute(ctx: &Context, action: &ProcessAction, json: bool) -> Result<()> {
    match action {
        ProcessAction::Spawn { executable, args } => {
            let pid = ctx.process_mediator().spawn(executable, args)?;

            if json {
                output::document(&json!({ "status": "Process started", "pid": pid }));
            } else {
                output::success(&format!("Process started: {executable} (pid {pid})"));
            }
        }
    }

    Ok(())
}
