use serde_json::json;

use crate::cli::FileAction;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `hostgate file` commands.
pub fn execute(ctx: &Context, action: &FileAction, json: bool) -> Result<()> {
    let mediator = ctx.file_mediator();

    let (status, path) = match action {
        FileAction::Create { path, content } => {
            let path = path.as_deref().unwrap_or_default();
            mediator.create(path, content.as_deref())?;
            ("File created", path)
        }
        FileAction::Update { path, content } => {
            let path = path.as_deref().unwrap_or_default();
            mediator.update(path, content.as_deref())?;
            ("File updated", path)
        }
        FileAction::Delete { path } => {
            let path = path.as_deref().unwrap_or_default();
            mediator.delete(path)?;
            ("File deleted", path)
        }
    };

    if json {
        output::document(&json!({ "status": status, "path": path }));
    } else {
        output::success(&format!("{status}: {path}"));
    }

    Ok(())
}
