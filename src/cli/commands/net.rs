use serde_json::json;

use crate::cli::NetAction;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `hostgate net` commands.
pub fn execute(ctx: &Context, action: &NetAction, json: bool) -> Result<()> {
    match action {
        NetAction::Send {
            address,
            port,
            data,
        } => {
            let bytes_sent = ctx.network_mediator().send_tcp(
                address.as_deref(),
                port.as_deref(),
                data.as_deref(),
            )?;

            if json {
                output::document(&json!({ "status": "Data sent", "bytes_sent": bytes_sent }));
            } else {
                output::success(&format!("Data sent: {bytes_sent} bytes"));
            }
        }
    }

    Ok(())
}
