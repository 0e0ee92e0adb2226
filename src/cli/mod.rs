pub mod commands;
pub mod context;
pub mod output;

use clap::{Parser, Subcommand};

/// Policy-checked file, process and network operations with an audit trail.
#[derive(Parser, Debug)]
#[command(name = "hostgate", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (default: ./hostgate.toml if present)
    #[arg(long, global = true, env = "HOSTGATE_CONFIG")]
    pub config: Option<String>,

    /// Print the response document as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, update or delete a file
    File {
        #[command(subcommand)]
        action: FileAction,
    },

    /// Start an allow-listed executable
    Process {
        #[command(subcommand)]
        action: ProcessAction,
    },

    /// Send data over TCP
    Net {
        #[command(subcommand)]
        action: NetAction,
    },

    /// Show the audit log
    Log {
        /// Only show entries with this activity (e.g. create, process_start)
        #[arg(long = "type")]
        activity: Option<String>,
        /// Show last N entries
        #[arg(long)]
        last: Option<usize>,
    },

    /// Show the detected platform and its allowlist
    Policy,
}

#[derive(Subcommand, Debug)]
pub enum FileAction {
    /// Create a file, overwriting it if it exists
    Create {
        /// Target file path
        #[arg(long, alias = "file-path")]
        path: Option<String>,
        /// Content to write
        #[arg(long)]
        content: Option<String>,
    },
    /// Overwrite an existing file
    Update {
        /// Target file path
        #[arg(long, alias = "file-path")]
        path: Option<String>,
        /// New content to write
        #[arg(long, alias = "new-content")]
        content: Option<String>,
    },
    /// Delete an existing file
    Delete {
        /// Target file path
        #[arg(long, alias = "file-path")]
        path: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProcessAction {
    /// Spawn a detached process
    Spawn {
        /// Absolute path of the executable
        executable: String,
        /// Arguments passed to the executable
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NetAction {
    /// Open a TCP connection and send a payload
    Send {
        /// Destination host name or IP address
        #[arg(long, alias = "destination-address")]
        address: Option<String>,
        /// Destination port
        #[arg(long, alias = "destination-port")]
        port: Option<String>,
        /// Payload to send
        #[arg(long)]
        data: Option<String>,
    },
}
