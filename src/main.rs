mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();

    init_tracing(args.verbose);
    cli::output::set_quiet(args.quiet);

    let result = cli::context::Context::load(args.config.as_deref()).and_then(|ctx| {
        match &args.command {
            Commands::File { action } => cli::commands::file::execute(&ctx, action, args.json),
            Commands::Process { action } => {
                cli::commands::process::execute(&ctx, action, args.json)
            }
            Commands::Net { action } => cli::commands::net::execute(&ctx, action, args.json),
            Commands::Log { activity, last } => {
                cli::commands::log::execute(&ctx, activity.as_deref(), *last, args.json)
            }
            Commands::Policy => cli::commands::policy::execute(&ctx, args.json),
        }
    });

    if let Err(e) = result {
        cli::output::failure(&e, args.json);
        std::process::exit(e.status().exit_code());
    }
}

/// Diagnostics go to stderr, filtered by `HOSTGATE_LOG` (default `warn`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("HOSTGATE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
