mod commands;
mod config;

use anyhow::Context as _;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use commands::{Command, Context};
use config::Config;
use ledger_core::errors::{Error, ErrorKind};
use ledger_core::User;
use ledger_storage_memory::MemoryStore;

/// Inspect currencies and budgets of a ledger snapshot
#[derive(Parser, Debug)]
#[command(name = "ledger-cli", version, about, long_about = None)]
struct Args {
    /// ID of the calling user
    #[arg(long, env = "LEDGER_USER_ID", default_value_t = 1)]
    user: i32,

    /// User group of the calling user
    #[arg(long, env = "LEDGER_USER_GROUP_ID", default_value_t = 1)]
    group: i32,

    /// Run without an authenticated user
    #[arg(long)]
    anonymous: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Logs the failure once on the stderr subscriber and picks the exit status.
fn report_failure(err: &Error) -> u8 {
    let kind = err.kind();
    tracing::error!(kind = ?kind, "{}", err);
    exit_code(kind)
}

fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::MigrationIncomplete => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::InvalidArgument | ErrorKind::Validation => 4,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let config = Config::from_env();
    init_tracing(&config.log_format);

    let store = MemoryStore::load(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let ctx = Context {
        store: Arc::new(store),
        listing: config.listing.clone(),
        user: (!args.anonymous).then(|| User {
            id: args.user,
            email: format!("user-{}@localhost", args.user),
            user_group_id: args.group,
        }),
    };

    let mutates = args.command.mutates();
    match commands::run(args.command, &ctx).await {
        Ok(value) => {
            if mutates {
                ctx.store
                    .persist(&config.data_path)
                    .with_context(|| format!("saving {}", config.data_path.display()))?;
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(ExitCode::from(report_failure(&err))),
    }
}
