//! CLI argument parsing for the demo app lifecycle.
//!
//! The CLI only selects an operation; every setting that ends up inside an app
//! definition comes from the environment so the same shell session drives
//! both `create` and `destroy`.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "marathon-demo",
    version,
    about = "Create and destroy the microscaling demo apps on Marathon",
    after_help = "Environment:\n  MSS_MARATHON_API            Marathon base URL (required)\n  MSS_USER_ID                 Microscaling user id (required)\n  MSS_API_ADDRESS             Microscaling API address (default app.microscaling.com)\n  AZURE_STORAGE_ACCOUNT_NAME  Storage account name (required)\n  AZURE_STORAGE_ACCOUNT_KEY   Storage account key (required)\n  AZURE_STORAGE_QUEUE_NAME    Storage queue name (required)\n\nExamples:\n  marathon-demo create\n  marathon-demo status --json\n  marathon-demo destroy",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Directory holding <app>.json templates (defaults to the embedded set)
    #[arg(long, value_name = "DIR", global = true)]
    pub templates_dir: Option<PathBuf>,

    /// Emit a machine-readable JSON report on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create every demo app that is not already deployed
    Create,
    /// Delete every demo app that is currently deployed
    Destroy,
    /// Report which demo apps are deployed
    Status,
    /// Print the current Marathon leader
    Leader,
}
