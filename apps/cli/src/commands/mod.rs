//! Command-line surface.
//!
//! Each subcommand lives in its own file with a clap `Args` struct and
//! an `execute` style entry point taking the shared [`AppContext`].

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::main_lib::AppContext;

pub mod auth;
pub mod dashboard;
pub mod holdings;
pub mod upload;

#[derive(Parser)]
#[command(name = "finfolio")]
#[command(version)]
#[command(about = "Track stock and mutual fund holdings from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session
    Login(auth::LoginArgs),

    /// Create a new account
    Register(auth::RegisterArgs),

    /// Discard the persisted session
    Logout,

    /// Show the portfolio dashboard
    Dashboard(dashboard::DashboardArgs),

    /// List holdings of one asset class
    Holdings(holdings::HoldingsArgs),

    /// Upload a holdings spreadsheet
    Upload(upload::UploadArgs),

    /// Show the signed-in user
    Whoami,
}

pub async fn run(cli: Cli, context: &AppContext) -> Result<()> {
    match cli.command {
        Commands::Login(args) => auth::login(context, args).await,
        Commands::Register(args) => auth::register(context, args).await,
        Commands::Logout => auth::logout(context),
        Commands::Dashboard(args) => dashboard::execute(context, args).await,
        Commands::Holdings(args) => holdings::execute(context, args).await,
        Commands::Upload(args) => upload::execute(context, args).await,
        Commands::Whoami => auth::whoami(context),
    }
}

pub(crate) fn ensure_session(context: &AppContext) -> Result<()> {
    if context.session.has_session() {
        Ok(())
    } else {
        anyhow::bail!("Not signed in. Run `finfolio login` first.")
    }
}

/// Turns a failed backend call into a friendlier message when the
/// failure invalidated the session out from under the command.
pub(crate) fn backend_failed(context: &AppContext, err: finfolio_core::Error) -> anyhow::Error {
    if context.session.has_session() {
        err.into()
    } else {
        anyhow::anyhow!("Session expired. Run `finfolio login` to sign in again.")
    }
}
