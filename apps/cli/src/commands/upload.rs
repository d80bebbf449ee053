use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use finfolio_connect::HoldingsServiceTrait;

use crate::commands::holdings::HoldingKind;
use crate::commands::{backend_failed, ensure_session};
use crate::main_lib::AppContext;

#[derive(Args)]
pub struct UploadArgs {
    /// Which asset class the spreadsheet contains
    #[arg(value_enum)]
    pub kind: HoldingKind,

    /// Path to the .xlsx file
    pub file: PathBuf,

    /// Skip the refetch after a successful upload
    #[arg(long)]
    pub no_refresh: bool,
}

pub async fn execute(context: &AppContext, args: UploadArgs) -> Result<()> {
    ensure_session(context)?;

    println!("Uploading {}...", args.file.display());
    context
        .holdings
        .upload_holdings(args.kind.into(), &args.file)
        .await
        .map_err(|e| backend_failed(context, e))?;
    println!("Upload successful!");

    // The backend replaces the asset class wholesale, so the local
    // snapshot is refetched to match.
    if !args.no_refresh {
        let snapshot = context
            .holdings
            .fetch_holdings()
            .await
            .map_err(|e| backend_failed(context, e))?;
        println!("Refreshed {} holdings.", snapshot.len());
    }
    Ok(())
}
