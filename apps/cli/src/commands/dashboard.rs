use anyhow::Result;
use clap::Args;
use serde_json::json;

use finfolio_connect::HoldingsServiceTrait;
use finfolio_core::constants::TOP_HOLDINGS_COUNT;
use finfolio_core::{summarize, top_holdings};

use crate::commands::{backend_failed, ensure_session};
use crate::main_lib::AppContext;
use crate::render;

#[derive(Args)]
pub struct DashboardArgs {
    /// How many top holdings to show
    #[arg(long, default_value_t = TOP_HOLDINGS_COUNT)]
    pub top: usize,

    /// Emit the dashboard as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(context: &AppContext, args: DashboardArgs) -> Result<()> {
    ensure_session(context)?;

    let snapshot = context
        .holdings
        .fetch_holdings()
        .await
        .map_err(|e| backend_failed(context, e))?;

    let summary = summarize(&snapshot);
    let top = top_holdings(&snapshot, args.top);

    if args.json {
        let document = json!({
            "summary": summary,
            "topHoldings": top,
        });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        render::print_dashboard(&summary, &top);
    }
    Ok(())
}
