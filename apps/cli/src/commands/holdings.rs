use anyhow::Result;
use clap::{Args, ValueEnum};

use finfolio_connect::HoldingsServiceTrait;
use finfolio_core::{EquityHolding, FundHolding, Holding, HoldingType};

use crate::commands::{backend_failed, ensure_session};
use crate::main_lib::AppContext;
use crate::render;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HoldingKind {
    /// Stock holdings
    Stocks,
    /// Mutual fund holdings
    Funds,
}

impl From<HoldingKind> for HoldingType {
    fn from(kind: HoldingKind) -> Self {
        match kind {
            HoldingKind::Stocks => HoldingType::Equity,
            HoldingKind::Funds => HoldingType::Fund,
        }
    }
}

#[derive(Args)]
pub struct HoldingsArgs {
    /// Which asset class to list
    #[arg(value_enum)]
    pub kind: HoldingKind,

    /// Emit holdings as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(context: &AppContext, args: HoldingsArgs) -> Result<()> {
    ensure_session(context)?;

    let snapshot = context
        .holdings
        .fetch_holdings()
        .await
        .map_err(|e| backend_failed(context, e))?;

    if args.json {
        let selected: Vec<&Holding> = snapshot.of_type(args.kind.into()).collect();
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    match HoldingType::from(args.kind) {
        HoldingType::Equity => {
            let rows: Vec<&EquityHolding> = snapshot
                .iter()
                .filter_map(|holding| match holding {
                    Holding::Equity(equity) => Some(equity),
                    _ => None,
                })
                .collect();
            render::print_equity_holdings(&rows);
        }
        HoldingType::Fund => {
            let rows: Vec<&FundHolding> = snapshot
                .iter()
                .filter_map(|holding| match holding {
                    Holding::Fund(fund) => Some(fund),
                    _ => None,
                })
                .collect();
            render::print_fund_holdings(&rows);
        }
    }
    Ok(())
}
