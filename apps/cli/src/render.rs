//! Terminal presentation for summaries and holdings tables.

use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use finfolio_core::constants::{CURRENCY_SYMBOL, DISPLAY_DECIMAL_PRECISION};
use finfolio_core::{EquityHolding, FundHolding, Holding, HoldingType, PortfolioSummary};

pub fn money(value: Decimal) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, value.round_dp(DISPLAY_DECIMAL_PRECISION))
}

fn pnl_cell(value: Decimal) -> String {
    let text = money(value);
    if value < Decimal::ZERO {
        text.bright_red().to_string()
    } else {
        text.bright_green().to_string()
    }
}

fn holding_type_label(holding_type: HoldingType) -> &'static str {
    match holding_type {
        HoldingType::Equity => "Stock",
        HoldingType::Fund => "Mutual Fund",
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn print_dashboard(summary: &PortfolioSummary, top: &[&Holding]) {
    println!("{}", "═".repeat(72).bright_blue());
    println!("{}", "PORTFOLIO DASHBOARD".bright_white().bold());
    println!("{}", "═".repeat(72).bright_blue());
    println!(
        "{}",
        format!("As of {}", Utc::now().format("%Y-%m-%d %H:%M UTC")).bright_black()
    );

    println!("\n{}", "SUMMARY".bright_yellow());
    println!("{}", "─".repeat(40).bright_black());
    println!(
        "Total Portfolio Value: {}",
        money(summary.total_value).bright_green()
    );
    println!("Total P&L: {}", pnl_cell(summary.total_profit_loss));
    println!("Number of Holdings: {}", summary.holding_count);

    println!("\n{}", "Portfolio Allocation".bright_yellow());
    let mut allocation = new_table(vec!["Asset Class", "Value"]);
    allocation.add_row(vec![
        "Stocks".to_string(),
        money(summary.asset_classes.equity),
    ]);
    allocation.add_row(vec![
        "Mutual Funds".to_string(),
        money(summary.asset_classes.fund),
    ]);
    println!("{allocation}");

    println!("\n{}", "Sector Distribution (Stocks)".bright_yellow());
    if summary.sectors.is_empty() {
        println!(
            "{}",
            "No stock sector data available to display.".bright_black().italic()
        );
    } else {
        let mut sectors = new_table(vec!["Sector", "Value", "Share"]);
        for row in &summary.sectors {
            sectors.add_row(vec![
                row.sector.clone(),
                money(row.value),
                format!("{}%", row.percentage),
            ]);
        }
        println!("{sectors}");
    }

    println!("\n{}", "Top Holdings by Value".bright_yellow());
    if top.is_empty() {
        println!("{}", "No holdings yet.".bright_black().italic());
    } else {
        let mut table = new_table(vec!["#", "Name", "Type", "Value", "P&L"]);
        for (rank, holding) in top.iter().enumerate() {
            table.add_row(vec![
                (rank + 1).to_string(),
                holding.display_name().to_string(),
                holding_type_label(holding.holding_type()).to_string(),
                money(holding.current_value()),
                pnl_cell(holding.profit_loss()),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_equity_holdings(holdings: &[&EquityHolding]) {
    println!("\n{}", "STOCK HOLDINGS".bright_yellow());
    if holdings.is_empty() {
        println!("{}", "No stock holdings found.".bright_black().italic());
        return;
    }

    let mut table = new_table(vec![
        "Name",
        "ISIN",
        "Quantity",
        "Avg. Buy Price",
        "Buy Value",
        "Closing Price",
        "Closing Value",
        "P&L",
    ]);
    for holding in holdings {
        table.add_row(vec![
            holding.name.clone(),
            holding.isin.clone(),
            holding.quantity.to_string(),
            money(holding.avg_buy_price),
            money(holding.buy_value),
            money(holding.closing_price),
            money(holding.closing_value),
            pnl_cell(holding.unrealized_pnl),
        ]);
    }
    println!("{table}");
}

pub fn print_fund_holdings(holdings: &[&FundHolding]) {
    println!("\n{}", "MUTUAL FUND HOLDINGS".bright_yellow());
    if holdings.is_empty() {
        println!("{}", "No mutual fund holdings found.".bright_black().italic());
        return;
    }

    let mut table = new_table(vec![
        "Scheme Name",
        "AMC",
        "Category",
        "Sub Category",
        "Folio No",
        "Source",
        "Units",
        "Invested Value",
        "Current Value",
        "Returns",
        "XIRR",
    ]);
    for holding in holdings {
        table.add_row(vec![
            holding.scheme_name.clone(),
            holding.amc.clone(),
            holding.category.clone(),
            holding.sub_category.clone(),
            holding.folio_no.clone(),
            holding.source.clone(),
            holding.units.to_string(),
            money(holding.invested_value),
            money(holding.current_value),
            pnl_cell(holding.returns),
            holding.xirr.clone(),
        ]);
    }
    println!("{table}");
}
