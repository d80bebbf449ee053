mod commands;
mod config;
mod credentials;
mod main_lib;
mod render;

use clap::Parser;
use config::Config;
use main_lib::{build_context, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing();

    let cli = commands::Cli::parse();
    let context = build_context(&config)?;
    commands::run(cli, &context).await
}
