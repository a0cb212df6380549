mod cli;
mod commands;
mod context;

use clap::Parser;

use varejo_gateway::ApiConfig;

use crate::cli::Cli;
use crate::context::{AppContext, default_session_path, resolve_config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();
    varejo_observability::init();

    let cli = Cli::parse();
    let config = resolve_config(cli.api_url.as_deref(), ApiConfig::from_env());
    let session_file = cli.session_file.unwrap_or_else(default_session_path);

    let ctx = AppContext::build(config, &session_file)?;
    commands::run(&ctx, cli.command).await
}
