use anyhow::{Context, Result};
use clap::Parser;

use dailyqr::cli::Cli;
use dailyqr::config::{get_config, init_config_from};
use dailyqr::interfaces::cli::run_cli_command;
use dailyqr::runtime::modes::{Mode, detect_mode, run_server};
use dailyqr::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(cli.config.as_deref()).context("Failed to load configuration")?;
    let config = get_config();

    match detect_mode(cli.command.as_ref()) {
        Mode::Server => {
            let _guard = init_logging(&config)?;
            run_server(config).await
        }
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = run_cli_command(command).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
