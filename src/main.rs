use clap::Parser;
use faqplus_bot::cli::{self, Cli, Command};
use faqplus_bot::config::AppConfig;
use faqplus_bot::infrastructure::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    match cli.command {
        Command::Serve => cli::serve::run(config).await,
        Command::Ask(args) => cli::ask::run(config, args).await,
    }
}
