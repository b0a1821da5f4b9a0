use anyhow::Context;
use clap::Parser;
use mta_tool::app::commands::{CommandRunner, Outcome};
use mta_tool::config::Cli;
use mta_tool::utils::logger;
use mta_tool::utils::validation::Validate;
use mta_tool::ToolConfig;
use std::process::ExitCode;

fn load_config(cli: &Cli) -> anyhow::Result<ToolConfig> {
    let config = match &cli.config {
        Some(path) => ToolConfig::from_file(path)
            .with_context(|| format!("failed to load config file '{}'", path.display()))?,
        None => ToolConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let log_format = cli.log_format.unwrap_or_else(|| config.log_format());
    logger::init_logger(cli.verbose, &config.logging.level, log_format);

    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("{}", e);
        eprintln!("❌ {}", e);
        return ExitCode::FAILURE;
    }

    let runner = CommandRunner::new(config);
    let mut stdout = std::io::stdout().lock();

    match runner.run(&cli.command, &mut stdout) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::IssuesFound(count)) => {
            tracing::warn!("{} validation issue(s) found", count);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(category = ?e.category(), "{}", e);
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
