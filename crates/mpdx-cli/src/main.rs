//! MPDX CSV import CLI.

use clap::{ColorChoice, Parser};
use mpdx_cli::logging::{LogConfig, LogFormat, init_logging};
use mpdx_cli::settings::Settings;
use mpdx_client::ClientError;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_finish, run_headers, run_map_header, run_map_value, run_show, run_upload,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            report(&error);
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Headers => {
            run_headers(&settings);
            Ok(())
        }
        Command::Upload(args) => block_on(run_upload(&settings, args)),
        Command::Show(args) => block_on(run_show(&settings, args)),
        Command::MapHeader(args) => block_on(run_map_header(&settings, args)),
        Command::MapValue(args) => block_on(run_map_value(&settings, args)),
        Command::Finish(args) => block_on(run_finish(&settings, args)),
    }
}

/// API commands run on a current-thread runtime.
fn block_on(command: impl Future<Output = anyhow::Result<()>>) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(command)
}

fn report(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(client_error) = error.downcast_ref::<ClientError>() {
        eprintln!("{}", client_error.user_message());
        if client_error.is_retryable() {
            eprintln!("The request can be retried.");
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
