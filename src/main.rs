// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> UpdateSettings --> run_update
//!                                                  ShellRunner | DryRunner (--dry)
//! ```

use std::process::ExitCode;

use zen_update::cli::{self, global::GlobalOptions};
use zen_update::cmd::update::run_update;
use zen_update::config::settings::UpdateSettings;
use zen_update::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use zen_update::error::{NetworkError, ZenError, ZenResult};
use zen_update::logging::init_logging;
use zen_update::logging::{LogConfig, LogLevel};
use zen_update::push::runner::{DryRunner, ShellRunner};

use mimalloc::MiMalloc;
use tracing::debug;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let settings = UpdateSettings::from_env(&cli.grid, cli.global.dry);
    debug!(grid_url = %settings.grid_url, filter = ?settings.app_filter, dry = settings.dry, "resolved settings");

    let result = if settings.dry {
        run_update(&settings, &config, &DryRunner).await
    } else {
        run_update(&settings, &config, &ShellRunner).await
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

fn load_config(global: &GlobalOptions) -> ZenResult<Config> {
    let mut loader = Config::builder().add_toml_file_optional(LOCAL_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    for source in loader.sources() {
        debug!(%source, "config source");
    }

    let config = loader.with_env_prefix(ENV_PREFIX).build()?;
    for line in config.format_options() {
        debug!("{line}");
    }
    Ok(config)
}

/// Prints a fatal error and picks the exit code.
///
/// A rejected app listing prints the status and the raw body on their own
/// lines on stdout.
fn report_error(err: &ZenError) -> ExitCode {
    if let ZenError::Network(network) = err
        && let NetworkError::HttpError { status, body, .. } = network.as_ref()
    {
        println!("Could not get list of apps:");
        println!("{status}:");
        println!("{body}");
        return ExitCode::from(1);
    }

    eprintln!("Error: {err}");
    ExitCode::FAILURE
}
