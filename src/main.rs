//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use tracing::debug;

mod cli;
mod commands;
mod config;
mod db;
mod schema;
mod util;

use crate::config::Configuration;
use crate::config::NotValidatedConfiguration;
use crate::db::DbConnectionConfig;

fn main() -> Result<()> {
    setup_logging()?;
    debug!("Debugging enabled");

    let cli = cli::cli();
    let cli = cli.get_matches();

    // completions do not need a configuration
    if let Some(("completions", matches)) = cli.subcommand() {
        return commands::completions(matches);
    }

    let mut config = ::config::Config::default();
    config
        .merge(::config::File::with_name("config"))
        .context("Loading configuration failed")?
        .merge(::config::Environment::with_prefix("ENVLINK"))
        .context("Loading configuration from environment failed")?;

    let config: Configuration = config
        .try_into::<NotValidatedConfiguration>()
        .context("Deserializing configuration failed")?
        .validate()
        .context("Validating configuration failed")?;

    match cli.subcommand() {
        Some(("db", matches)) => commands::db(DbConnectionConfig::parse(&config, matches)?, matches),
        Some(("register", matches)) => {
            commands::register(DbConnectionConfig::parse(&config, matches)?, matches)
        }
        Some(("associate", matches)) => {
            commands::associate(DbConnectionConfig::parse(&config, matches)?, matches)
        }
        Some(("dissociate", matches)) => {
            commands::dissociate(DbConnectionConfig::parse(&config, matches)?, matches)
        }
        Some(("env-of", matches)) => {
            commands::env_of(DbConnectionConfig::parse(&config, matches)?, matches)
        }
        Some((other, _)) => Err(anyhow!("Unknown subcommand: {}", other)),
        None => Err(anyhow!("No subcommand")),
    }
}

fn setup_logging() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
