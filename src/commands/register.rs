//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use std::io::Write;

use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use tracing::debug;

use crate::db::models;
use crate::db::DbConnectionConfig;

/// Register a new submit and print its UUID to stdout.
pub fn register(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let submit_uuid = matches
        .get_one::<String>("uuid")
        .map(|s| uuid::Uuid::parse_str(s))
        .transpose()
        .context("Parsing submit UUID")?
        .unwrap_or_else(uuid::Uuid::new_v4);

    let now = chrono::Utc::now().naive_utc();

    let mut conn = db_connection_config.establish_connection()?;
    let submit = models::Submit::create(&mut conn, &now, &submit_uuid)?;
    debug!("Submit {} has id {}", submit.uuid, submit.id);

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", submit.uuid)?;

    Ok(())
}
