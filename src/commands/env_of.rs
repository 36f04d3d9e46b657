//
// Copyright (c) 2020-2021 science+computing ag and other contributors
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
use colored::Colorize;

use crate::db::models;
use crate::db::DbConnectionConfig;

pub fn env_of(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let submit_uuid = matches
        .get_one::<String>("submit_uuid")
        .map(|s| uuid::Uuid::parse_str(s))
        .transpose()
        .context("Parsing submit UUID")?
        .unwrap(); // safe by clap

    let mut conn = db_connection_config.establish_connection()?;
    let submit = models::Submit::with_uuid(&mut conn, &submit_uuid)?;
    let envs = models::SubmitEnv::envs_of(&mut conn, &submit)?;

    let mut stdout = std::io::stdout();
    if envs.is_empty() {
        writeln!(stdout, "No environment")?;
    } else {
        for env in envs {
            writeln!(stdout, "{} = '{}'", env.name.cyan(), env.value)?;
        }
    }

    Ok(())
}
