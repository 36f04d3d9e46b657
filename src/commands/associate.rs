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

/// Associate one or more envvars with a submit.
///
/// Envvars that are not yet in the database are created on the fly, the
/// submit has to exist. Prints the id of each new association to stdout.
pub fn associate(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let submit_uuid = matches
        .get_one::<String>("submit_uuid")
        .map(|s| uuid::Uuid::parse_str(s))
        .transpose()
        .context("Parsing submit UUID")?
        .unwrap(); // safe by clap

    let env_pairs = matches
        .get_many::<String>("env")
        .unwrap() // safe by clap
        .map(|s| crate::util::env::parse_to_env(s))
        .collect::<Result<Vec<_>>>()?;

    let mut conn = db_connection_config.establish_connection()?;
    let submit = models::Submit::with_uuid(&mut conn, &submit_uuid)?;

    let mut stdout = std::io::stdout();
    for (name, value) in env_pairs {
        let env = models::EnvVar::create_or_fetch(&mut conn, &name, &value)?;
        debug!("Envvar {} = '{}' has id {}", name, value, env.id);

        let submit_env = models::SubmitEnv::create(&mut conn, &submit, &env)
            .with_context(|| format!("Associating {}='{}' with submit {}", name, value, submit.uuid))?;

        writeln!(stdout, "{}", submit_env.id)?;
    }

    Ok(())
}
