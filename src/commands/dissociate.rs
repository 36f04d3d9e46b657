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
use clap::ArgMatches;
use tracing::info;

use crate::db::models;
use crate::db::DbConnectionConfig;

/// Remove associations between a submit and its envvars.
///
/// Removes the named pairs, or every association of the submit if no pairs
/// are given. `--association <id>` removes a single association by its id
/// instead.
pub fn dissociate(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let mut conn = db_connection_config.establish_connection()?;

    if let Some(submit_env_id) = matches
        .get_one::<String>("association")
        .map(|s| s.parse::<i32>().with_context(|| format!("Parsing association id: {}", s)))
        .transpose()?
    {
        if !models::SubmitEnv::delete_by_id(&mut conn, submit_env_id)? {
            return Err(anyhow!("No association with id {}", submit_env_id));
        }

        info!("Removed association {}", submit_env_id);
        return Ok(());
    }

    let submit_uuid = matches
        .get_one::<String>("submit_uuid")
        .map(|s| uuid::Uuid::parse_str(s))
        .transpose()
        .context("Parsing submit UUID")?
        .unwrap(); // safe by clap

    let submit = models::Submit::with_uuid(&mut conn, &submit_uuid)?;

    let env_pairs = matches
        .get_many::<String>("env")
        .map(|values| {
            values
                .map(|s| crate::util::env::parse_to_env(s))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    match env_pairs {
        Some(env_pairs) => {
            for (name, value) in env_pairs {
                let env = models::EnvVar::fetch(&mut conn, &name, &value)?
                    .ok_or_else(|| anyhow!("No envvar {}='{}' in database", name, value))?;

                if !models::SubmitEnv::delete_pair(&mut conn, &submit, &env)? {
                    return Err(anyhow!(
                        "Submit {} is not associated with {}='{}'",
                        submit.uuid,
                        name,
                        value
                    ));
                }

                info!("Removed association of {}='{}' from submit {}", name, value, submit.uuid);
            }
        }
        None => {
            let n = models::SubmitEnv::delete_all_of_submit(&mut conn, &submit)?;
            info!("Removed {} associations from submit {}", n, submit.uuid);
        }
    }

    Ok(())
}
