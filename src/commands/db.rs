//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Error;
use anyhow::Result;
use clap::ArgMatches;
use diesel::ExpressionMethods;
use diesel::QueryDsl;
use diesel::RunQueryDsl;
use diesel_migrations::MigrationHarness;
use itertools::Itertools;
use tracing::info;

use crate::db::models;
use crate::db::DbConnectionConfig;
use crate::schema;

pub fn db(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("cli", matches)) => cli(db_connection_config, matches),
        Some(("setup", _)) => setup(db_connection_config),
        Some(("envvars", matches)) => envvars(db_connection_config, matches),
        Some(("submits", matches)) => submits(db_connection_config, matches),
        Some(("associations", matches)) => associations(db_connection_config, matches),
        Some((other, _)) => Err(anyhow!("Unknown subcommand: {}", other)),
        None => Err(anyhow!("No subcommand")),
    }
}

fn cli(db_connection_config: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    trait PgCliCommand {
        fn run_for_uri(&self, dbcc: DbConnectionConfig) -> Result<()>;
    }

    struct Psql(PathBuf);
    impl PgCliCommand for Psql {
        fn run_for_uri(&self, dbcc: DbConnectionConfig) -> Result<()> {
            Command::new(&self.0)
                .arg(format!("--dbname={}", dbcc.database_name()))
                .arg(format!("--host={}", dbcc.database_host()))
                .arg(format!("--port={}", dbcc.database_port()))
                .arg(format!("--username={}", dbcc.database_user()))
                .stdin(std::process::Stdio::inherit())
                .stdout(std::process::Stdio::inherit())
                .stderr(std::process::Stdio::inherit())
                .output()
                .map_err(Error::from)
                .and_then(|out| {
                    if out.status.success() {
                        info!("psql exited successfully");
                        Ok(())
                    } else {
                        Err(anyhow!("psql did not exit successfully"))
                            .with_context(|| {
                                match String::from_utf8(out.stderr) {
                                    Ok(log) => anyhow!("{}", log),
                                    Err(e) => anyhow!("Cannot parse log into valid UTF-8: {}", e),
                                }
                            })
                            .map_err(Error::from)
                    }
                })
        }
    }

    struct PgCli(PathBuf);
    impl PgCliCommand for PgCli {
        fn run_for_uri(&self, dbcc: DbConnectionConfig) -> Result<()> {
            Command::new(&self.0)
                .arg("--host")
                .arg(dbcc.database_host())
                .arg("--port")
                .arg(dbcc.database_port().to_string())
                .arg("--username")
                .arg(dbcc.database_user())
                .arg(dbcc.database_name())
                .stdin(std::process::Stdio::inherit())
                .stdout(std::process::Stdio::inherit())
                .stderr(std::process::Stdio::inherit())
                .output()
                .map_err(Error::from)
                .and_then(|out| {
                    if out.status.success() {
                        info!("pgcli exited successfully");
                        Ok(())
                    } else {
                        Err(anyhow!("pgcli did not exit successfully"))
                            .with_context(|| {
                                match String::from_utf8(out.stderr) {
                                    Ok(log) => anyhow!("{}", log),
                                    Err(e) => anyhow!("Cannot parse log into valid UTF-8: {}", e),
                                }
                            })
                            .map_err(Error::from)
                    }
                })
        }
    }

    matches
        .get_one::<String>("tool")
        .map(|s| vec![s.as_str()])
        .unwrap_or_else(|| vec!["psql", "pgcli"])
        .into_iter()
        .filter_map(|s| which::which(s).ok().map(|path| (path, s)))
        .map(|(path, s)| match s {
            "psql" => Ok(Box::new(Psql(path)) as Box<dyn PgCliCommand>),
            "pgcli" => Ok(Box::new(PgCli(path)) as Box<dyn PgCliCommand>),
            prog => Err(anyhow!("Unsupported pg CLI program: {}", prog)),
        })
        .next()
        .transpose()?
        .ok_or_else(|| anyhow!("No Program found"))?
        .run_for_uri(db_connection_config)
}

fn setup(conn_cfg: DbConnectionConfig) -> Result<()> {
    let mut conn = conn_cfg.establish_connection()?;
    let applied = conn
        .run_pending_migrations(crate::db::MIGRATIONS)
        .map_err(|e| anyhow!("Running pending database migrations: {}", e))?;

    for migration in applied {
        info!("Applied database migration {}", migration);
    }

    Ok(())
}

fn envvars(conn_cfg: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let csv = matches.get_flag("csv");
    let hdrs = mk_header(vec!["id", "name", "value"]);
    let mut conn = conn_cfg.establish_connection()?;
    let data = models::EnvVar::all(&mut conn)?
        .into_iter()
        .map(|evar| vec![format!("{}", evar.id), evar.name, evar.value])
        .collect::<Vec<_>>();

    if data.is_empty() {
        info!("No environment variables in database");
    } else {
        display_data(hdrs, data, csv)?;
    }

    Ok(())
}

fn submits(conn_cfg: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let csv = matches.get_flag("csv");
    let hdrs = mk_header(vec!["id", "time", "uuid"]);
    let mut conn = conn_cfg.establish_connection()?;

    let submit_to_vec = |submit: models::Submit| {
        vec![
            format!("{}", submit.id),
            submit.submit_time.to_string(),
            submit.uuid.to_string(),
        ]
    };

    let submits = if let Some((env_name, env_value)) = matches
        .get_one::<String>("with_env")
        .map(|s| crate::util::env::parse_to_env(s))
        .transpose()?
    {
        let env = models::EnvVar::fetch(&mut conn, &env_name, &env_value)?
            .ok_or_else(|| anyhow!("No envvar {}='{}' in database", env_name, env_value))?;

        models::SubmitEnv::submits_of(&mut conn, &env)?
    } else {
        models::Submit::all(&mut conn)?
    };

    let data = submits.into_iter().map(submit_to_vec).collect::<Vec<_>>();

    if data.is_empty() {
        info!("No submits in database");
    } else {
        display_data(hdrs, data, csv)?;
    }

    Ok(())
}

fn associations(conn_cfg: DbConnectionConfig, matches: &ArgMatches) -> Result<()> {
    let csv = matches.get_flag("csv");
    let hdrs = mk_header(vec!["id", "submit uuid", "env name", "env value"]);
    let mut conn = conn_cfg.establish_connection()?;

    let mut query = schema::submit_envs::table
        .inner_join(schema::submits::table)
        .inner_join(schema::envvars::table)
        .into_boxed();

    if let Some(submit_uuid) = matches
        .get_one::<String>("submit")
        .map(|s| uuid::Uuid::parse_str(s))
        .transpose()
        .context("Parsing submit UUID")?
    {
        query = query.filter(schema::submits::uuid.eq(submit_uuid));
    }

    if let Some(env_name) = matches.get_one::<String>("env") {
        query = query.filter(schema::envvars::name.eq(env_name));
    }

    let data = query
        .load::<(models::SubmitEnv, models::Submit, models::EnvVar)>(&mut conn)?
        .into_iter()
        .map(|(submit_env, submit, env)| {
            vec![
                format!("{}", submit_env.id),
                submit.uuid.to_string(),
                env.name,
                env.value,
            ]
        })
        .collect::<Vec<_>>();

    if data.is_empty() {
        info!("No associations in database");
    } else {
        display_data(hdrs, data, csv)?;
    }

    Ok(())
}

fn mk_header(vec: Vec<&str>) -> Vec<String> {
    vec.into_iter().map(String::from).collect()
}

/// Display the passed data as nice ascii table,
/// or, if stdout is a pipe, print it nicely parseable
fn display_data<D: Display>(headers: Vec<String>, data: Vec<Vec<D>>, csv: bool) -> Result<()> {
    if csv {
        use csv::WriterBuilder;
        let mut wtr = WriterBuilder::new().from_writer(vec![]);
        for record in data.into_iter() {
            let r: Vec<String> = record.into_iter().map(|e| e.to_string()).collect();

            wtr.write_record(&r)?;
        }

        let out = std::io::stdout();
        let mut lock = out.lock();

        wtr.into_inner()
            .map_err(Error::from)
            .and_then(|t| String::from_utf8(t).map_err(Error::from))
            .and_then(|text| writeln!(lock, "{}", text).map_err(Error::from))
    } else if atty::is(atty::Stream::Stdout) {
        let mut ascii_table = ascii_table::AsciiTable::default();

        ascii_table.set_max_width(
            terminal_size::terminal_size()
                .map(|tpl| tpl.0 .0 as usize)
                .unwrap_or(80),
        );

        for (i, header) in headers.into_iter().enumerate() {
            ascii_table
                .column(i)
                .set_header(header)
                .set_align(ascii_table::Align::Left);
        }

        ascii_table.print(data);
        Ok(())
    } else {
        let out = std::io::stdout();
        let mut lock = out.lock();
        for list in data {
            writeln!(lock, "{}", list.iter().map(|d| d.to_string()).join(" "))?;
        }
        Ok(())
    }
}
