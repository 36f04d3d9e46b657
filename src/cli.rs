//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use clap::crate_authors;
use clap::Arg;
use clap::ArgAction;
use clap::Command;

pub fn cli() -> Command<'static> {
    Command::new("envlink")
        .author(crate_authors!())
        .version(clap::crate_version!())
        .long_version(concat!(
            env!("CARGO_PKG_VERSION"),
            " (built ",
            env!("VERGEN_BUILD_TIMESTAMP"),
            ", debug = ",
            env!("VERGEN_CARGO_DEBUG"),
            ")"
        ))
        .about("Tracks which environment variables belong to which submits, utilizing postgres")
        .subcommand_required(true)
        .arg_required_else_help(true)

        .arg(Arg::new("database_host")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-host")
            .value_name("HOST")
            .help("Override the database host from the configuration")
        )
        .arg(Arg::new("database_port")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-port")
            .value_name("PORT")
            .help("Override the database port from the configuration")
        )
        .arg(Arg::new("database_user")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-user")
            .value_name("USER")
            .help("Override the database user from the configuration")
        )
        .arg(Arg::new("database_password")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-password")
            .value_name("PASSWORD")
            .help("Override the database password from the configuration")
        )
        .arg(Arg::new("database_name")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-name")
            .value_name("NAME")
            .help("Override the database name from the configuration")
        )
        .arg(Arg::new("database_connection_timeout")
            .required(false)
            .global(true)
            .takes_value(true)
            .long("database-connection-timeout")
            .value_name("TIMEOUT")
            .help("Override the database connection timeout from the configuration")
        )

        .subcommand(Command::new("db")
            .about("Database interface")
            .subcommand_required(true)

            .subcommand(Command::new("cli")
                .about("Start a database CLI, if installed on the current host")
                .long_about(indoc::indoc!(r#"
                    Starts a database shell on the configured database using one of the following
                    programs:
                        - psql
                        - pgcli

                    if installed.
                "#))

                .arg(Arg::new("tool")
                    .required(false)
                    .takes_value(true)
                    .long("tool")
                    .value_name("TOOL")
                    .value_parser(["psql", "pgcli"])
                    .help("Use a specific tool")
                )
            )

            .subcommand(Command::new("setup")
                .about("Set up the database schema, applying all pending migrations")
            )

            .subcommand(Command::new("envvars")
                .about("List envvars from the DB")
                .arg(Arg::new("csv")
                    .required(false)
                    .long("csv")
                    .action(ArgAction::SetTrue)
                    .help("Format output as CSV")
                )
            )

            .subcommand(Command::new("submits")
                .about("List submits from the DB")
                .arg(Arg::new("csv")
                    .required(false)
                    .long("csv")
                    .action(ArgAction::SetTrue)
                    .help("Format output as CSV")
                )
                .arg(Arg::new("with_env")
                    .required(false)
                    .takes_value(true)
                    .long("with-env")
                    .value_name("KV")
                    .help("Only list submits that are associated with this envvar (KEY=VALUE)")
                )
            )

            .subcommand(Command::new("associations")
                .about("List associations between submits and envvars from the DB")
                .arg(Arg::new("csv")
                    .required(false)
                    .long("csv")
                    .action(ArgAction::SetTrue)
                    .help("Format output as CSV")
                )
                .arg(Arg::new("submit")
                    .required(false)
                    .takes_value(true)
                    .long("submit")
                    .value_name("UUID")
                    .help("Only list associations of this submit")
                )
                .arg(Arg::new("env")
                    .required(false)
                    .takes_value(true)
                    .long("env")
                    .value_name("NAME")
                    .help("Only list associations of envvars with this name")
                )
            )
        )

        .subcommand(Command::new("register")
            .about("Register a new submit in the database")
            .arg(Arg::new("uuid")
                .required(false)
                .takes_value(true)
                .long("uuid")
                .value_name("UUID")
                .help("Use this UUID for the submit instead of generating one")
            )
        )

        .subcommand(Command::new("associate")
            .about("Associate one or more environment variables with a submit")
            .arg(Arg::new("submit_uuid")
                .required(true)
                .index(1)
                .value_name("SUBMIT")
                .help("The UUID of the submit")
            )
            .arg(Arg::new("env")
                .required(true)
                .multiple_values(true)
                .index(2)
                .value_name("KV")
                .help("Environment variables as KEY=VALUE")
            )
        )

        .subcommand(Command::new("dissociate")
            .about("Remove associations between a submit and its environment variables")
            .arg(Arg::new("submit_uuid")
                .required_unless_present("association")
                .index(1)
                .value_name("SUBMIT")
                .help("The UUID of the submit")
            )
            .arg(Arg::new("env")
                .required(false)
                .multiple_values(true)
                .index(2)
                .value_name("KV")
                .help("Environment variables as KEY=VALUE, all associations of the submit if omitted")
            )
            .arg(Arg::new("association")
                .required(false)
                .takes_value(true)
                .long("association")
                .value_name("ID")
                .conflicts_with_all(&["submit_uuid", "env"])
                .help("Remove a single association by its id")
            )
        )

        .subcommand(Command::new("env-of")
            .about("Show the environment variables associated with a submit")
            .arg(Arg::new("submit_uuid")
                .required(true)
                .index(1)
                .value_name("SUBMIT")
                .help("The UUID of the submit")
            )
        )

        .subcommand(Command::new("completions")
            .about("Generate and print commandline completions")
            .arg(Arg::new("shell")
                .required(true)
                .index(1)
                .value_parser(clap::value_parser!(clap_complete::Shell))
                .help("The shell to generate completions for")
            )
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_associate() {
        let m = cli()
            .try_get_matches_from([
                "envlink",
                "associate",
                "59ea8b18-937f-4a48-8e5b-7e28f8352a34",
                "FOO=bar",
                "BAR=baz",
            ])
            .unwrap();

        let (name, m) = m.subcommand().unwrap();
        assert_eq!(name, "associate");
        assert_eq!(
            m.get_one::<String>("submit_uuid").map(|s| s.as_str()),
            Some("59ea8b18-937f-4a48-8e5b-7e28f8352a34")
        );
        assert_eq!(m.get_many::<String>("env").unwrap().count(), 2);
    }

    #[test]
    fn test_parse_global_database_override() {
        let m = cli()
            .try_get_matches_from(["envlink", "--database-host", "db.example.com", "db", "envvars"])
            .unwrap();

        let (name, m) = m.subcommand().unwrap();
        assert_eq!(name, "db");
        assert_eq!(
            m.get_one::<String>("database_host").map(|s| s.as_str()),
            Some("db.example.com")
        );
    }

    #[test]
    fn test_associate_requires_env() {
        assert!(cli()
            .try_get_matches_from(["envlink", "associate", "59ea8b18-937f-4a48-8e5b-7e28f8352a34"])
            .is_err());
    }

    #[test]
    fn test_dissociate_requires_target() {
        assert!(cli().try_get_matches_from(["envlink", "dissociate"]).is_err());
    }

    #[test]
    fn test_dissociate_by_association_id() {
        let m = cli()
            .try_get_matches_from(["envlink", "dissociate", "--association", "42"])
            .unwrap();

        let (_, m) = m.subcommand().unwrap();
        assert_eq!(
            m.get_one::<String>("association").map(|s| s.as_str()),
            Some("42")
        );
    }
}
