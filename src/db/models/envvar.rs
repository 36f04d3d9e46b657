//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use anyhow::Error;
use anyhow::Result;
use diesel::prelude::*;
use diesel::PgConnection;

use crate::schema::envvars;
use crate::schema::envvars::*;
use crate::util::EnvironmentVariableName;

#[derive(Clone, Debug, Eq, PartialEq, Identifiable, Queryable)]
#[diesel(table_name = envvars)]
pub struct EnvVar {
    pub id: i32,
    pub name: String,
    pub value: String,
}

#[derive(Insertable)]
#[diesel(table_name = envvars)]
struct NewEnvVar<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl EnvVar {
    /// Insert the (name, value) pair if it is not yet in the database and
    /// return the row either way.
    pub fn create_or_fetch(
        database_connection: &mut PgConnection,
        k: &EnvironmentVariableName,
        v: &str,
    ) -> Result<EnvVar> {
        let new_envvar = NewEnvVar {
            name: k.as_ref(),
            value: v,
        };

        diesel::insert_into(envvars::table)
            .values(&new_envvar)
            .on_conflict_do_nothing()
            .execute(database_connection)?;

        dsl::envvars
            .filter(name.eq(k.as_ref()).and(value.eq(v)))
            .first::<EnvVar>(database_connection)
            .map_err(Error::from)
    }

    pub fn fetch(
        database_connection: &mut PgConnection,
        k: &EnvironmentVariableName,
        v: &str,
    ) -> Result<Option<EnvVar>> {
        dsl::envvars
            .filter(name.eq(k.as_ref()).and(value.eq(v)))
            .first::<EnvVar>(database_connection)
            .optional()
            .map_err(Error::from)
    }

    pub fn all(database_connection: &mut PgConnection) -> Result<Vec<EnvVar>> {
        dsl::envvars
            .load::<EnvVar>(database_connection)
            .map_err(Error::from)
    }
}
