//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use anyhow::Context;
use anyhow::Error;
use anyhow::Result;
use diesel::prelude::*;
use diesel::PgConnection;

use crate::db::models::EnvVar;
use crate::db::models::Submit;
use crate::db::AssociationError;
use crate::schema::submit_envs;
use crate::schema::submit_envs::dsl;

/// One edge of the many-to-many relation between submits and envvars.
///
/// A submit can carry any number of envvars and an envvar can belong to any
/// number of submits, but each pairing exists at most once, which the
/// UC_submitid_envid constraint on the table guarantees.
#[derive(Clone, Debug, Eq, PartialEq, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Submit, foreign_key = submit_id))]
#[diesel(belongs_to(EnvVar, foreign_key = env_id))]
#[diesel(table_name = submit_envs)]
pub struct SubmitEnv {
    pub id: i32,
    pub submit_id: i32,
    pub env_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = submit_envs)]
struct NewSubmitEnv {
    pub submit_id: i32,
    pub env_id: i32,
}

impl SubmitEnv {
    pub fn create(
        database_connection: &mut PgConnection,
        submit: &Submit,
        env: &EnvVar,
    ) -> Result<SubmitEnv, AssociationError> {
        Self::create_pair(database_connection, submit.id, env.id)
    }

    /// Associate a submit with an envvar, by their raw ids.
    ///
    /// The database enforces both the uniqueness of the pair and the
    /// existence of the referenced rows, so there is no pre-checking here.
    /// At most one of two concurrent inserts of the same pair can succeed.
    pub fn create_pair(
        database_connection: &mut PgConnection,
        submit_id: i32,
        env_id: i32,
    ) -> Result<SubmitEnv, AssociationError> {
        let new_submit_env = NewSubmitEnv { submit_id, env_id };

        diesel::insert_into(submit_envs::table)
            .values(&new_submit_env)
            .get_result::<SubmitEnv>(database_connection)
            .map_err(|e| AssociationError::classify(submit_id, env_id, e))
    }

    pub fn envs_of(database_connection: &mut PgConnection, submit: &Submit) -> Result<Vec<EnvVar>> {
        let envs = Self::belonging_to(submit)
            .inner_join(crate::schema::envvars::table)
            .load::<(SubmitEnv, EnvVar)>(database_connection)
            .context("Loading envvars of submit")?;

        Ok(envs.into_iter().map(|(_, env)| env).collect())
    }

    pub fn submits_of(database_connection: &mut PgConnection, env: &EnvVar) -> Result<Vec<Submit>> {
        let submits = Self::belonging_to(env)
            .inner_join(crate::schema::submits::table)
            .load::<(SubmitEnv, Submit)>(database_connection)
            .context("Loading submits of envvar")?;

        Ok(submits.into_iter().map(|(_, submit)| submit).collect())
    }

    pub fn all(database_connection: &mut PgConnection) -> Result<Vec<SubmitEnv>> {
        dsl::submit_envs
            .load::<SubmitEnv>(database_connection)
            .map_err(Error::from)
    }

    /// Remove the association of a submit with an envvar.
    ///
    /// Returns whether an association existed. The pair is free for
    /// re-insertion afterwards.
    pub fn delete_pair(
        database_connection: &mut PgConnection,
        submit: &Submit,
        env: &EnvVar,
    ) -> Result<bool> {
        diesel::delete(
            dsl::submit_envs.filter(dsl::submit_id.eq(submit.id).and(dsl::env_id.eq(env.id))),
        )
        .execute(database_connection)
        .map(|n| n > 0)
        .map_err(Error::from)
    }

    /// Remove an association by its own id.
    pub fn delete_by_id(
        database_connection: &mut PgConnection,
        submit_env_id: i32,
    ) -> Result<bool> {
        diesel::delete(dsl::submit_envs.filter(dsl::id.eq(submit_env_id)))
            .execute(database_connection)
            .map(|n| n > 0)
            .map_err(Error::from)
    }

    /// Remove all associations of a submit, returning how many there were.
    pub fn delete_all_of_submit(
        database_connection: &mut PgConnection,
        submit: &Submit,
    ) -> Result<usize> {
        diesel::delete(dsl::submit_envs.filter(dsl::submit_id.eq(submit.id)))
            .execute(database_connection)
            .map_err(Error::from)
    }
}
