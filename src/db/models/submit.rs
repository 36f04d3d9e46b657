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
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::PgConnection;

use crate::schema::submits;
use crate::schema::submits::*;

#[derive(Clone, Debug, Eq, PartialEq, Identifiable, Queryable)]
#[diesel(table_name = submits)]
pub struct Submit {
    pub id: i32,
    pub uuid: ::uuid::Uuid,
    pub submit_time: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = submits)]
struct NewSubmit<'a> {
    pub uuid: &'a ::uuid::Uuid,
    pub submit_time: &'a NaiveDateTime,
}

impl Submit {
    pub fn create(
        database_connection: &mut PgConnection,
        submit_datetime: &NaiveDateTime,
        submit_id: &::uuid::Uuid,
    ) -> Result<Submit> {
        let new_submit = NewSubmit {
            uuid: submit_id,
            submit_time: submit_datetime,
        };

        database_connection.transaction::<_, Error, _>(|conn| {
            diesel::insert_into(submits::table)
                .values(&new_submit)

                // required because the caller may re-use an existing UUID
                .on_conflict_do_nothing()

                .execute(conn)
                .context("Inserting new submit into submits table")?;

            Self::with_uuid(conn, submit_id)
        })
    }

    pub fn with_uuid(
        database_connection: &mut PgConnection,
        submit_id: &::uuid::Uuid,
    ) -> Result<Submit> {
        dsl::submits
            .filter(submits::uuid.eq(submit_id))
            .first::<Submit>(database_connection)
            .context("Loading submit")
            .map_err(Error::from)
    }

    pub fn all(database_connection: &mut PgConnection) -> Result<Vec<Submit>> {
        dsl::submits
            .load::<Submit>(database_connection)
            .map_err(Error::from)
    }
}
