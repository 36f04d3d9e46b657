//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use thiserror::Error;

/// Failures when writing to the submit_envs table.
///
/// The database enforces the constraints, this type only gives the two
/// interesting constraint violations a name so that callers can tell them
/// apart from plain connection or query errors.
#[derive(Debug, Error)]
pub enum AssociationError {
    #[error("submit {submit_id} is already associated with envvar {env_id}")]
    UniquenessViolation { submit_id: i32, env_id: i32 },

    #[error("submit {submit_id} or envvar {env_id} does not exist")]
    ReferentialIntegrityViolation { submit_id: i32, env_id: i32 },

    #[error(transparent)]
    Database(#[from] diesel::result::Error),
}

impl AssociationError {
    pub(crate) fn classify(submit_id: i32, env_id: i32, error: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;
        use diesel::result::Error as DieselError;

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                AssociationError::UniquenessViolation { submit_id, env_id }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                AssociationError::ReferentialIntegrityViolation { submit_id, env_id }
            }
            other => AssociationError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use diesel::result::DatabaseErrorKind;
    use diesel::result::Error as DieselError;

    #[test]
    fn test_unique_violation_is_classified() {
        let e = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from(
                "duplicate key value violates unique constraint \"uc_submitid_envid\"",
            )),
        );

        assert!(matches!(
            AssociationError::classify(1, 7, e),
            AssociationError::UniquenessViolation {
                submit_id: 1,
                env_id: 7,
            }
        ));
    }

    #[test]
    fn test_foreign_key_violation_is_classified() {
        let e = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(String::from(
                "insert or update on table \"submit_envs\" violates foreign key constraint",
            )),
        );

        assert!(matches!(
            AssociationError::classify(1, 999, e),
            AssociationError::ReferentialIntegrityViolation {
                submit_id: 1,
                env_id: 999,
            }
        ));
    }

    #[test]
    fn test_other_errors_are_passed_through() {
        assert!(matches!(
            AssociationError::classify(1, 7, DieselError::NotFound),
            AssociationError::Database(DieselError::NotFound)
        ));
    }
}
