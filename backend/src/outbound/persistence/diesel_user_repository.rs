//! PostgreSQL-backed `UserRepository`.
//!
//! Username uniqueness is enforced by the `users.username` unique index; a
//! violation surfaces as `UserPersistenceError::DuplicateUsername`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn map_insert_error(error: diesel::result::Error, username: &Username) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate_username(username.as_ref());
    }
    map_diesel_error(error)
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username).map_err(|err| {
        warn!(user_id = %row.id, error = %err, "stored username failed validation");
        UserPersistenceError::query("stored username is invalid")
    })?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        PasswordHash::new(row.password_hash),
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            password_hash: user.password_hash().as_ref(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, user.username()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn username(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    #[rstest]
    fn unique_violation_on_insert_is_a_duplicate() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(String::from("duplicate key value violates unique constraint")),
        );

        let mapped = map_insert_error(error, &username("ada"));

        assert_eq!(mapped, UserPersistenceError::duplicate_username("ada"));
    }

    #[rstest]
    fn other_insert_failures_are_query_errors() {
        let mapped = map_insert_error(DieselError::RollbackTransaction, &username("ada"));
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_failure_is_a_connection_error() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, UserPersistenceError::Connection { .. }));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn rows_convert_to_users() {
        let id = Uuid::new_v4();
        let user = row_to_user(UserRow {
            id,
            username: "ada".into(),
            password_hash: "$2b$04$hash".into(),
        })
        .expect("valid row");

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_ref(), "ada");
        assert_eq!(user.password_hash().as_ref(), "$2b$04$hash");
    }

    #[rstest]
    fn corrupt_usernames_are_query_errors() {
        let result = row_to_user(UserRow {
            id: Uuid::new_v4(),
            username: "bad name!".into(),
            password_hash: "$2b$04$hash".into(),
        });

        assert!(matches!(result, Err(UserPersistenceError::Query { .. })));
    }
}
