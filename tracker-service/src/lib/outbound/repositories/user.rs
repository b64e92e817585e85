use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateAccountCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::UserError;

const LOGIN_UNIQUE_CONSTRAINT: &str = "users_login_key";
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

const USER_COLUMNS: &str = "id, login, email, password_hash, first_name, last_name, appearance, created_at, updated_at";

/// `UserDirectory` backed by the `users` table.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    login: String,
    email: String,
    password_hash: String,
    first_name: String,
    last_name: String,
    appearance: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            login: row.login,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            appearance: row.appearance.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Translate the store's unique violations into the domain's conflict kinds.
fn map_write_error(e: sqlx::Error, login: &str, email: &str) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some(LOGIN_UNIQUE_CONSTRAINT) => {
                    return UserError::LoginAlreadyExists(login.to_string())
                }
                Some(EMAIL_UNIQUE_CONSTRAINT) => {
                    return UserError::EmailAlreadyExists(email.to_string())
                }
                _ => {}
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let query = format!(
            r#"
            INSERT INTO users (id, login, email, password_hash, first_name, last_name, appearance)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(UserId::new().0)
            .bind(&user.login)
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(user.appearance.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.login, user.email.as_str()))?;

        User::try_from(row)
    }

    async fn update(&self, id: &UserId, command: UpdateAccountCommand) -> Result<User, UserError> {
        let query = format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, appearance = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .bind(&command.first_name)
            .bind(&command.last_name)
            .bind(command.appearance.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
            .and_then(User::try_from)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, UserError> {
        self.find_one("login", login).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.find_one("email", email).await
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::DatabaseError;
    use sqlx::error::ErrorKind;

    use super::*;

    #[derive(Debug)]
    struct ConstraintViolation {
        unique: bool,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl StdError for ConstraintViolation {}

    impl DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::CheckViolation
            }
        }
    }

    fn violation(unique: bool, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintViolation { unique, constraint }))
    }

    #[test]
    fn test_login_constraint_maps_to_login_conflict() {
        let err = map_write_error(
            violation(true, Some("users_login_key")),
            "john.doe",
            "john.doe@local",
        );

        assert!(matches!(err, UserError::LoginAlreadyExists(login) if login == "john.doe"));
    }

    #[test]
    fn test_email_constraint_maps_to_email_conflict() {
        let err = map_write_error(
            violation(true, Some("users_email_key")),
            "john.doe",
            "john.doe@local",
        );

        assert!(matches!(err, UserError::EmailAlreadyExists(email) if email == "john.doe@local"));
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        let unknown_constraint = map_write_error(
            violation(true, Some("users_pkey")),
            "john.doe",
            "john.doe@local",
        );
        assert!(matches!(unknown_constraint, UserError::DatabaseError(_)));

        let check_violation = map_write_error(
            violation(false, Some("users_login_key")),
            "john.doe",
            "john.doe@local",
        );
        assert!(matches!(check_violation, UserError::DatabaseError(_)));

        let pool_closed = map_write_error(sqlx::Error::PoolClosed, "john.doe", "john.doe@local");
        assert!(matches!(pool_closed, UserError::DatabaseError(_)));
    }
}
