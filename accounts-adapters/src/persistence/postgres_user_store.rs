use accounts_core::{
    Email, NewUser, Password, PersonName, ProfileChanges, User, UserStore, UserStoreError,
};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, is_active, is_staff, is_superuser, \
     date_joined, last_login";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    date_joined: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // Stored values were validated on the way in; a failure here means
        // the row was edited outside the service.
        let email = Email::parse(&row.email)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let first_name = PersonName::parse(&row.first_name)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let last_name = PersonName::parse(&row.last_name)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(User {
            id: row.id,
            email,
            username: row.username,
            first_name,
            last_name,
            is_active: row.is_active,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            date_joined: row.date_joined,
            last_login: row.last_login,
        })
    }
}

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: sqlx::PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }

    async fn fetch_password_hash(&self, id: Uuid) -> Result<String, UserStoreError> {
        let hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        hash.ok_or(UserStoreError::UserNotFound)
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password.clone())
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let query = format!(
            "INSERT INTO users (id, email, username, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(Uuid::new_v4())
            .bind(new_user.email.as_str())
            .bind(&new_user.username)
            .bind(new_user.first_name.as_str())
            .bind(new_user.last_name.as_str())
            .bind(password_hash.expose_secret())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.constraint().is_some() {
                        return UserStoreError::UserAlreadyExists;
                    }
                }
                UserStoreError::UnexpectedError(e.to_string())
            })?;

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }

    #[tracing::instrument(name = "Checking email uniqueness in PostgreSQL", skip_all)]
    async fn email_taken(
        &self,
        email: &Email,
        excluding: Option<Uuid>,
    ) -> Result<bool, UserStoreError> {
        sqlx::query_scalar(
            "SELECT EXISTS( \
                 SELECT 1 FROM users \
                 WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2) \
             )",
        )
        .bind(email.as_str())
        .bind(excluding)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Secret<String>,
    ) -> Result<User, UserStoreError> {
        let row: Option<(Uuid, String)> =
            sqlx::query_as("SELECT id, password_hash FROM users WHERE email = $1")
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some((id, password_hash)) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        self.get_user(id).await
    }

    #[tracing::instrument(name = "Verifying password in PostgreSQL", skip_all)]
    async fn verify_password(
        &self,
        id: Uuid,
        password: &Secret<String>,
    ) -> Result<(), UserStoreError> {
        let password_hash = self.fetch_password_hash(id).await?;

        verify_password_hash(Secret::from(password_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)
    }

    #[tracing::instrument(name = "Updating profile in PostgreSQL", skip_all)]
    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
    ) -> Result<User, UserStoreError> {
        let query = format!(
            "UPDATE users \
             SET email = COALESCE($2, email), \
                 first_name = COALESCE($3, first_name), \
                 last_name = COALESCE($4, last_name) \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(changes.email.as_ref().map(Email::as_str))
            .bind(changes.first_name.as_ref().map(PersonName::as_str))
            .bind(changes.last_name.as_ref().map(PersonName::as_str))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.constraint().is_some() {
                        return UserStoreError::UserAlreadyExists;
                    }
                }
                UserStoreError::UnexpectedError(e.to_string())
            })?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };

        row.try_into()
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(
        &self,
        id: Uuid,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(new_password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash.expose_secret())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Recording login in PostgreSQL", skip_all)]
    async fn record_login(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET last_login = now() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Bulk updating active flag in PostgreSQL", skip_all)]
    async fn set_active(&self, ids: &[Uuid], active: bool) -> Result<u64, UserStoreError> {
        let result = sqlx::query("UPDATE users SET is_active = $2 WHERE id = ANY($1)")
            .bind(ids.to_vec())
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(name = "Bulk updating staff flag in PostgreSQL", skip_all)]
    async fn set_staff(&self, ids: &[Uuid], staff: bool) -> Result<u64, UserStoreError> {
        // Superusers keep staff status: bulk revocation skips them.
        let query = if staff {
            "UPDATE users SET is_staff = TRUE WHERE id = ANY($1)"
        } else {
            "UPDATE users SET is_staff = FALSE WHERE id = ANY($1) AND NOT is_superuser"
        };

        let result = sqlx::query(query)
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<(), String> {
    let current_span: tracing::Span = tracing::Span::current();
    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())
                    .map_err(|e| e.to_string())?;

            Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            )
            .verify_password(
                password_candidate.expose_secret().as_bytes(),
                &expected_password_hash,
            )
            .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
