//! PostgreSQL User Repository

use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::{NewUser, ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::error::UserResult;

/// Row shape for the `users` table
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    auth_token: Option<String>,
    image_filename: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_i64(self.id),
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash: self.password,
            auth_token: self.auth_token,
            image_filename: self.image_filename,
        }
    }
}

const SELECT_USER: &str = "SELECT id, email, first_name, last_name, password, auth_token, \
                           image_filename FROM users";

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn insert(&self, new_user: &NewUser) -> UserResult<UserId> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (email, first_name, last_name, password) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserId::from_i64(id))
    }

    async fn find_by_id(&self, user_id: UserId) -> UserResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_token(&self, token: &str) -> UserResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE auth_token = $1"))
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn email_in_use(&self, email: &str) -> UserResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn set_token(&self, user_id: UserId, token: &str) -> UserResult<()> {
        sqlx::query("UPDATE users SET auth_token = $2 WHERE id = $1")
            .bind(user_id.value())
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn clear_token(&self, user_id: UserId) -> UserResult<()> {
        sqlx::query("UPDATE users SET auth_token = NULL WHERE id = $1")
            .bind(user_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_profile(&self, user_id: UserId, changes: &ProfileChanges) -> UserResult<()> {
        sqlx::query(
            "UPDATE users SET \
                 email = COALESCE($2, email), \
                 first_name = COALESCE($3, first_name), \
                 last_name = COALESCE($4, last_name), \
                 password = COALESCE($5, password) \
             WHERE id = $1",
        )
        .bind(user_id.value())
        .bind(changes.email.as_deref())
        .bind(changes.first_name.as_deref())
        .bind(changes.last_name.as_deref())
        .bind(changes.password_hash.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_image_filename(
        &self,
        user_id: UserId,
        filename: Option<&str>,
    ) -> UserResult<()> {
        sqlx::query("UPDATE users SET image_filename = $2 WHERE id = $1")
            .bind(user_id.value())
            .bind(filename)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
