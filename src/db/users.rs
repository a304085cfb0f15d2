use crate::db::models::User;
use crate::ports::{RepoResult, RepositoryError, UserRepository};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, username: &str, password_hash: &str) -> RepoResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) \
             RETURNING user_id, username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, format!("Username {} already exists", username)))
    }
}
