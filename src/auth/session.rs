//! Login sessions keyed by an opaque cookie token.

use crate::ports::RepoResult;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

/// Who a session belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct UserIdentity {
    pub user_id: i64,
    pub username: String,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Opens a session and returns its token.
    async fn create(&self, identity: &UserIdentity) -> RepoResult<String>;
    /// Resolves a token to its user, `None` when unknown or expired.
    async fn lookup(&self, token: &str) -> RepoResult<Option<UserIdentity>>;
    async fn destroy(&self, token: &str) -> RepoResult<()>;
}

pub fn new_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

pub struct PgSessionStore {
    pool: PgPool,
    ttl: Duration,
}

impl PgSessionStore {
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, identity: &UserIdentity) -> RepoResult<String> {
        let token = new_token();

        sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "INSERT INTO sessions (token, user_id, username, expires_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(&token)
        .bind(identity.user_id)
        .bind(&identity.username)
        .bind(Utc::now() + self.ttl)
        .execute(&self.pool)
        .await?;

        Ok(token)
    }

    async fn lookup(&self, token: &str) -> RepoResult<Option<UserIdentity>> {
        let identity = sqlx::query_as::<_, UserIdentity>(
            "SELECT user_id, username FROM sessions WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(identity)
    }

    async fn destroy(&self, token: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Process-local sessions. Lost on restart and not shared between instances.
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, (UserIdentity, DateTime<Utc>)>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, identity: &UserIdentity) -> RepoResult<String> {
        let token = new_token();
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        sessions.insert(token.clone(), (identity.clone(), now + self.ttl));
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> RepoResult<Option<UserIdentity>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(token)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(identity, _)| identity.clone()))
    }

    async fn destroy(&self, token: &str) -> RepoResult<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserIdentity {
        UserIdentity {
            user_id: 1,
            username: "alice".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_lookup() {
        let store = InMemorySessionStore::new(Duration::hours(1));
        let token = store.create(&alice()).await.unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(store.lookup(&token).await.unwrap(), Some(alice()));
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let store = InMemorySessionStore::new(Duration::hours(1));
        assert_eq!(store.lookup("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_destroyed_session_is_gone() {
        let store = InMemorySessionStore::new(Duration::hours(1));
        let token = store.create(&alice()).await.unwrap();
        store.destroy(&token).await.unwrap();
        assert_eq!(store.lookup(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_purged() {
        let store = InMemorySessionStore::new(Duration::seconds(-1));
        let stale = store.create(&alice()).await.unwrap();
        assert_eq!(store.lookup(&stale).await.unwrap(), None);

        store.create(&alice()).await.unwrap();
        assert_eq!(store.session_count().await, 1);
    }
}
