use crate::auth::SessionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use utoipa::ToSchema;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub dependencies: HashMap<String, DependencyStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DependencyStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DependencyStatus {
    fn healthy(start: Instant) -> Self {
        Self {
            status: "healthy".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
            error: None,
        }
    }

    fn unhealthy(error: impl ToString) -> Self {
        Self {
            status: "unhealthy".to_string(),
            latency_ms: None,
            error: Some(error.to_string()),
        }
    }
}

#[async_trait]
pub trait DependencyChecker: Send + Sync {
    async fn check(&self) -> DependencyStatus;
    fn name(&self) -> &'static str;
}

pub struct PostgresChecker {
    pool: sqlx::PgPool,
}

impl PostgresChecker {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyChecker for PostgresChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => DependencyStatus::healthy(start),
            Err(e) => DependencyStatus::unhealthy(e),
        }
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// Probes the session backend with a token that cannot exist.
pub struct SessionStoreChecker {
    store: Arc<dyn SessionStore>,
}

impl SessionStoreChecker {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DependencyChecker for SessionStoreChecker {
    async fn check(&self) -> DependencyStatus {
        let start = Instant::now();
        match self.store.lookup("health-probe").await {
            Ok(_) => DependencyStatus::healthy(start),
            Err(e) => DependencyStatus::unhealthy(e),
        }
    }

    fn name(&self) -> &'static str {
        "sessions"
    }
}

pub struct HealthChecker {
    checkers: Vec<Box<dyn DependencyChecker>>,
    start_time: Instant,
}

impl HealthChecker {
    pub fn new(start_time: Instant) -> Self {
        Self {
            checkers: Vec::new(),
            start_time,
        }
    }

    pub fn add_checker(mut self, checker: Box<dyn DependencyChecker>) -> Self {
        self.checkers.push(checker);
        self
    }

    pub async fn check_all(&self) -> HealthResponse {
        let futures = self.checkers.iter().map(|checker| async move {
            let status = match timeout(CHECK_TIMEOUT, checker.check()).await {
                Ok(status) => status,
                Err(_) => DependencyStatus::unhealthy("timeout"),
            };
            (checker.name().to_string(), status)
        });

        let results = futures::future::join_all(futures).await;
        let total_count = results.len();
        let healthy_count = results
            .iter()
            .filter(|(_, status)| status.status == "healthy")
            .count();

        let overall_status = if healthy_count == total_count {
            "healthy"
        } else if healthy_count > 0 {
            "degraded"
        } else {
            "unhealthy"
        };

        HealthResponse {
            status: overall_status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            dependencies: results.into_iter().collect(),
        }
    }
}
