use crate::db::models::Package;
use crate::ports::{PackageRepository, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgPackageRepository {
    pool: PgPool,
}

impl PgPackageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PackageRepository for PgPackageRepository {
    async fn list(&self) -> RepoResult<Vec<Package>> {
        let packages = sqlx::query_as::<_, Package>(
            "SELECT pack_id, package_name, description FROM packages ORDER BY pack_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(packages)
    }

    async fn find(&self, id: i64) -> RepoResult<Option<Package>> {
        let package = sqlx::query_as::<_, Package>(
            "SELECT pack_id, package_name, description FROM packages WHERE pack_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(package)
    }
}
