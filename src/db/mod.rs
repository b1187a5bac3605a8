use crate::models::model_record::ModelRecord;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::history::PromptHistoryEntry;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn model_repo(&self) -> repositories::model::ModelRepository {
        repositories::model::ModelRepository::new(self.conn.clone())
    }

    fn history_repo(&self) -> repositories::history::PromptHistoryRepository {
        repositories::history::PromptHistoryRepository::new(self.conn.clone())
    }

    pub async fn add_model(&self, record: &ModelRecord) -> Result<()> {
        self.model_repo().add(record).await
    }

    pub async fn get_model(&self, id: i64) -> Result<Option<ModelRecord>> {
        self.model_repo().get(id).await
    }

    pub async fn list_models(&self) -> Result<Vec<ModelRecord>> {
        self.model_repo().list().await
    }

    pub async fn remove_model(&self, id: i64) -> Result<bool> {
        self.model_repo().remove(id).await
    }

    pub async fn toggle_favorite(&self, id: i64) -> Result<Option<bool>> {
        self.model_repo().toggle_favorite(id).await
    }

    pub async fn update_model(&self, record: &ModelRecord) -> Result<()> {
        self.model_repo().update(record).await
    }

    pub async fn push_prompt(&self, prompt: &str, created_at: &str, limit: u64) -> Result<()> {
        self.history_repo().push(prompt, created_at, limit).await
    }

    pub async fn recent_prompts(&self, limit: u64) -> Result<Vec<PromptHistoryEntry>> {
        self.history_repo().recent(limit).await
    }

    pub async fn forget_prompt(&self, id: i64) -> Result<bool> {
        self.history_repo().forget(id).await
    }
}
