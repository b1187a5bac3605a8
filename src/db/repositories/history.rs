use crate::entities::{prelude::*, prompt_history};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::info;

/// A saved prompt, newest first in listings.
#[derive(Debug, Clone)]
pub struct PromptHistoryEntry {
    pub id: i64,
    pub prompt: String,
    pub created_at: String,
}

pub struct PromptHistoryRepository {
    conn: DatabaseConnection,
}

impl PromptHistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Saves a prompt and trims the history down to `limit` entries,
    /// dropping the oldest ones.
    pub async fn push(&self, prompt: &str, created_at: &str, limit: u64) -> anyhow::Result<()> {
        let active = prompt_history::ActiveModel {
            prompt: Set(prompt.to_string()),
            created_at: Set(created_at.to_string()),
            ..Default::default()
        };
        PromptHistory::insert(active).exec(&self.conn).await?;

        let stale: Vec<i64> = PromptHistory::find()
            .order_by_desc(prompt_history::Column::Id)
            .offset(limit)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(|row| row.id)
            .collect();

        if !stale.is_empty() {
            let count = stale.len();
            PromptHistory::delete_many()
                .filter(prompt_history::Column::Id.is_in(stale))
                .exec(&self.conn)
                .await?;
            info!("Trimmed {} old prompt history entries", count);
        }

        Ok(())
    }

    pub async fn recent(&self, limit: u64) -> anyhow::Result<Vec<PromptHistoryEntry>> {
        let rows = PromptHistory::find()
            .order_by_desc(prompt_history::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| PromptHistoryEntry {
                id: row.id,
                prompt: row.prompt,
                created_at: row.created_at,
            })
            .collect())
    }

    pub async fn forget(&self, id: i64) -> anyhow::Result<bool> {
        let result = PromptHistory::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
