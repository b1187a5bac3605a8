use crate::entities::{catalog_model, prelude::*};
use crate::models::model_record::{BaseModel, ModelRecord, ModelType};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

pub struct ModelRepository {
    conn: DatabaseConnection,
}

impl ModelRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_row_to_record(row: catalog_model::Model) -> ModelRecord {
        ModelRecord {
            id: row.id,
            name: row.name,
            // Stored strings are the canonical labels, so the boundary
            // canonicalizers map them straight back.
            model_type: ModelType::parse(&row.model_type).unwrap_or(ModelType::Lora),
            base_model: BaseModel::from_source(&row.base_model),
            version: row.version,
            source_url: row.source_url,
            image_url: row.image_url,
            recommended_weight: row.recommended_weight,
            recommended_steps: row.recommended_steps,
            cfg_scale: row.cfg_scale,
            tags: row.tags,
            trigger_words: row.trigger_words,
            description: row.description,
            usage_recommendations: row.usage_recommendations,
            personal_notes: row.personal_notes,
            is_favorite: row.is_favorite,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn map_record_to_active(record: &ModelRecord) -> catalog_model::ActiveModel {
        catalog_model::ActiveModel {
            id: Set(record.id),
            name: Set(record.name.clone()),
            model_type: Set(record.model_type.as_str().to_string()),
            base_model: Set(record.base_model.as_str().to_string()),
            version: Set(record.version.clone()),
            source_url: Set(record.source_url.clone()),
            image_url: Set(record.image_url.clone()),
            recommended_weight: Set(record.recommended_weight),
            recommended_steps: Set(record.recommended_steps.clone()),
            cfg_scale: Set(record.cfg_scale.clone()),
            tags: Set(record.tags.clone()),
            trigger_words: Set(record.trigger_words.clone()),
            description: Set(record.description.clone()),
            usage_recommendations: Set(record.usage_recommendations.clone()),
            personal_notes: Set(record.personal_notes.clone()),
            is_favorite: Set(record.is_favorite),
            created_at: Set(record.created_at.clone()),
            updated_at: Set(record.updated_at.clone()),
        }
    }

    pub async fn add(&self, record: &ModelRecord) -> anyhow::Result<()> {
        let active = Self::map_record_to_active(record);

        CatalogModel::insert(active)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(catalog_model::Column::Id)
                    .update_columns([
                        catalog_model::Column::Name,
                        catalog_model::Column::ModelType,
                        catalog_model::Column::BaseModel,
                        catalog_model::Column::Version,
                        catalog_model::Column::SourceUrl,
                        catalog_model::Column::ImageUrl,
                        catalog_model::Column::RecommendedWeight,
                        catalog_model::Column::RecommendedSteps,
                        catalog_model::Column::CfgScale,
                        catalog_model::Column::Tags,
                        catalog_model::Column::TriggerWords,
                        catalog_model::Column::Description,
                        catalog_model::Column::UsageRecommendations,
                        catalog_model::Column::PersonalNotes,
                        catalog_model::Column::IsFavorite,
                        catalog_model::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        info!("Added (or updated) model: {}", record.name);
        Ok(())
    }

    pub async fn get(&self, id: i64) -> anyhow::Result<Option<ModelRecord>> {
        let row = CatalogModel::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_row_to_record))
    }

    pub async fn list(&self) -> anyhow::Result<Vec<ModelRecord>> {
        let rows = CatalogModel::find()
            .order_by_asc(catalog_model::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_row_to_record).collect())
    }

    pub async fn remove(&self, id: i64) -> anyhow::Result<bool> {
        let result = CatalogModel::delete_by_id(id).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed model with ID: {}", id);
        }
        Ok(removed)
    }

    /// Flips the favorite flag. Returns the new state, or `None` when the
    /// model does not exist.
    pub async fn toggle_favorite(&self, id: i64) -> anyhow::Result<Option<bool>> {
        let Some(row) = CatalogModel::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let new_state = !row.is_favorite;
        let mut active: catalog_model::ActiveModel = row.into();
        active.is_favorite = Set(new_state);
        active.update(&self.conn).await?;

        Ok(Some(new_state))
    }

    pub async fn update(&self, record: &ModelRecord) -> anyhow::Result<()> {
        let active = Self::map_record_to_active(record);
        active.update(&self.conn).await?;
        info!("Updated model: {}", record.name);
        Ok(())
    }
}
