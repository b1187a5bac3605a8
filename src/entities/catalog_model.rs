use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_model")]
pub struct Model {
    /// Millisecond creation timestamp, assigned by the caller.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub model_type: String,
    pub base_model: String,
    pub version: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub recommended_weight: Option<f32>,
    pub recommended_steps: Option<String>,
    pub cfg_scale: Option<String>,
    pub tags: Option<String>,
    pub trigger_words: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub usage_recommendations: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub personal_notes: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
