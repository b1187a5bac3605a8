//! In-memory catalog queries: filtering, ordering, stats.

use crate::models::model_record::{BaseModel, ModelRecord, ModelType};

/// Filter criteria mirroring the catalog browse controls. All criteria
/// are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ModelFilter {
    pub model_type: Option<ModelType>,
    pub base_model: Option<BaseModel>,
    /// Case-insensitive term matched against name, tags, trigger words
    /// and description.
    pub search: Option<String>,
}

impl ModelFilter {
    #[must_use]
    pub fn matches(&self, model: &ModelRecord) -> bool {
        if let Some(wanted) = self.model_type
            && model.model_type != wanted
        {
            return false;
        }

        if let Some(wanted) = &self.base_model
            && &model.base_model != wanted
        {
            return false;
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let haystacks = [
                Some(model.name.as_str()),
                model.tags.as_deref(),
                model.trigger_words.as_deref(),
                model.description.as_deref(),
            ];
            if !haystacks
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(&term))
            {
                return false;
            }
        }

        true
    }

    #[must_use]
    pub fn apply(&self, mut models: Vec<ModelRecord>) -> Vec<ModelRecord> {
        models.retain(|m| self.matches(m));
        sort_models(&mut models);
        models
    }
}

/// Favorites first, then case-insensitive name order.
pub fn sort_models(models: &mut [ModelRecord]) {
    models.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub total: usize,
    pub loras: usize,
    pub checkpoints: usize,
    pub favorites: usize,
}

impl CatalogStats {
    #[must_use]
    pub fn from_models(models: &[ModelRecord]) -> Self {
        Self {
            total: models.len(),
            loras: models
                .iter()
                .filter(|m| m.model_type == ModelType::Lora)
                .count(),
            checkpoints: models
                .iter()
                .filter(|m| m.model_type == ModelType::Checkpoint)
                .count(),
            favorites: models.iter().filter(|m| m.is_favorite).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, model_type: ModelType, base: BaseModel, favorite: bool) -> ModelRecord {
        ModelRecord {
            id: 1,
            name: name.to_string(),
            model_type,
            base_model: base,
            version: None,
            source_url: None,
            image_url: None,
            recommended_weight: None,
            recommended_steps: None,
            cfg_scale: None,
            tags: Some("anime, character".to_string()),
            trigger_words: Some("trigger_a".to_string()),
            description: Some("a painterly style".to_string()),
            personal_notes: None,
            usage_recommendations: None,
            is_favorite: favorite,
            created_at: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn test_type_and_base_model_filters() {
        let models = vec![
            record("A", ModelType::Lora, BaseModel::Sdxl, false),
            record("B", ModelType::Checkpoint, BaseModel::Sd15, false),
        ];

        let filter = ModelFilter {
            model_type: Some(ModelType::Checkpoint),
            ..Default::default()
        };
        let result = filter.apply(models.clone());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "B");

        let filter = ModelFilter {
            base_model: Some(BaseModel::Sdxl),
            ..Default::default()
        };
        let result = filter.apply(models);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "A");
    }

    #[test]
    fn test_search_spans_name_tags_triggers_description() {
        let filter = |term: &str| ModelFilter {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let model = record("Yuzuha", ModelType::Lora, BaseModel::Illustrious, false);

        assert!(filter("yuzu").matches(&model));
        assert!(filter("CHARACTER").matches(&model));
        assert!(filter("trigger_a").matches(&model));
        assert!(filter("painterly").matches(&model));
        assert!(!filter("missing").matches(&model));
    }

    #[test]
    fn test_sort_puts_favorites_first_then_name() {
        let mut models = vec![
            record("zeta", ModelType::Lora, BaseModel::Sdxl, false),
            record("Alpha", ModelType::Lora, BaseModel::Sdxl, false),
            record("omega", ModelType::Lora, BaseModel::Sdxl, true),
        ];
        sort_models(&mut models);

        let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["omega", "Alpha", "zeta"]);
    }

    #[test]
    fn test_stats() {
        let models = vec![
            record("A", ModelType::Lora, BaseModel::Sdxl, true),
            record("B", ModelType::Lora, BaseModel::Sdxl, false),
            record("C", ModelType::Checkpoint, BaseModel::Sd15, false),
            record("D", ModelType::Vae, BaseModel::Sd15, true),
        ];
        assert_eq!(
            CatalogStats::from_models(&models),
            CatalogStats {
                total: 4,
                loras: 2,
                checkpoints: 1,
                favorites: 2,
            }
        );
    }
}
