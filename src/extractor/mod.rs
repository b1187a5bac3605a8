//! Metadata extraction pipeline.
//!
//! Turns a raw Civitai payload (plus, optionally, the model page HTML as
//! fallback evidence) into a normalized catalog record. The pipeline is
//! pure and synchronous: it performs no I/O, and it is total over
//! arbitrary payload shapes. Missing or malformed fields never error,
//! they degrade to the documented defaults.

pub mod base_model;
pub mod sanitize;
pub mod tags;
pub mod usage;

use chrono::{DateTime, Utc};

use crate::clients::civitai::{CivitaiModel, non_empty};
use crate::models::model_record::{BaseModel, ModelRecord, ModelType};

/// Section heading the notes template carries for the user's own text.
pub const NOTES_SECTION_MARKER: &str = "=== PERSONAL NOTES ===";

/// Section heading under which an extracted sampler recommendation is
/// inserted, when the heading is already present in the notes.
pub const SAMPLER_SECTION_MARKER: &str = "=== USAGE RECOMMENDATIONS ===";

/// Endpoint bases used when assembling derived link fields.
#[derive(Debug, Clone)]
pub struct ExtractContext {
    pub page_base: String,
    pub image_base: String,
}

/// A fully resolved record candidate, minus the clock-derived fields the
/// caller stamps on persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedModel {
    pub name: String,
    pub model_type: ModelType,
    pub base_model: BaseModel,
    pub version: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub recommended_steps: Option<String>,
    pub cfg_scale: Option<String>,
    pub tags: Option<String>,
    pub trigger_words: Option<String>,
    pub description: Option<String>,
    pub usage_recommendations: Option<String>,
    pub personal_notes: Option<String>,
}

impl ExtractedModel {
    /// Materializes a persistable record. The creation instant supplies
    /// both the identifier (millisecond timestamp) and the created stamp.
    #[must_use]
    pub fn into_record(self, created_at: DateTime<Utc>) -> ModelRecord {
        ModelRecord {
            id: created_at.timestamp_millis(),
            name: self.name,
            model_type: self.model_type,
            base_model: self.base_model,
            version: self.version,
            source_url: self.source_url,
            image_url: self.image_url,
            recommended_weight: None,
            recommended_steps: self.recommended_steps,
            cfg_scale: self.cfg_scale,
            tags: self.tags,
            trigger_words: self.trigger_words,
            description: self.description,
            usage_recommendations: self.usage_recommendations,
            personal_notes: self.personal_notes,
            is_favorite: false,
            created_at: created_at.to_rfc3339(),
            updated_at: None,
        }
    }
}

/// Runs the whole pipeline over one payload.
///
/// `page_html` is the optional fallback evidence; pass it only when the
/// structured payload carries no base model anywhere (see
/// [`CivitaiModel::has_base_model`]).
#[must_use]
pub fn extract_record(
    payload: &CivitaiModel,
    page_html: Option<&str>,
    ctx: &ExtractContext,
) -> ExtractedModel {
    let model_type = ModelType::from_source(payload.model_type.as_deref());
    let base_model = base_model::resolve(payload, page_html, model_type);

    let first_version = payload.first_version();
    let version = first_version
        .and_then(|v| non_empty(v.name.as_deref()))
        .map(str::to_string);

    let source_id = payload.id.unwrap_or_default();
    let source_url = Some(format!(
        "{}/{source_id}",
        ctx.page_base.trim_end_matches('/')
    ));

    let image_url = first_version
        .and_then(|v| v.images.as_deref())
        .and_then(<[_]>::first)
        .and_then(|img| non_empty(img.url.as_deref()))
        .map(|name| format!("{}/{name}", ctx.image_base.trim_end_matches('/')));

    let trigger_words = first_version
        .and_then(|v| v.trained_words.as_deref())
        .filter(|words| !words.is_empty())
        .map(|words| words.join(", "));

    let raw_description = payload.description.as_deref().unwrap_or_default();
    let sanitized = sanitize::sanitize_description(raw_description);
    let description = (!sanitized.is_empty()).then_some(sanitized);

    let recommendations = usage::extract_recommendations(raw_description);
    let usage_recommendations = (!recommendations.is_empty()).then_some(recommendations);

    let settings = usage::extract_settings(raw_description);

    let mut personal_notes = format!(
        "Model ID: {source_id}\nDownloads: {}\nRating: {}/5\n\n{NOTES_SECTION_MARKER}\nAdd your personal notes here...",
        payload.download_count.unwrap_or_default(),
        payload.rating.unwrap_or_default(),
    );
    if let Some(sampler) = &settings.sampler {
        personal_notes = usage::append_sampler_note(&personal_notes, sampler);
    }

    ExtractedModel {
        name: payload.name.clone().unwrap_or_default(),
        model_type,
        base_model,
        version,
        source_url,
        image_url,
        recommended_steps: settings.steps,
        cfg_scale: settings.cfg_scale,
        tags: tags::resolve(payload),
        trigger_words,
        description,
        usage_recommendations,
        personal_notes: Some(personal_notes),
    }
}
