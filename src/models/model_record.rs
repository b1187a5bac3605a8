use serde::{Deserialize, Serialize};

/// The closed set of model kinds the catalog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelType {
    Checkpoint,
    Lora,
    Vae,
    TextualInversion,
    ControlNet,
    Hypernetwork,
    AestheticGradient,
}

impl ModelType {
    /// Maps a raw source type string onto the closed set.
    ///
    /// The lookup is case-sensitive apart from the two all-caps aliases the
    /// source API is known to emit. Anything unrecognized becomes `Lora`.
    #[must_use]
    pub fn from_source(raw: Option<&str>) -> Self {
        match raw.unwrap_or_default() {
            "Checkpoint" | "CHECKPOINT" => Self::Checkpoint,
            "VAE" => Self::Vae,
            "TextualInversion" => Self::TextualInversion,
            "ControlNet" => Self::ControlNet,
            "Hypernetwork" => Self::Hypernetwork,
            "AestheticGradient" => Self::AestheticGradient,
            _ => Self::Lora,
        }
    }

    /// Strict parse of a canonical type name, for CLI filters and stored rows.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Checkpoint" => Some(Self::Checkpoint),
            "LoRA" => Some(Self::Lora),
            "VAE" => Some(Self::Vae),
            "TextualInversion" => Some(Self::TextualInversion),
            "ControlNet" => Some(Self::ControlNet),
            "Hypernetwork" => Some(Self::Hypernetwork),
            "AestheticGradient" => Some(Self::AestheticGradient),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checkpoint => "Checkpoint",
            Self::Lora => "LoRA",
            Self::Vae => "VAE",
            Self::TextualInversion => "TextualInversion",
            Self::ControlNet => "ControlNet",
            Self::Hypernetwork => "Hypernetwork",
            Self::AestheticGradient => "AestheticGradient",
        }
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The architecture a model was trained against.
///
/// Canonical variants cover the labels the extractor recognizes; anything
/// else the source reports is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseModel {
    Sd15,
    Sd21,
    Sdxl,
    Illustrious,
    Other(String),
}

impl BaseModel {
    /// Canonicalizes a raw source string.
    ///
    /// Tokens are checked as case-insensitive substrings in a fixed order:
    /// illustrious, sdxl, sd 1.5, sd 2.1. An unrecognized value is kept as
    /// free text.
    #[must_use]
    pub fn from_source(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        if lower.contains("illustrious") {
            Self::Illustrious
        } else if lower.contains("sdxl") {
            Self::Sdxl
        } else if lower.contains("sd 1.5") {
            Self::Sd15
        } else if lower.contains("sd 2.1") {
            Self::Sd21
        } else {
            Self::Other(raw.trim().to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sd15 => "SD 1.5",
            Self::Sd21 => "SD 2.1",
            Self::Sdxl => "SDXL",
            Self::Illustrious => "Illustrious",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for BaseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One catalogued model and its recommended usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Millisecond creation timestamp; doubles as the unique identifier.
    pub id: i64,
    pub name: String,
    pub model_type: ModelType,
    pub base_model: BaseModel,
    pub version: Option<String>,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
    pub recommended_weight: Option<f32>,
    pub recommended_steps: Option<String>,
    pub cfg_scale: Option<String>,
    /// Comma-joined descriptive tags.
    pub tags: Option<String>,
    /// Comma-joined trigger words, unfiltered.
    pub trigger_words: Option<String>,
    pub description: Option<String>,
    pub usage_recommendations: Option<String>,
    pub personal_notes: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_lookup_table() {
        assert_eq!(ModelType::from_source(Some("Checkpoint")), ModelType::Checkpoint);
        assert_eq!(ModelType::from_source(Some("LoRA")), ModelType::Lora);
        assert_eq!(ModelType::from_source(Some("LORA")), ModelType::Lora);
        assert_eq!(ModelType::from_source(Some("CHECKPOINT")), ModelType::Checkpoint);
        assert_eq!(ModelType::from_source(Some("VAE")), ModelType::Vae);
        assert_eq!(
            ModelType::from_source(Some("TextualInversion")),
            ModelType::TextualInversion
        );
    }

    #[test]
    fn test_unknown_type_defaults_to_lora() {
        assert_eq!(ModelType::from_source(Some("Foo")), ModelType::Lora);
        assert_eq!(ModelType::from_source(Some("checkpoint")), ModelType::Lora);
        assert_eq!(ModelType::from_source(None), ModelType::Lora);
        assert_eq!(ModelType::from_source(Some("")), ModelType::Lora);
    }

    #[test]
    fn test_type_parse_is_strict() {
        assert_eq!(ModelType::parse("LoRA"), Some(ModelType::Lora));
        assert_eq!(ModelType::parse("lora"), None);
        assert_eq!(ModelType::parse("Foo"), None);
    }

    #[test]
    fn test_base_model_canonicalization() {
        assert_eq!(BaseModel::from_source("SDXL"), BaseModel::Sdxl);
        assert_eq!(BaseModel::from_source("SDXL 1.0"), BaseModel::Sdxl);
        assert_eq!(BaseModel::from_source("Illustrious XL"), BaseModel::Illustrious);
        assert_eq!(BaseModel::from_source("sd 1.5"), BaseModel::Sd15);
        assert_eq!(BaseModel::from_source("SD 2.1"), BaseModel::Sd21);
        assert_eq!(
            BaseModel::from_source("Pony"),
            BaseModel::Other("Pony".to_string())
        );
    }

    #[test]
    fn test_base_model_token_order() {
        // Illustrious is checked before SDXL, so a string carrying both
        // canonicalizes to Illustrious.
        assert_eq!(
            BaseModel::from_source("Illustrious (SDXL)"),
            BaseModel::Illustrious
        );
    }

    #[test]
    fn test_canonical_labels() {
        assert_eq!(BaseModel::Sd15.as_str(), "SD 1.5");
        assert_eq!(BaseModel::Sdxl.as_str(), "SDXL");
        assert_eq!(BaseModel::Other("Pony".to_string()).as_str(), "Pony");
        assert_eq!(ModelType::Lora.to_string(), "LoRA");
    }
}
