//! Prompt assembly: combines catalogued trigger words with a base prompt
//! and renders the reusable prompt block. Ships a small set of built-in
//! starting templates.

use crate::models::model_record::ModelRecord;

pub const DEFAULT_STEPS: u32 = 20;
pub const DEFAULT_CFG_SCALE: f32 = 7.0;

#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub base_prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub cfg_scale: f32,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            base_prompt: String::new(),
            negative_prompt: String::new(),
            steps: DEFAULT_STEPS,
            cfg_scale: DEFAULT_CFG_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub base_prompt: &'static str,
    pub negative_prompt: &'static str,
    pub steps: u32,
    pub cfg_scale: f32,
}

impl PromptTemplate {
    #[must_use]
    pub fn to_request(&self) -> PromptRequest {
        PromptRequest {
            base_prompt: self.base_prompt.to_string(),
            negative_prompt: self.negative_prompt.to_string(),
            steps: self.steps,
            cfg_scale: self.cfg_scale,
        }
    }
}

const QUALITY_NEGATIVE: &str = "(deformed iris, deformed pupils, semi-realistic, cgi, 3d, render, sketch, cartoon, drawing, anime), text, cropped, out of frame, worst quality, low quality, jpeg artifacts, ugly, duplicate, morbid, mutilated, extra fingers, mutated hands, poorly drawn hands, poorly drawn face, mutation, deformed, blurry, dehydrated, bad anatomy, bad proportions, extra limbs, cloned face, disfigured, gross proportions, malformed limbs, missing arms, missing legs, extra arms, extra legs, fused fingers, too many fingers, long neck";

const TEMPLATES: [PromptTemplate; 3] = [
    PromptTemplate {
        name: "Portrait Realistic",
        description: "Realistic portrait work",
        base_prompt: "RAW photo, portrait, 8k uhd, dslr, soft lighting, high quality, film grain, Fujifilm XT3",
        negative_prompt: QUALITY_NEGATIVE,
        steps: 30,
        cfg_scale: 7.0,
    },
    PromptTemplate {
        name: "Anime Style",
        description: "Anime-styled renders",
        base_prompt: "anime style, high quality, detailed",
        negative_prompt: QUALITY_NEGATIVE,
        steps: 25,
        cfg_scale: 7.0,
    },
    PromptTemplate {
        name: "Landscape",
        description: "Nature and landscapes",
        base_prompt: "landscape, nature, high quality, detailed, 8k uhd",
        negative_prompt: "text, watermark, signature, blurry, low quality, distorted",
        steps: 30,
        cfg_scale: 8.0,
    },
];

#[must_use]
pub const fn builtin_templates() -> &'static [PromptTemplate] {
    &TEMPLATES
}

#[must_use]
pub fn find_template(name: &str) -> Option<&'static PromptTemplate> {
    TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name))
}

/// Renders the full prompt block for the selected models.
///
/// Trigger words of each selected model are appended to the base prompt
/// in selection order, comma-separated, with the dangling separator
/// stripped.
#[must_use]
pub fn build_prompt(models: &[ModelRecord], request: &PromptRequest) -> String {
    let mut prompt = format!("{}\n\n", request.base_prompt);
    for model in models {
        if let Some(words) = model.trigger_words.as_deref()
            && !words.is_empty()
        {
            prompt.push_str(words);
            prompt.push_str(", ");
        }
    }

    let prompt = {
        let trimmed = prompt.trim_end();
        trimmed.strip_suffix(',').unwrap_or(trimmed)
    };

    let models_used = models
        .iter()
        .map(|m| format!("- {} ({})", m.name, m.model_type))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Prompt: {prompt}\n\nNegative Prompt: {}\n\nSettings:\nSteps: {}\nCFG Scale: {}\n\nModels Used:\n{models_used}",
        request.negative_prompt, request.steps, request.cfg_scale
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::model_record::{BaseModel, ModelType};

    fn model(name: &str, triggers: Option<&str>) -> ModelRecord {
        ModelRecord {
            id: 1,
            name: name.to_string(),
            model_type: ModelType::Lora,
            base_model: BaseModel::Sdxl,
            version: None,
            source_url: None,
            image_url: None,
            recommended_weight: None,
            recommended_steps: None,
            cfg_scale: None,
            tags: None,
            trigger_words: triggers.map(str::to_string),
            description: None,
            usage_recommendations: None,
            personal_notes: None,
            is_favorite: false,
            created_at: String::new(),
            updated_at: None,
        }
    }

    #[test]
    fn test_build_prompt_joins_trigger_words() {
        let models = vec![
            model("First", Some("alpha, beta")),
            model("Second", None),
            model("Third", Some("gamma")),
        ];
        let request = PromptRequest {
            base_prompt: "a castle at dusk".to_string(),
            negative_prompt: "blurry".to_string(),
            steps: 25,
            cfg_scale: 7.5,
        };

        let output = build_prompt(&models, &request);
        assert!(output.starts_with("Prompt: a castle at dusk\n\nalpha, beta, gamma\n\n"));
        assert!(output.contains("Negative Prompt: blurry"));
        assert!(output.contains("Steps: 25"));
        assert!(output.contains("CFG Scale: 7.5"));
        assert!(output.contains("- First (LoRA)"));
        assert!(output.contains("- Second (LoRA)"));
        assert!(output.contains("- Third (LoRA)"));
    }

    #[test]
    fn test_build_prompt_strips_dangling_separator() {
        let output = build_prompt(
            &[model("Only", Some("solo trigger"))],
            &PromptRequest::default(),
        );
        assert!(output.contains("solo trigger\n\nNegative Prompt:"));
        assert!(!output.contains("solo trigger,"));
    }

    #[test]
    fn test_templates_are_available_by_name() {
        assert_eq!(builtin_templates().len(), 3);
        let template = find_template("anime style").unwrap();
        assert_eq!(template.steps, 25);
        assert!(find_template("nope").is_none());
    }

    #[test]
    fn test_template_prefills_request() {
        let request = find_template("Landscape").unwrap().to_request();
        assert_eq!(request.steps, 30);
        assert!(request.base_prompt.starts_with("landscape"));
    }
}
