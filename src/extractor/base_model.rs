//! Base-model resolution.
//!
//! Works through the candidate sources in strict priority order: the
//! structured payload fields, then page-HTML evidence when supplied, then
//! token sniffing in the description and name, and finally a default
//! keyed on the model type. The chain always resolves.

use std::sync::OnceLock;

use regex::Regex;

use crate::clients::civitai::{CivitaiModel, non_empty};
use crate::models::model_record::{BaseModel, ModelType};

/// Resolves the base model for a payload. `page_html` is only consulted
/// when none of the structured fields carries a value.
#[must_use]
pub fn resolve(
    payload: &CivitaiModel,
    page_html: Option<&str>,
    model_type: ModelType,
) -> BaseModel {
    if let Some(raw) = structured_base_model(payload) {
        return BaseModel::from_source(raw);
    }

    if let Some(html) = page_html
        && let Some(found) = scan_page(html)
    {
        return found;
    }

    let description = payload.description.as_deref().unwrap_or_default();
    let name = payload.name.as_deref().unwrap_or_default();
    for haystack in [description, name] {
        if let Some(found) = canonical_token(haystack) {
            return found;
        }
    }

    default_for_type(model_type)
}

/// The structured candidate locations, first non-empty wins: top-level
/// field, first version's field, first version's first file metadata.
#[must_use]
pub fn structured_base_model(payload: &CivitaiModel) -> Option<&str> {
    if let Some(raw) = non_empty(payload.base_model.as_deref()) {
        return Some(raw);
    }

    let version = payload.first_version()?;
    if let Some(raw) = non_empty(version.base_model.as_deref()) {
        return Some(raw);
    }

    version
        .files
        .as_deref()
        .and_then(<[_]>::first)
        .and_then(|f| f.metadata.as_ref())
        .and_then(|m| non_empty(m.base_model.as_deref()))
}

/// Case-insensitive substring probe for the four known tokens, in fixed
/// check order. Returns the canonical variant for the first hit.
fn canonical_token(text: &str) -> Option<BaseModel> {
    let lower = text.to_lowercase();
    if lower.contains("illustrious") {
        Some(BaseModel::Illustrious)
    } else if lower.contains("sdxl") {
        Some(BaseModel::Sdxl)
    } else if lower.contains("sd 1.5") {
        Some(BaseModel::Sd15)
    } else if lower.contains("sd 2.1") {
        Some(BaseModel::Sd21)
    } else {
        None
    }
}

const fn default_for_type(model_type: ModelType) -> BaseModel {
    match model_type {
        ModelType::Lora => BaseModel::Sdxl,
        _ => BaseModel::Sd15,
    }
}

/// Ordered page probes: the site's structured text elements first, then a
/// "Base Model" label probe, then bare keywords. These are tied to the
/// third-party markup and will stop matching if the page changes.
struct PageProbes(Vec<Regex>);

impl PageProbes {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<PageProbes>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let patterns = [
                    r#"(?i)<p[^>]*class="[^"]*mantine-Text-root[^"]*"[^>]*>([^<]*illustrious[^<]*)</p>"#,
                    r#"(?i)<p[^>]*class="[^"]*mantine-Text-root[^"]*"[^>]*>([^<]*sdxl[^<]*)</p>"#,
                    r#"(?i)<p[^>]*class="[^"]*mantine-Text-root[^"]*"[^>]*>([^<]*sd 1\.5[^<]*)</p>"#,
                    r#"(?i)<p[^>]*class="[^"]*mantine-Text-root[^"]*"[^>]*>([^<]*sd 2\.1[^<]*)</p>"#,
                    r"(?i)Base Model[^>]*>([^<]+)<",
                    r"(?i)illustrious",
                    r"(?i)sdxl",
                    r"(?i)sd 1\.5",
                    r"(?i)sd 2\.1",
                ];
                patterns
                    .iter()
                    .map(|p| Regex::new(p).ok())
                    .collect::<Option<Vec<_>>>()
                    .map(PageProbes)
            })
            .as_ref()
    }
}

/// Scans page HTML for base-model evidence. First probe hit wins; the
/// captured text is entity-decoded and canonicalized, and an
/// unrecognizable capture is kept as free text.
#[must_use]
pub fn scan_page(html: &str) -> Option<BaseModel> {
    let probes = PageProbes::get()?;

    for probe in &probes.0 {
        if let Some(caps) = probe.captures(html) {
            let found = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
                .unwrap_or_default();
            let decoded = html_escape::decode_html_entities(found);
            let trimmed = decoded.trim();
            return Some(
                canonical_token(trimmed)
                    .unwrap_or_else(|| BaseModel::Other(trimmed.to_string())),
            );
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: &str) -> CivitaiModel {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_top_level_field_takes_precedence() {
        let p = payload(
            r#"{
                "baseModel": "SD 2.1",
                "description": "an SDXL model",
                "modelVersions": [{"baseModel": "SDXL"}]
            }"#,
        );
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sd21);
    }

    #[test]
    fn test_version_field_is_second() {
        let p = payload(r#"{"baseModel": "", "modelVersions": [{"baseModel": "Illustrious"}]}"#);
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Illustrious);
    }

    #[test]
    fn test_file_metadata_is_third() {
        let p = payload(
            r#"{"modelVersions": [{"baseModel": "", "files": [{"metadata": {"baseModel": "SD 1.5"}}]}]}"#,
        );
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sd15);
    }

    #[test]
    fn test_description_token_before_name_token() {
        let p = payload(r#"{"name": "My SDXL thing", "description": "Trained on sd 1.5."}"#);
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sd15);

        let p = payload(r#"{"name": "My SDXL thing", "description": "no tokens here"}"#);
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sdxl);
    }

    #[test]
    fn test_description_scenario_from_the_field() {
        let p = payload(
            r#"{
                "name": "X",
                "type": "LoRA",
                "baseModel": "",
                "description": "Works great with SDXL checkpoints.",
                "modelVersions": [{"baseModel": "", "trainedWords": ["trigger1", "descriptive tag"]}]
            }"#,
        );
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sdxl);
    }

    #[test]
    fn test_type_defaults_when_nothing_matches() {
        let p = payload(r#"{"name": "plain", "description": "plain"}"#);
        assert_eq!(resolve(&p, None, ModelType::Lora), BaseModel::Sdxl);
        assert_eq!(resolve(&p, None, ModelType::Checkpoint), BaseModel::Sd15);
        assert_eq!(resolve(&p, None, ModelType::Vae), BaseModel::Sd15);
    }

    #[test]
    fn test_html_evidence_beats_description_tokens() {
        let p = payload(r#"{"description": "works with sd 1.5"}"#);
        let html = r#"<p class="mantine-Text-root mantine-abc123">Illustrious</p>"#;
        assert_eq!(
            resolve(&p, Some(html), ModelType::Lora),
            BaseModel::Illustrious
        );
    }

    #[test]
    fn test_structured_fields_beat_html_evidence() {
        let p = payload(r#"{"baseModel": "SDXL"}"#);
        let html = r#"<p class="mantine-Text-root">Illustrious</p>"#;
        assert_eq!(resolve(&p, Some(html), ModelType::Lora), BaseModel::Sdxl);
    }

    #[test]
    fn test_scan_page_label_probe() {
        let html = r#"<div><span title="Base Model">SDXL 1.0</span></div>"#;
        assert_eq!(scan_page(html), Some(BaseModel::Sdxl));
    }

    #[test]
    fn test_scan_page_label_probe_keeps_unknown_text() {
        let html = r#"<span title="Base Model">Pony Diffusion</span>no other tokens"#;
        assert_eq!(
            scan_page(html),
            Some(BaseModel::Other("Pony Diffusion".to_string()))
        );
    }

    #[test]
    fn test_scan_page_bare_keyword_probe() {
        assert_eq!(
            scan_page("lots of markup ... sdxl ... more markup"),
            Some(BaseModel::Sdxl)
        );
        assert_eq!(scan_page("nothing relevant"), None);
    }

    #[test]
    fn test_scan_page_decodes_entities() {
        let html = r#"<p class="mantine-Text-root">SDXL&nbsp;1.0</p>"#;
        assert_eq!(scan_page(html), Some(BaseModel::Sdxl));
    }
}
