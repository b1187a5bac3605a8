use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::CivitaiConfig;

#[derive(Debug, Error)]
pub enum CivitaiError {
    #[error("request to Civitai failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Civitai answered with status {0}")]
    Status(StatusCode),
    #[error("invalid Civitai endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Raw model payload as the Civitai API ships it.
///
/// Every field is optional; the extractor treats absence, null and empty
/// string the same way, so nothing here is required to be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CivitaiModel {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub model_type: Option<String>,
    pub base_model: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<TagEntry>>,
    pub download_count: Option<i64>,
    pub rating: Option<f64>,
    pub model_versions: Option<Vec<CivitaiModelVersion>>,
}

impl CivitaiModel {
    #[must_use]
    pub fn first_version(&self) -> Option<&CivitaiModelVersion> {
        self.model_versions.as_deref().and_then(<[_]>::first)
    }

    /// Whether any of the structured base-model locations carries a value.
    /// When this is false the caller may fetch the model page as fallback
    /// evidence.
    #[must_use]
    pub fn has_base_model(&self) -> bool {
        if non_empty(self.base_model.as_deref()).is_some() {
            return true;
        }
        let Some(version) = self.first_version() else {
            return false;
        };
        if non_empty(version.base_model.as_deref()).is_some() {
            return true;
        }
        version
            .files
            .as_deref()
            .and_then(<[_]>::first)
            .and_then(|f| f.metadata.as_ref())
            .and_then(|m| non_empty(m.base_model.as_deref()))
            .is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CivitaiModelVersion {
    pub name: Option<String>,
    pub base_model: Option<String>,
    pub trained_words: Option<Vec<String>>,
    pub images: Option<Vec<CivitaiImage>>,
    pub files: Option<Vec<CivitaiFile>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CivitaiImage {
    pub url: Option<String>,
    pub meta: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CivitaiFile {
    pub metadata: Option<CivitaiFileMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CivitaiFileMetadata {
    pub base_model: Option<String>,
}

/// A tag entry as Civitai ships it: sometimes a bare string, sometimes an
/// object carrying `name`/`id`/`value`. Anything else is dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    Text(String),
    Detailed {
        name: Option<String>,
        id: Option<serde_json::Value>,
        value: Option<String>,
    },
    Other(serde_json::Value),
}

impl TagEntry {
    /// Normalizes the entry to a plain string: `name`, then `id`, then
    /// `value`, first non-empty wins. Returns `None` when nothing usable
    /// is present.
    #[must_use]
    pub fn normalize(&self) -> Option<String> {
        match self {
            Self::Text(s) => non_empty(Some(s)).map(str::to_string),
            Self::Detailed { name, id, value } => non_empty(name.as_deref())
                .map(str::to_string)
                .or_else(|| id.as_ref().and_then(value_to_string))
                .or_else(|| non_empty(value.as_deref()).map(str::to_string)),
            Self::Other(_) => None,
        }
    }
}

fn value_to_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => non_empty(Some(s)).map(str::to_string),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Pulls a numeric model ID out of user input: either a bare number or a
/// model page link.
#[must_use]
pub fn extract_model_id(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(id) = input.parse::<i64>() {
        return Some(id);
    }

    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"civitai\.com/models/(\d+)").expect("Invalid regex pattern defined in code")
    });

    re.captures(input)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Clone)]
pub struct CivitaiClient {
    client: Client,
    config: CivitaiConfig,
}

impl CivitaiClient {
    #[must_use]
    pub fn new(config: CivitaiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(
                config.request_timeout_seconds,
            )))
            .user_agent("Lorarr/1.0")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    fn model_endpoint(&self, id: i64) -> Result<Url, CivitaiError> {
        let base = self.config.api_base.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/models/{id}"))?)
    }

    fn page_endpoint(&self, id: i64) -> Result<Url, CivitaiError> {
        Ok(Url::parse(&self.model_page_url(id))?)
    }

    #[must_use]
    pub fn model_page_url(&self, id: i64) -> String {
        format!("{}/{id}", self.config.page_base.trim_end_matches('/'))
    }

    /// Fetches the structured model payload.
    pub async fn get_model(&self, id: i64) -> Result<CivitaiModel, CivitaiError> {
        let url = self.model_endpoint(id)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CivitaiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Fetches the public model page as text, for base-model fallback
    /// evidence when the payload carries none.
    pub async fn fetch_model_page(&self, id: i64) -> Result<String, CivitaiError> {
        let url = self.page_endpoint(id)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CivitaiError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_model_id_from_url() {
        assert_eq!(
            extract_model_id("https://civitai.com/models/1743952/yuzuha-ukinami-zenless-zone-zero"),
            Some(1_743_952)
        );
        assert_eq!(
            extract_model_id("https://civitai.com/models/42"),
            Some(42)
        );
    }

    #[test]
    fn test_extract_model_id_from_bare_number() {
        assert_eq!(extract_model_id("12345"), Some(12345));
        assert_eq!(extract_model_id("  12345  "), Some(12345));
    }

    #[test]
    fn test_extract_model_id_rejects_garbage() {
        assert_eq!(extract_model_id("https://example.com/models/42"), None);
        assert_eq!(extract_model_id("not a link"), None);
        assert_eq!(extract_model_id(""), None);
    }

    #[test]
    fn test_payload_with_missing_fields() {
        let payload: CivitaiModel = serde_json::from_str("{}").unwrap();
        assert!(payload.name.is_none());
        assert!(payload.first_version().is_none());
        assert!(!payload.has_base_model());
    }

    #[test]
    fn test_payload_with_null_fields() {
        let payload: CivitaiModel =
            serde_json::from_str(r#"{"baseModel": null, "modelVersions": null}"#).unwrap();
        assert!(!payload.has_base_model());
    }

    #[test]
    fn test_tag_entries_in_both_shapes() {
        let payload: CivitaiModel = serde_json::from_str(
            r#"{"tags": ["anime", {"name": "character"}, {"id": 42}, {"value": "style"}, {"name": ""}, true]}"#,
        )
        .unwrap();

        let tags: Vec<String> = payload
            .tags
            .unwrap()
            .iter()
            .filter_map(TagEntry::normalize)
            .collect();
        assert_eq!(tags, vec!["anime", "character", "42", "style"]);
    }

    #[test]
    fn test_has_base_model_checks_nested_locations() {
        let payload: CivitaiModel = serde_json::from_str(
            r#"{"modelVersions": [{"files": [{"metadata": {"baseModel": "SDXL"}}]}]}"#,
        )
        .unwrap();
        assert!(payload.has_base_model());

        let payload: CivitaiModel = serde_json::from_str(
            r#"{"baseModel": "", "modelVersions": [{"baseModel": ""}]}"#,
        )
        .unwrap();
        assert!(!payload.has_base_model());
    }
}
