//! Fetch-then-extract orchestration.
//!
//! One primary call for the structured payload; when that payload carries
//! no base model anywhere and the fallback is enabled, one sequential
//! secondary call for the model page HTML. A failing primary call aborts
//! the whole operation before the extractor runs; a failing secondary
//! call degrades silently to the extractor's later resolution steps.

use chrono::Utc;
use tracing::{info, warn};

use crate::clients::civitai::{CivitaiClient, CivitaiError};
use crate::config::CivitaiConfig;
use crate::extractor::{self, ExtractContext};
use crate::models::model_record::ModelRecord;

pub struct ModelFetchService {
    client: CivitaiClient,
    html_fallback: bool,
    ctx: ExtractContext,
}

impl ModelFetchService {
    #[must_use]
    pub fn new(config: CivitaiConfig) -> Self {
        let ctx = ExtractContext {
            page_base: config.page_base.clone(),
            image_base: config.image_base.clone(),
        };
        let html_fallback = config.html_fallback;

        Self {
            client: CivitaiClient::new(config),
            html_fallback,
            ctx,
        }
    }

    /// Fetches and extracts one model. The returned record is not
    /// persisted; the caller decides that.
    pub async fn fetch_model(&self, id: i64) -> Result<ModelRecord, CivitaiError> {
        let payload = self.client.get_model(id).await?;

        let page_html = if self.html_fallback && !payload.has_base_model() {
            info!("No structured base model for {id}, trying the model page");
            match self.client.fetch_model_page(id).await {
                Ok(html) => Some(html),
                Err(e) => {
                    warn!("Model page fetch failed for {id}: {e}");
                    None
                }
            }
        } else {
            None
        };

        let extracted = extractor::extract_record(&payload, page_html.as_deref(), &self.ctx);
        Ok(extracted.into_record(Utc::now()))
    }
}
