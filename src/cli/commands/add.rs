use crate::clients::civitai::extract_model_id;
use crate::config::Config;
use crate::db::Store;
use crate::services::ModelFetchService;
use tracing::warn;

pub async fn cmd_add_model(config: &Config, source: &str, assume_yes: bool) -> anyhow::Result<()> {
    let Some(civitai_id) = extract_model_id(source) else {
        println!("Could not find a model ID in '{source}'.");
        println!("Pass a numeric ID or a link like https://civitai.com/models/1743952");
        return Ok(());
    };

    println!("Fetching model {civitai_id} from Civitai...");

    let service = ModelFetchService::new(config.civitai.clone());
    let record = match service.fetch_model(civitai_id).await {
        Ok(record) => record,
        Err(e) => {
            warn!("Fetch failed for model {civitai_id}: {e}");
            println!("Failed to fetch the model from Civitai. Check the link and try again.");
            return Ok(());
        }
    };

    println!();
    println!("Extracted:");
    println!("{:-<60}", "");
    println!("Name:       {}", record.name);
    println!("Type:       {}", record.model_type);
    println!("Base Model: {}", record.base_model);
    if let Some(version) = &record.version {
        println!("Version:    {version}");
    }
    if let Some(tags) = &record.tags {
        println!("Tags:       {tags}");
    }
    if let Some(words) = &record.trigger_words {
        let count = words.split(',').count();
        println!("Triggers:   {count} words");
    }
    if let Some(steps) = &record.recommended_steps {
        println!("Steps:      {steps}");
    }
    if let Some(cfg) = &record.cfg_scale {
        println!("CFG Scale:  {cfg}");
    }

    if !assume_yes {
        println!();
        println!("Add to catalog? (y/N):");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let store = Store::new(&config.general.database_path).await?;
    store.add_model(&record).await?;

    println!();
    println!("✓ Added: {} (ID: {})", record.name, record.id);
    println!("Run 'lorarr info {}' to see the full record.", record.id);

    Ok(())
}
