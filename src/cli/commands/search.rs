use crate::catalog::ModelFilter;
use crate::config::Config;
use crate::db::Store;
use crate::models::model_record::{BaseModel, ModelType};

pub async fn cmd_search_models(
    config: &Config,
    query: &str,
    type_filter: Option<&str>,
    base_model_filter: Option<&str>,
) -> anyhow::Result<()> {
    let model_type = match type_filter {
        Some(raw) => match ModelType::parse(raw) {
            Some(t) => Some(t),
            None => {
                println!("Unknown model type: {raw}");
                println!(
                    "Use one of: Checkpoint, LoRA, VAE, TextualInversion, ControlNet, Hypernetwork, AestheticGradient"
                );
                return Ok(());
            }
        },
        None => None,
    };

    let filter = ModelFilter {
        model_type,
        base_model: base_model_filter.map(BaseModel::from_source),
        search: (!query.is_empty()).then(|| query.to_string()),
    };

    let store = Store::new(&config.general.database_path).await?;
    let results = filter.apply(store.list_models().await?);

    if results.is_empty() {
        println!("No models found.");
        println!("Try adjusting the search term or filters.");
        return Ok(());
    }

    println!("Search Results ({} found)", results.len());
    println!("{:-<70}", "");

    for model in results {
        let star = if model.is_favorite { "★" } else { "•" };
        println!("{} {} [{}]", star, model.name, model.model_type);
        println!("  ID: {} | Base: {}", model.id, model.base_model);
        if let Some(tags) = &model.tags {
            println!("  Tags: {tags}");
        }
        println!();
    }

    Ok(())
}
