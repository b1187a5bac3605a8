use crate::catalog;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_models(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let mut models = store.list_models().await?;

    if models.is_empty() {
        println!("No models in the catalog.");
        println!();
        println!("Add one with: lorarr add <civitai link>");
        return Ok(());
    }

    catalog::sort_models(&mut models);

    println!("Catalogued Models ({} total)", models.len());
    println!("{:-<70}", "");

    for model in models {
        let star = if model.is_favorite { "★" } else { "•" };
        println!("{} {} [{}]", star, model.name, model.model_type);
        println!("  ID: {} | Base: {}", model.id, model.base_model);

        let mut quick = Vec::new();
        if let Some(weight) = model.recommended_weight {
            quick.push(format!("Weight: {weight}"));
        }
        if let Some(steps) = &model.recommended_steps {
            quick.push(format!("Steps: {steps}"));
        }
        if let Some(cfg) = &model.cfg_scale {
            quick.push(format!("CFG: {cfg}"));
        }
        if !quick.is_empty() {
            println!("  {}", quick.join(" | "));
        }
    }

    println!();
    println!("Legend: ★ Favorite");

    Ok(())
}
