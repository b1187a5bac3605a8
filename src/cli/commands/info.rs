use crate::config::Config;
use crate::db::Store;

pub async fn cmd_model_info(config: &Config, id: i64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(model) = store.get_model(id).await? else {
        println!("Model with ID {id} not found in the catalog.");
        println!("Use 'lorarr list' to see IDs.");
        return Ok(());
    };

    println!("Model Info");
    println!("{:-<60}", "");
    println!("Name:       {}", model.name);
    println!("ID:         {}", model.id);
    println!("Type:       {}", model.model_type);
    println!("Base Model: {}", model.base_model);
    if let Some(version) = &model.version {
        println!("Version:    {version}");
    }
    if let Some(url) = &model.source_url {
        println!("Source:     {url}");
    }
    if let Some(url) = &model.image_url {
        println!("Image:      {url}");
    }
    println!("Favorite:   {}", if model.is_favorite { "Yes" } else { "No" });

    if model.recommended_weight.is_some()
        || model.recommended_steps.is_some()
        || model.cfg_scale.is_some()
    {
        println!();
        println!("-- Recommended Settings --");
        if let Some(weight) = model.recommended_weight {
            println!("Weight:    {weight}");
        }
        if let Some(steps) = &model.recommended_steps {
            println!("Steps:     {steps}");
        }
        if let Some(cfg) = &model.cfg_scale {
            println!("CFG Scale: {cfg}");
        }
    }

    if let Some(tags) = &model.tags {
        println!();
        println!("Tags: {tags}");
    }

    if let Some(words) = &model.trigger_words {
        println!();
        println!("Trigger Words:");
        println!("  {words}");
    }

    if let Some(usage) = &model.usage_recommendations {
        println!();
        println!("Usage Recommendations:");
        for line in usage.lines() {
            println!("  {line}");
        }
    }

    if let Some(description) = &model.description {
        println!();
        println!("Description:");
        let display = if description.len() > 300 {
            let mut cut = 300;
            while !description.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &description[..cut])
        } else {
            description.clone()
        };
        for line in display.lines() {
            println!("  {line}");
        }
    }

    if let Some(notes) = &model.personal_notes {
        println!();
        println!("Personal Notes:");
        for line in notes.lines() {
            println!("  {line}");
        }
    }

    println!();
    println!("Created: {}", model.created_at);
    if let Some(updated) = &model.updated_at {
        println!("Updated: {updated}");
    }

    Ok(())
}
