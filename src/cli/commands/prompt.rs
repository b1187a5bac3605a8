use chrono::Utc;

use crate::config::Config;
use crate::db::Store;
use crate::prompt::{self, PromptRequest};

pub struct PromptBuildArgs {
    pub models: Vec<i64>,
    pub base: Option<String>,
    pub negative: Option<String>,
    pub steps: Option<u32>,
    pub cfg: Option<f32>,
    pub template: Option<String>,
    pub save: bool,
}

pub async fn cmd_prompt_build(config: &Config, args: PromptBuildArgs) -> anyhow::Result<()> {
    let template = match args.template.as_deref() {
        Some(name) => match prompt::find_template(name) {
            Some(t) => Some(t),
            None => {
                println!("Unknown template: {name}");
                println!("Use 'lorarr prompt templates' to see what ships built in.");
                return Ok(());
            }
        },
        None => None,
    };

    let store = Store::new(&config.general.database_path).await?;

    let mut selected = Vec::new();
    for id in &args.models {
        match store.get_model(*id).await? {
            Some(model) => selected.push(model),
            None => println!("⚠ Model {id} not found, skipping"),
        }
    }

    if selected.is_empty() {
        println!("No catalogued models selected, nothing to build.");
        return Ok(());
    }

    let defaults = template.map_or_else(PromptRequest::default, |t| t.to_request());
    let request = PromptRequest {
        base_prompt: args.base.unwrap_or(defaults.base_prompt),
        negative_prompt: args.negative.unwrap_or(defaults.negative_prompt),
        steps: args.steps.unwrap_or(defaults.steps),
        cfg_scale: args.cfg.unwrap_or(defaults.cfg_scale),
    };

    let output = prompt::build_prompt(&selected, &request);

    println!("{:-<70}", "");
    println!("{output}");
    println!("{:-<70}", "");

    if args.save {
        store
            .push_prompt(
                &output,
                &Utc::now().to_rfc3339(),
                config.prompts.history_limit,
            )
            .await?;
        println!();
        println!("✓ Saved to prompt history");
    }

    Ok(())
}

pub fn cmd_prompt_templates() {
    println!("Built-in Prompt Templates");
    println!("{:-<70}", "");

    for template in prompt::builtin_templates() {
        println!("• {}", template.name);
        println!("  {}", template.description);
        println!(
            "  Steps: {} | CFG: {}",
            template.steps, template.cfg_scale
        );
        println!("  Base: {}", template.base_prompt);
        println!();
    }

    println!("Use with: lorarr prompt build --model <id> --template \"Anime Style\"");
}

pub async fn cmd_prompt_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let entries = store.recent_prompts(limit).await?;

    if entries.is_empty() {
        println!("No prompts saved in history.");
        println!();
        println!("Save one with: lorarr prompt build --model <id> --save");
        return Ok(());
    }

    println!("Prompt History (last {})", entries.len());
    println!("{:-<70}", "");

    for entry in entries {
        println!("#{} | {}", entry.id, entry.created_at);
        for line in entry.prompt.lines() {
            println!("  {line}");
        }
        println!();
    }

    Ok(())
}

pub async fn cmd_prompt_forget(config: &Config, id: i64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.forget_prompt(id).await? {
        println!("✓ Removed prompt #{id} from history");
    } else {
        println!("Prompt #{id} not found in history.");
    }

    Ok(())
}
