pub mod catalog;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod entities;
pub mod extractor;
pub mod models;
pub mod prompt;
pub mod services;

use clap::{CommandFactory, Parser};
pub use config::Config;

use cli::{Cli, Commands, PromptCommands};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Add { source, yes } => cli::cmd_add_model(&config, &source, yes).await,

        Commands::List => cli::cmd_list_models(&config).await,

        Commands::Info { id } => cli::cmd_model_info(&config, id).await,

        Commands::Search {
            query,
            model_type,
            base_model,
        } => {
            let query = query.join(" ");
            cli::cmd_search_models(&config, &query, model_type.as_deref(), base_model.as_deref())
                .await
        }

        Commands::Edit {
            id,
            name,
            base_model,
            weight,
            steps,
            cfg,
            notes,
        } => {
            let args = cli::EditArgs {
                name,
                base_model,
                weight,
                steps,
                cfg,
                notes,
            };
            cli::cmd_edit_model(&config, id, args).await
        }

        Commands::Favorite { id } => cli::cmd_toggle_favorite(&config, id).await,

        Commands::Remove { id } => cli::cmd_remove_model(&config, id).await,

        Commands::Stats => cli::cmd_stats(&config).await,

        Commands::Prompt { command } => match command {
            PromptCommands::Build {
                models,
                base,
                negative,
                steps,
                cfg,
                template,
                save,
            } => {
                let args = cli::PromptBuildArgs {
                    models,
                    base,
                    negative,
                    steps,
                    cfg,
                    template,
                    save,
                };
                cli::cmd_prompt_build(&config, args).await
            }
            PromptCommands::Templates => {
                cli::cmd_prompt_templates();
                Ok(())
            }
            PromptCommands::History { limit } => cli::cmd_prompt_history(&config, limit).await,
            PromptCommands::Forget { id } => cli::cmd_prompt_forget(&config, id).await,
        },

        Commands::Init => {
            Config::create_default_if_missing()?;
            println!("✓ Config file created. Edit config.toml and run again.");
            Ok(())
        }
    }
}
