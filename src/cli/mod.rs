//! CLI module - Command-line interface for Lorarr
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Lorarr - Generative Model Catalog
/// A local catalog for checkpoints, LoRAs and their recommended settings
#[derive(Parser)]
#[command(name = "lorarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a model from Civitai and add it to the catalog
    #[command(alias = "a")]
    Add {
        /// Model page link or bare numeric model ID
        source: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List all catalogued models
    #[command(alias = "ls", alias = "l")]
    List,

    /// Show details about a catalogued model
    #[command(alias = "i")]
    Info {
        /// Model ID
        id: i64,
    },

    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Search term matched against name, tags, trigger words, description
        query: Vec<String>,
        /// Filter by canonical type (Checkpoint, LoRA, VAE, ...)
        #[arg(long = "type")]
        model_type: Option<String>,
        /// Filter by base model (SD 1.5, SDXL, Illustrious, ...)
        #[arg(long)]
        base_model: Option<String>,
    },

    /// Update fields on a catalogued model
    Edit {
        /// Model ID
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        base_model: Option<String>,
        /// Recommended LoRA weight
        #[arg(long)]
        weight: Option<f32>,
        /// Recommended steps, free text (e.g. "20-30")
        #[arg(long)]
        steps: Option<String>,
        /// Recommended CFG scale, free text (e.g. "7-8")
        #[arg(long)]
        cfg: Option<String>,
        /// Replace the personal notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Toggle the favorite flag on a model
    #[command(alias = "fav")]
    Favorite {
        /// Model ID
        id: i64,
    },

    /// Remove a model from the catalog
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// Model ID
        id: i64,
    },

    /// Show catalog statistics
    Stats,

    /// Build and manage reusable prompts
    Prompt {
        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// Assemble a prompt from catalogued models
    Build {
        /// Model IDs to include (repeatable)
        #[arg(long = "model", required = true)]
        models: Vec<i64>,
        /// Base prompt text
        #[arg(long)]
        base: Option<String>,
        /// Negative prompt text
        #[arg(long)]
        negative: Option<String>,
        /// Sampling steps
        #[arg(long)]
        steps: Option<u32>,
        /// CFG scale
        #[arg(long)]
        cfg: Option<f32>,
        /// Start from a built-in template
        #[arg(long)]
        template: Option<String>,
        /// Save the generated prompt to history
        #[arg(long)]
        save: bool,
    },
    /// List the built-in prompt templates
    Templates,
    /// Show recent saved prompts
    History {
        /// Number of entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },
    /// Delete a saved prompt
    #[command(alias = "rm")]
    Forget {
        /// History entry ID
        id: i64,
    },
}

pub use commands::*;
