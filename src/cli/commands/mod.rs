mod add;
mod edit;
mod favorite;
mod info;
mod list;
mod prompt;
mod remove;
mod search;
mod stats;

pub use add::cmd_add_model;
pub use edit::{EditArgs, cmd_edit_model};
pub use favorite::cmd_toggle_favorite;
pub use info::cmd_model_info;
pub use list::cmd_list_models;
pub use prompt::{
    PromptBuildArgs, cmd_prompt_build, cmd_prompt_forget, cmd_prompt_history, cmd_prompt_templates,
};
pub use remove::cmd_remove_model;
pub use search::cmd_search_models;
pub use stats::cmd_stats;
