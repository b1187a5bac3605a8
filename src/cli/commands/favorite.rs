use crate::config::Config;
use crate::db::Store;

pub async fn cmd_toggle_favorite(config: &Config, id: i64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    match store.toggle_favorite(id).await? {
        Some(true) => println!("★ Marked model {id} as favorite"),
        Some(false) => println!("Removed favorite mark from model {id}"),
        None => {
            println!("Model with ID {id} not found in the catalog.");
            println!("Use 'lorarr list' to see IDs.");
        }
    }

    Ok(())
}
