use crate::config::Config;
use crate::db::Store;

pub async fn cmd_remove_model(config: &Config, id: i64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if let Some(model) = store.get_model(id).await? {
        println!("Remove '{}' (ID: {}) from the catalog?", model.name, model.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if input.trim().eq_ignore_ascii_case("y") {
            if store.remove_model(id).await? {
                println!("✓ Removed: {}", model.name);
            } else {
                println!("Failed to remove model.");
            }
        } else {
            println!("Cancelled.");
        }
    } else {
        println!("Model with ID {id} not found in the catalog.");
    }

    Ok(())
}
