use crate::catalog::CatalogStats;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let models = store.list_models().await?;
    let stats = CatalogStats::from_models(&models);

    println!("Catalog Statistics");
    println!("{:-<40}", "");
    println!("Total models: {}", stats.total);
    println!("LoRAs:        {}", stats.loras);
    println!("Checkpoints:  {}", stats.checkpoints);
    println!("Favorites:    {}", stats.favorites);

    Ok(())
}
