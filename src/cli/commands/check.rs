//! Storage diagnostic command handler

use crate::api::system::diagnose;
use crate::config::Config;
use crate::db::Store;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(config.database.clone());
    let report = diagnose(&store).await;
    store.close().await;

    println!("Storage diagnostics");
    println!("{:-<50}", "");
    println!("database_url:      {}", report.database_url);
    println!("database_name:     {}", report.database_name);
    println!("database:          {}", report.database);
    println!("connection_status: {}", report.connection_status);
    if !report.collections.is_empty() {
        println!("collections:       {}", report.collections.join(", "));
    }
    println!(
        "email:             {}",
        if config.email.is_configured() {
            "configured"
        } else {
            "disabled"
        }
    );

    if report.connection_status != "Connected" {
        anyhow::bail!("storage is not reachable");
    }
    Ok(())
}
