//! Recent enquiries command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_enquiries(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::connect(config.database.clone()).await?;
    let enquiries = store.recent_enquiries(limit.max(1)).await?;
    store.close().await;

    if enquiries.is_empty() {
        println!("No enquiries yet.");
        return Ok(());
    }

    println!("Recent Enquiries (last {}):", enquiries.len());
    println!("{:-<70}", "");

    for enquiry in enquiries {
        let company = enquiry.company.as_deref().unwrap_or("-");
        let service = enquiry.service.as_deref().unwrap_or("-");
        println!("• {} <{}> | {}", enquiry.name, enquiry.email, company);
        println!(
            "  {} | service: {} | consent: {}",
            enquiry.created_at.format("%Y-%m-%d %H:%M UTC"),
            service,
            enquiry.consent
        );
        println!("  id: {}", enquiry.id);
    }

    Ok(())
}
