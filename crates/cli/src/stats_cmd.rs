use anyhow::Result;

use callsheet_api_client::ApiClient;

pub async fn run_stats(client: &ApiClient) -> Result<()> {
    let stats = client.stats().await?;
    println!("Chat messages:   {}", stats.messages);
    println!(
        "Schedule items:  {} ({} today)",
        stats.schedule_items, stats.schedule_today
    );
    println!(
        "Crew:            {} ({} active)",
        stats.crew_total, stats.crew_active
    );
    println!(
        "Scripts:         {} ({} approved)",
        stats.scripts_total, stats.scripts_approved
    );
    println!("Scene renders:   {}", stats.renders);
    Ok(())
}
