use anyhow::Result;

use callsheet_api::ScheduledItem;
use callsheet_api_client::ApiClient;

pub async fn run_schedule(client: &ApiClient, bucket: Option<&str>) -> Result<()> {
    match bucket {
        Some(bucket) => {
            let resp = client.schedule_bucket(bucket).await?;
            println!("{} ({} items)", heading(&resp.bucket.to_string()), resp.items.len());
            for item in &resp.items {
                print_item(item);
            }
        }
        None => {
            let resp = client.schedule().await?;
            println!("Today ({} items)", resp.current.len());
            for item in &resp.current {
                print_item(item);
            }
            println!();
            println!("Upcoming ({} items)", resp.upcoming.len());
            for item in &resp.upcoming {
                print_item(item);
            }
        }
    }
    Ok(())
}

fn heading(bucket: &str) -> String {
    let mut s = bucket.to_string();
    if let Some(first) = s.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    s
}

fn print_item(item: &ScheduledItem) {
    let start = item.starts_at.with_timezone(&chrono::Local);
    let end = item.ends_at.with_timezone(&chrono::Local);
    println!(
        "  {}  {} - {}  {}  @ {}  [{}] {} participants",
        item.id,
        start.format("%Y-%m-%d %H:%M"),
        end.format("%H:%M"),
        item.title,
        item.location,
        item.priority,
        item.participants,
    );
}
