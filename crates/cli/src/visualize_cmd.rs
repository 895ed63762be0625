use anyhow::Result;

use callsheet_api::{Lighting, Mood, Style, VisualizeRequest};
use callsheet_api_client::ApiClient;

pub async fn run_visualize(
    client: &ApiClient,
    description: &str,
    style: &str,
    mood: &str,
    lighting: &str,
) -> Result<()> {
    let style = Style::parse(style).ok_or_else(|| {
        anyhow::anyhow!("unknown style: {style} (expected cinematic, documentary, artistic, realistic)")
    })?;
    let mood = Mood::parse(mood).ok_or_else(|| {
        anyhow::anyhow!("unknown mood: {mood} (expected dramatic, suspenseful, peaceful, tense)")
    })?;
    let lighting = Lighting::parse(lighting).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown lighting: {lighting} (expected golden-hour, low-key, high-key, natural)"
        )
    })?;

    let resp = client
        .visualize(&VisualizeRequest {
            description: description.to_string(),
            style,
            mood,
            lighting,
        })
        .await?;

    println!("Prompt: {}", resp.render.prompt.compose());
    println!("Image:  {}", resp.render.image_url);
    Ok(())
}
