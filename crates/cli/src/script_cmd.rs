use anyhow::Result;

use callsheet_api::{Script, ScriptCreateRequest, ScriptStatus, ScriptUpdateRequest};
use callsheet_api_client::ApiClient;

use crate::ScriptAction;

pub async fn run_scripts(client: &ApiClient, action: ScriptAction) -> Result<()> {
    match action {
        ScriptAction::List { search } => {
            let resp = client.scripts_list(search.as_deref()).await?;
            println!("{} scripts", resp.scripts.len());
            for script in &resp.scripts {
                print_script(script);
            }
        }
        ScriptAction::Add {
            title,
            scene,
            assigned_to,
            description,
        } => {
            let script = client
                .script_create(&ScriptCreateRequest {
                    title,
                    scene_number: scene,
                    assigned_to,
                    description,
                })
                .await?;
            println!("Added:");
            print_script(&script);
        }
        ScriptAction::Update {
            id,
            title,
            scene,
            assigned_to,
            status,
            description,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let script = client
                .script_update(
                    &id,
                    &ScriptUpdateRequest {
                        title,
                        scene_number: scene,
                        assigned_to,
                        status,
                        description,
                    },
                )
                .await?;
            println!("Updated:");
            print_script(&script);
        }
        ScriptAction::Remove { id } => {
            client.script_delete(&id).await?;
            println!("Removed {id}");
        }
    }
    Ok(())
}

fn parse_status(s: &str) -> Result<ScriptStatus> {
    ScriptStatus::parse(s).ok_or_else(|| {
        anyhow::anyhow!("unknown status: {s} (expected draft, in_review, needs_revisions, approved)")
    })
}

fn print_script(script: &Script) {
    println!(
        "  {}  {}  {}  assigned to {}  [{}]  updated {}",
        script.id,
        script.scene_number,
        script.title,
        script.assigned_to,
        script.status,
        script.updated_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
    );
}
