use anyhow::Result;

use callsheet_api::{CrewCreateRequest, CrewMember, CrewStatus, CrewUpdateRequest};
use callsheet_api_client::ApiClient;

use crate::CrewAction;

pub async fn run_crew(client: &ApiClient, action: CrewAction) -> Result<()> {
    match action {
        CrewAction::List { status } => {
            let resp = client.crew_list(status.as_deref()).await?;
            println!("{} crew members", resp.members.len());
            for member in &resp.members {
                print_member(member);
            }
        }
        CrewAction::Add { name, role, notes } => {
            let member = client
                .crew_create(&CrewCreateRequest { name, role, notes })
                .await?;
            println!("Added:");
            print_member(&member);
        }
        CrewAction::Update {
            id,
            name,
            role,
            status,
            notes,
        } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let member = client
                .crew_update(
                    &id,
                    &CrewUpdateRequest {
                        name,
                        role,
                        status,
                        notes,
                    },
                )
                .await?;
            println!("Updated:");
            print_member(&member);
        }
        CrewAction::Remove { id } => {
            client.crew_delete(&id).await?;
            println!("Removed {id}");
        }
    }
    Ok(())
}

fn parse_status(s: &str) -> Result<CrewStatus> {
    CrewStatus::parse(s)
        .ok_or_else(|| anyhow::anyhow!("unknown status: {s} (expected active, on_leave, wrapped)"))
}

fn print_member(member: &CrewMember) {
    let notes = if member.notes.is_empty() {
        String::new()
    } else {
        format!("  ({})", member.notes)
    };
    println!(
        "  {}  {}  {}  [{}]{notes}",
        member.id, member.name, member.role, member.status
    );
}
