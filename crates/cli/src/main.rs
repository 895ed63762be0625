mod chat_cmd;
mod config;
mod crew_cmd;
mod schedule_cmd;
mod script_cmd;
mod stats_cmd;
mod visualize_cmd;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use callsheet_api_client::ApiClient;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "callsheet", about = "callsheet CLI - production dashboard from the terminal")]
struct Cli {
    /// Server URL (overrides the configured one)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the production assistant
    Chat,

    /// List scheduled items, grouped or for one bucket
    Schedule {
        /// Restrict to one bucket: today, tomorrow, or week
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Manage the crew roster
    Crew {
        #[command(subcommand)]
        action: CrewAction,
    },

    /// Manage scripts
    Scripts {
        #[command(subcommand)]
        action: ScriptAction,
    },

    /// Generate a scene visualization
    Visualize {
        /// Scene description
        description: String,

        /// Visual style: cinematic, documentary, artistic, realistic
        #[arg(long, default_value = "cinematic")]
        style: String,

        /// Mood: dramatic, suspenseful, peaceful, tense
        #[arg(long, default_value = "dramatic")]
        mood: String,

        /// Lighting: golden-hour, low-key, high-key, natural
        #[arg(long, default_value = "golden-hour")]
        lighting: String,
    },

    /// Show dashboard counters
    Stats,

    /// Show or set configuration
    Config {
        /// Set the server URL
        #[arg(long)]
        server: Option<String>,
    },
}

#[derive(Subcommand)]
enum CrewAction {
    /// List crew members
    List {
        /// Filter by status: active, on_leave, wrapped
        #[arg(long)]
        status: Option<String>,
    },
    /// Add a crew member
    Add {
        name: String,
        role: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Update a crew member
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// New status: active, on_leave, wrapped
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a crew member
    Remove { id: String },
}

#[derive(Subcommand)]
enum ScriptAction {
    /// List scripts, optionally filtered by free-text search
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a script
    Add {
        title: String,
        #[arg(long)]
        scene: String,
        #[arg(long)]
        assigned_to: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update a script
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        scene: Option<String>,
        #[arg(long)]
        assigned_to: Option<String>,
        /// New status: draft, in_review, needs_revisions, approved
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Remove a script
    Remove { id: String },
}

fn build_client(server_override: Option<String>) -> Result<Arc<ApiClient>> {
    let base_url = match server_override {
        Some(url) => url,
        None => config::load_config()?.server.url,
    };
    Ok(Arc::new(ApiClient::new(&base_url, REQUEST_TIMEOUT)?))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Config { server } => {
            if server.is_none() {
                config::show_config()
            } else {
                config::set_config(server)
            }
        }
        command => match build_client(cli.server) {
            Err(e) => Err(e),
            Ok(client) => match command {
                Commands::Chat => chat_cmd::run_chat(client).await,
                Commands::Schedule { bucket } => {
                    schedule_cmd::run_schedule(&client, bucket.as_deref()).await
                }
                Commands::Crew { action } => crew_cmd::run_crew(&client, action).await,
                Commands::Scripts { action } => script_cmd::run_scripts(&client, action).await,
                Commands::Visualize {
                    description,
                    style,
                    mood,
                    lighting,
                } => visualize_cmd::run_visualize(&client, &description, &style, &mood, &lighting)
                    .await,
                Commands::Stats => stats_cmd::run_stats(&client).await,
                Commands::Config { .. } => unreachable!("handled above"),
            },
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
