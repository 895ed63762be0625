mod assistant;
mod error;
mod events;
mod routes;
mod storage;

use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use assistant::{AssistantClient, AssistantConfig};
use callsheet_core::sample;
use events::EventBus;
use storage::Db;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub events: EventBus,
    pub assistant: AssistantClient,
}

impl FromRef<AppState> for Db {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for EventBus {
    fn from_ref(state: &AppState) -> Self {
        state.events.clone()
    }
}

impl FromRef<AppState> for AssistantClient {
    fn from_ref(state: &AppState) -> Self {
        state.assistant.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "callsheet_server=info,tower_http=info".into()),
        )
        .init();

    // Data directory
    let data_dir = std::env::var("CALLSHEET_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));

    tracing::info!("data directory: {}", data_dir.display());

    let db = storage::init_db(&data_dir)?;
    tracing::info!("database initialized");

    // Seed the demo production dataset unless disabled.
    let seed = std::env::var("CALLSHEET_SEED_DATA")
        .map(|v| v != "0" && v != "false")
        .unwrap_or(true);
    if seed {
        storage::seed_if_empty(&db, chrono::Utc::now())?;
    }

    let config = AssistantConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set — assistant replies come from the scripted board");
    }
    let assistant = AssistantClient::new(config, sample::production_board())?;

    let state = AppState {
        db,
        events: EventBus::default(),
        assistant,
    };

    // Build API routes
    let api = Router::new()
        // Health
        .route("/health", get(routes::health::health))
        // Chat
        .route("/chat/messages", get(routes::chat::history))
        .route("/chat/send", post(routes::chat::send))
        .route("/chat/stream", get(routes::chat::stream))
        // Schedule
        .route("/schedule", get(routes::schedule::list))
        .route("/schedule", post(routes::schedule::create))
        .route("/schedule/{id}", delete(routes::schedule::delete))
        // Crew
        .route("/crew", get(routes::crew::list))
        .route("/crew", post(routes::crew::create))
        .route("/crew/{id}", put(routes::crew::update))
        .route("/crew/{id}", delete(routes::crew::delete))
        // Scripts
        .route("/scripts", get(routes::scripts::list))
        .route("/scripts", post(routes::scripts::create))
        .route("/scripts/{id}", put(routes::scripts::update))
        .route("/scripts/{id}", delete(routes::scripts::delete))
        // Scene visualization
        .route("/scenes/visualize", post(routes::scenes::visualize))
        .route("/scenes/renders", get(routes::scenes::renders))
        // Dashboard
        .route("/stats", get(routes::stats::stats));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    tracing::info!("listening on 0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
