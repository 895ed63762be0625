use axum::{extract::State, http::StatusCode, Json};

use callsheet_api::{
    db, service, RenderListResponse, SceneRender, VisualizeRequest, VisualizeResponse,
};

use crate::assistant::AssistantError;
use crate::error::ApiErr;
use crate::storage::{render_from_row, sq_execute, sq_query_map, Db};
use crate::AppState;

/// POST /api/scenes/visualize — compose the prompt, generate an image, and
/// persist the render.
pub async fn visualize(
    State(state): State<AppState>,
    Json(req): Json<VisualizeRequest>,
) -> Result<(StatusCode, Json<VisualizeResponse>), ApiErr> {
    let mut prompt = req.into_prompt();
    prompt.description = service::validate_description(&prompt.description)?;

    let image_url = state
        .assistant
        .generate_image(&prompt.compose())
        .await
        .map_err(|e| match e {
            AssistantError::Upstream { .. } => ApiErr::bad_gateway(e.to_string()),
            other => {
                tracing::error!("image generation failed: {other}");
                ApiErr::bad_gateway("image generation failed")
            }
        })?;

    let render = SceneRender::new(prompt, image_url);
    let conn = state.db.conn();
    sq_execute(&conn, db::renders::insert(&render)).map_err(ApiErr::from_db("insert render"))?;
    Ok((StatusCode::CREATED, Json(VisualizeResponse { render })))
}

/// GET /api/scenes/renders — most recent first.
pub async fn renders(State(db): State<Db>) -> Result<Json<RenderListResponse>, ApiErr> {
    let conn = db.conn();
    let renders = sq_query_map(&conn, db::renders::list_recent(), render_from_row)
        .map_err(ApiErr::from_db("list renders"))?;
    Ok(Json(RenderListResponse { renders }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{AssistantClient, AssistantConfig};
    use crate::events::EventBus;
    use crate::storage::init_db_in_memory;
    use callsheet_api::{Lighting, Mood, Style};

    fn test_state() -> AppState {
        let config = AssistantConfig {
            api_key: None,
            api_base: "http://unused".into(),
            chat_model: "unused".into(),
            image_model: "unused".into(),
        };
        AppState {
            db: init_db_in_memory().unwrap(),
            events: EventBus::default(),
            assistant: AssistantClient::new(config, callsheet_core::sample::production_board())
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn visualize_persists_the_render() {
        let state = test_state();
        let req = VisualizeRequest {
            description: "An old market at dusk, crowded with extras".into(),
            style: Style::Cinematic,
            mood: Mood::Dramatic,
            lighting: Lighting::GoldenHour,
        };

        let (status, Json(resp)) = visualize(State(state.clone()), Json(req)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resp.render.prompt.style, Style::Cinematic);
        assert!(!resp.render.image_url.is_empty());

        let Json(listed) = renders(State(state.db)).await.unwrap();
        assert_eq!(listed.renders.len(), 1);
        assert_eq!(listed.renders[0].id, resp.render.id);
    }

    #[tokio::test]
    async fn blank_description_is_rejected() {
        let state = test_state();
        let req = VisualizeRequest {
            description: "  ".into(),
            style: Style::default(),
            mood: Mood::default(),
            lighting: Lighting::default(),
        };
        assert!(visualize(State(state.clone()), Json(req)).await.is_err());

        let Json(listed) = renders(State(state.db)).await.unwrap();
        assert!(listed.renders.is_empty());
    }
}
