use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use callsheet_api::{
    db, service, OkResponse, Script, ScriptCreateRequest, ScriptListQuery, ScriptListResponse,
    ScriptUpdateRequest,
};

use crate::error::ApiErr;
use crate::storage::{script_from_row, sq_execute, sq_query_map, sq_query_row, Db};

/// GET /api/scripts — most recently updated first, with optional `?search=`
/// over title, scene number, and assignee.
pub async fn list(
    State(db): State<Db>,
    Query(q): Query<ScriptListQuery>,
) -> Result<Json<ScriptListResponse>, ApiErr> {
    let conn = db.conn();
    let mut scripts = sq_query_map(&conn, db::scripts::list_recent(), script_from_row)
        .map_err(ApiErr::from_db("list scripts"))?;

    if let Some(query) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        scripts.retain(|s| s.matches(query));
    }
    Ok(Json(ScriptListResponse { scripts }))
}

/// POST /api/scripts — create a script in Draft.
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<ScriptCreateRequest>,
) -> Result<(StatusCode, Json<Script>), ApiErr> {
    let title = service::validate_required("title", &req.title)?;
    let scene_number = service::validate_required("scene_number", &req.scene_number)?;
    let assigned_to = service::validate_required("assigned_to", &req.assigned_to)?;

    let mut script = Script::new(title, scene_number, assigned_to);
    script.description = req.description;

    let conn = db.conn();
    sq_execute(&conn, db::scripts::insert(&script)).map_err(ApiErr::from_db("insert script"))?;
    Ok((StatusCode::CREATED, Json(script)))
}

/// PUT /api/scripts/:id — partial update; bumps `updated_at`.
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<ScriptUpdateRequest>,
) -> Result<Json<Script>, ApiErr> {
    let conn = db.conn();
    let mut script = sq_query_row(&conn, db::scripts::get_by_id(&id), script_from_row)
        .map_err(|_| ApiErr::not_found("script not found"))?;

    if let Some(title) = req.title {
        script.title = service::validate_required("title", &title)?;
    }
    if let Some(scene_number) = req.scene_number {
        script.scene_number = service::validate_required("scene_number", &scene_number)?;
    }
    if let Some(assigned_to) = req.assigned_to {
        script.assigned_to = service::validate_required("assigned_to", &assigned_to)?;
    }
    if let Some(status) = req.status {
        script.status = status;
    }
    if let Some(description) = req.description {
        script.description = description;
    }
    script.updated_at = Utc::now();

    sq_execute(&conn, db::scripts::update(&script)).map_err(ApiErr::from_db("update script"))?;
    Ok(Json(script))
}

/// DELETE /api/scripts/:id — remove a script.
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected =
        sq_execute(&conn, db::scripts::delete(&id)).map_err(ApiErr::from_db("delete script"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("script not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init_db_in_memory;
    use callsheet_api::ScriptStatus;

    async fn add(db: &Db, title: &str, scene: &str, who: &str) -> Script {
        let (_, Json(script)) = create(
            State(db.clone()),
            Json(ScriptCreateRequest {
                title: title.into(),
                scene_number: scene.into(),
                assigned_to: who.into(),
                description: String::new(),
            }),
        )
        .await
        .unwrap();
        script
    }

    #[tokio::test]
    async fn search_filters_by_title_scene_and_assignee() {
        let db = init_db_in_memory().unwrap();
        add(&db, "Desert Chase Scene", "Scene 12", "Ahmed Al-Farsi").await;
        add(&db, "Market Conversation", "Scene 15", "Layla Hassan").await;

        let Json(by_title) = list(
            State(db.clone()),
            Query(ScriptListQuery {
                search: Some("desert".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(by_title.scripts.len(), 1);

        let Json(by_assignee) = list(
            State(db.clone()),
            Query(ScriptListQuery {
                search: Some("layla".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(by_assignee.scripts.len(), 1);
        assert_eq!(by_assignee.scripts[0].scene_number, "Scene 15");

        let Json(all) = list(State(db), Query(ScriptListQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.scripts.len(), 2);
    }

    #[tokio::test]
    async fn update_moves_status_and_bumps_updated_at() {
        let db = init_db_in_memory().unwrap();
        let script = add(&db, "Palace Interior", "Scene 8", "Malik Ibrahim").await;

        let Json(updated) = update(
            State(db.clone()),
            Path(script.id.to_string()),
            Json(ScriptUpdateRequest {
                status: Some(ScriptStatus::Approved),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, ScriptStatus::Approved);
        assert!(updated.updated_at >= script.updated_at);
    }

    #[tokio::test]
    async fn new_scripts_start_in_draft() {
        let db = init_db_in_memory().unwrap();
        let script = add(&db, "Final Confrontation", "Scene 24", "Sarah Al-Mansour").await;
        assert_eq!(script.status, ScriptStatus::Draft);
    }
}
