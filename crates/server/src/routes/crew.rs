use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use callsheet_api::{
    db, service, CrewCreateRequest, CrewListQuery, CrewListResponse, CrewMember, CrewStatus,
    CrewUpdateRequest, OkResponse,
};

use crate::error::ApiErr;
use crate::storage::{crew_from_row, sq_execute, sq_query_map, sq_query_row, Db};

/// GET /api/crew — roster, optionally filtered by `?status=`.
pub async fn list(
    State(db): State<Db>,
    Query(q): Query<CrewListQuery>,
) -> Result<Json<CrewListResponse>, ApiErr> {
    let status = match q.status.as_deref() {
        None => None,
        Some(raw) => Some(
            CrewStatus::parse(raw)
                .ok_or_else(|| ApiErr::bad_request(format!("unknown crew status: {raw}")))?,
        ),
    };

    let conn = db.conn();
    let members = sq_query_map(&conn, db::crew::list(status), crew_from_row)
        .map_err(ApiErr::from_db("list crew"))?;
    Ok(Json(CrewListResponse { members }))
}

/// POST /api/crew — add a member.
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<CrewCreateRequest>,
) -> Result<(StatusCode, Json<CrewMember>), ApiErr> {
    let name = service::validate_required("name", &req.name)?;
    let role = service::validate_required("role", &req.role)?;

    let mut member = CrewMember::new(name, role);
    member.notes = req.notes;

    let conn = db.conn();
    sq_execute(&conn, db::crew::insert(&member)).map_err(ApiErr::from_db("insert crew member"))?;
    Ok((StatusCode::CREATED, Json(member)))
}

/// PUT /api/crew/:id — partial update of a member.
pub async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(req): Json<CrewUpdateRequest>,
) -> Result<Json<CrewMember>, ApiErr> {
    let conn = db.conn();
    let mut member = sq_query_row(&conn, db::crew::get_by_id(&id), crew_from_row)
        .map_err(|_| ApiErr::not_found("crew member not found"))?;

    if let Some(name) = req.name {
        member.name = service::validate_required("name", &name)?;
    }
    if let Some(role) = req.role {
        member.role = service::validate_required("role", &role)?;
    }
    if let Some(status) = req.status {
        member.status = status;
    }
    if let Some(notes) = req.notes {
        member.notes = notes;
    }

    sq_execute(&conn, db::crew::update(&member)).map_err(ApiErr::from_db("update crew member"))?;
    Ok(Json(member))
}

/// DELETE /api/crew/:id — remove a member.
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected =
        sq_execute(&conn, db::crew::delete(&id)).map_err(ApiErr::from_db("delete crew member"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("crew member not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init_db_in_memory;

    #[tokio::test]
    async fn crud_cycle_add_update_filter_remove() {
        let db = init_db_in_memory().unwrap();

        let (status, Json(member)) = create(
            State(db.clone()),
            Json(CrewCreateRequest {
                name: "  Hager ".into(),
                role: "Scene Director".into(),
                notes: String::new(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(member.name, "Hager");

        let Json(updated) = update(
            State(db.clone()),
            Path(member.id.to_string()),
            Json(CrewUpdateRequest {
                status: Some(CrewStatus::OnLeave),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, CrewStatus::OnLeave);
        assert_eq!(updated.role, "Scene Director");

        let Json(on_leave) = list(
            State(db.clone()),
            Query(CrewListQuery {
                status: Some("on_leave".into()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(on_leave.members.len(), 1);

        delete(State(db.clone()), Path(member.id.to_string()))
            .await
            .unwrap();
        let Json(all) = list(State(db), Query(CrewListQuery::default()))
            .await
            .unwrap();
        assert!(all.members.is_empty());
    }

    #[tokio::test]
    async fn unknown_status_filter_is_a_bad_request() {
        let db = init_db_in_memory().unwrap();
        let result = list(
            State(db),
            Query(CrewListQuery {
                status: Some("retired".into()),
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn updating_a_missing_member_is_not_found() {
        let db = init_db_in_memory().unwrap();
        let result = update(
            State(db),
            Path(uuid::Uuid::new_v4().to_string()),
            Json(CrewUpdateRequest::default()),
        )
        .await;
        assert!(result.is_err());
    }
}
