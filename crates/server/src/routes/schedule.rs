use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use callsheet_api::{
    db, service, DayBucket, OkResponse, ScheduleBucketResponse, ScheduleItemCreateRequest,
    ScheduleQuery, ScheduleResponse, ScheduledItem,
};
use callsheet_core::schedule;

use crate::error::ApiErr;
use crate::storage::{schedule_item_from_row, sq_execute, sq_query_map, Db};

fn load_items(db: &Db) -> Result<Vec<ScheduledItem>, ApiErr> {
    let conn = db.conn();
    sq_query_map(&conn, db::schedule::list_ordered(), schedule_item_from_row)
        .map_err(ApiErr::from_db("list schedule items"))
}

/// GET /api/schedule — grouped current/upcoming view, or a single bucket when
/// `?bucket=today|tomorrow|week` is given. Bucketing is relative to now.
pub async fn list(State(db): State<Db>, Query(q): Query<ScheduleQuery>) -> Result<Response, ApiErr> {
    let items = load_items(&db)?;
    let now = Utc::now();

    match q.bucket.as_deref() {
        None => {
            let (current, upcoming) = schedule::partition(&items, now);
            Ok(Json(ScheduleResponse { current, upcoming }).into_response())
        }
        Some(raw) => {
            let bucket = DayBucket::parse(raw)
                .ok_or_else(|| ApiErr::bad_request(format!("unknown bucket: {raw}")))?;
            let items = schedule::filter_bucket(&items, bucket, now);
            Ok(Json(ScheduleBucketResponse { bucket, items }).into_response())
        }
    }
}

/// POST /api/schedule — add one item.
pub async fn create(
    State(db): State<Db>,
    Json(req): Json<ScheduleItemCreateRequest>,
) -> Result<(StatusCode, Json<ScheduledItem>), ApiErr> {
    let title = service::validate_required("title", &req.title)?;
    let location = service::validate_required("location", &req.location)?;

    let item = ScheduledItem::new(
        title,
        location,
        req.starts_at,
        req.ends_at,
        req.priority,
        req.participants,
    )
    .map_err(|e| ApiErr::bad_request(e.to_string()))?;

    let conn = db.conn();
    sq_execute(&conn, db::schedule::insert(&item))
        .map_err(ApiErr::from_db("insert schedule item"))?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/schedule/:id — remove one item.
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();
    let affected =
        sq_execute(&conn, db::schedule::delete(&id)).map_err(ApiErr::from_db("delete item"))?;
    if affected == 0 {
        return Err(ApiErr::not_found("schedule item not found"));
    }
    Ok(Json(OkResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::init_db_in_memory;
    use callsheet_api::Priority;
    use chrono::Duration;

    #[test]
    fn create_request_validation_rejects_inverted_interval() {
        let now = Utc::now();
        let err = ScheduledItem::new("x", "y", now, now - Duration::hours(1), Priority::Normal, 1)
            .unwrap_err();
        assert_eq!(err.to_string(), "item ends before it starts");
    }

    #[tokio::test]
    async fn bucket_listing_rejects_unknown_buckets() {
        let db = init_db_in_memory().unwrap();
        let result = list(
            State(db),
            Query(ScheduleQuery {
                bucket: Some("fortnight".into()),
            }),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn created_items_show_up_in_their_bucket() {
        use chrono::TimeZone;
        let db = init_db_in_memory().unwrap();
        // Fixed reference so the bucket assertion cannot straddle midnight.
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        let req = ScheduleItemCreateRequest {
            title: "Final Scene Filming".into(),
            location: "Dubai Marina".into(),
            starts_at: now + Duration::hours(1),
            ends_at: now + Duration::hours(6),
            priority: Priority::High,
            participants: 15,
        };
        let (status, Json(item)) = create(State(db.clone()), Json(req)).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let items = load_items(&db).unwrap();
        assert_eq!(items, vec![item]);
        let todays = schedule::filter_bucket(&items, DayBucket::Today, now);
        assert_eq!(todays.len(), 1);
    }
}
