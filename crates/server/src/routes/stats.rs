use axum::{extract::State, Json};
use chrono::Utc;

use callsheet_api::{db, CrewStatus, ScriptStatus, StatsResponse};
use callsheet_core::schedule;

use crate::error::ApiErr;
use crate::storage::{schedule_item_from_row, sq_query_map, sq_query_row, Db};

/// GET /api/stats — dashboard counters in one round trip.
pub async fn stats(State(db): State<Db>) -> Result<Json<StatsResponse>, ApiErr> {
    let conn = db.conn();
    let count = |built| {
        sq_query_row(&conn, built, |row| row.get::<_, i64>(0))
            .map_err(ApiErr::from_db("load stats"))
    };

    let items = sq_query_map(&conn, db::schedule::list_ordered(), schedule_item_from_row)
        .map_err(ApiErr::from_db("list schedule items"))?;
    let now = Utc::now();
    let schedule_today = items
        .iter()
        .filter(|i| schedule::is_today(i.starts_at, now))
        .count() as i64;

    Ok(Json(StatsResponse {
        messages: count(db::messages::count())?,
        schedule_items: items.len() as i64,
        schedule_today,
        crew_total: count(db::crew::count(None))?,
        crew_active: count(db::crew::count(Some(CrewStatus::Active)))?,
        scripts_total: count(db::scripts::count(None))?,
        scripts_approved: count(db::scripts::count(Some(ScriptStatus::Approved)))?,
        renders: count(db::renders::count())?,
    }))
}
