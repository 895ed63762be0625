//! Script tracking query builders.

use chrono::SecondsFormat;
use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::Scripts;
use super::Built;
use crate::{Script, ScriptStatus};

fn columns() -> [Scripts; 7] {
    [
        Scripts::Id,
        Scripts::Title,
        Scripts::SceneNumber,
        Scripts::AssignedTo,
        Scripts::Status,
        Scripts::Description,
        Scripts::UpdatedAt,
    ]
}

/// INSERT one script.
pub fn insert(script: &Script) -> Built {
    Query::insert()
        .into_table(Scripts::Table)
        .columns(columns())
        .values_panic([
            script.id.to_string().into(),
            script.title.clone().into(),
            script.scene_number.clone().into(),
            script.assigned_to.clone().into(),
            script.status.as_str().into(),
            script.description.clone().into(),
            script
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT all scripts, most recently updated first. Free-text search runs in
/// Rust over the loaded rows, matching the original's client-side filter.
pub fn list_recent() -> Built {
    Query::select()
        .columns(columns())
        .from(Scripts::Table)
        .order_by(Scripts::UpdatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// SELECT one script by id.
pub fn get_by_id(id: &str) -> Built {
    Query::select()
        .columns(columns())
        .from(Scripts::Table)
        .and_where(Expr::col(Scripts::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// UPDATE every mutable column from the given record.
pub fn update(script: &Script) -> Built {
    Query::update()
        .table(Scripts::Table)
        .values([
            (Scripts::Title, script.title.clone().into()),
            (Scripts::SceneNumber, script.scene_number.clone().into()),
            (Scripts::AssignedTo, script.assigned_to.clone().into()),
            (Scripts::Status, script.status.as_str().into()),
            (Scripts::Description, script.description.clone().into()),
            (
                Scripts::UpdatedAt,
                script
                    .updated_at
                    .to_rfc3339_opts(SecondsFormat::Nanos, true)
                    .into(),
            ),
        ])
        .and_where(Expr::col(Scripts::Id).eq(script.id.to_string()))
        .build(SqliteQueryBuilder)
}

/// DELETE one script.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(Scripts::Table)
        .and_where(Expr::col(Scripts::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// COUNT scripts, optionally by status.
pub fn count(status: Option<ScriptStatus>) -> Built {
    let mut q = Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(Scripts::Table)
        .to_owned();
    if let Some(status) = status {
        q.and_where(Expr::col(Scripts::Status).eq(status.as_str()));
    }
    q.build(SqliteQueryBuilder)
}
