//! Schedule item query builders.

use chrono::SecondsFormat;
use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::ScheduleItems;
use super::Built;
use crate::ScheduledItem;

fn columns() -> [ScheduleItems; 7] {
    [
        ScheduleItems::Id,
        ScheduleItems::Title,
        ScheduleItems::Location,
        ScheduleItems::StartsAt,
        ScheduleItems::EndsAt,
        ScheduleItems::Priority,
        ScheduleItems::Participants,
    ]
}

/// INSERT one schedule item.
pub fn insert(item: &ScheduledItem) -> Built {
    Query::insert()
        .into_table(ScheduleItems::Table)
        .columns(columns())
        .values_panic([
            item.id.to_string().into(),
            item.title.clone().into(),
            item.location.clone().into(),
            item.starts_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .into(),
            item.ends_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .into(),
            item.priority.as_str().into(),
            item.participants.into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT all items in chronological order. Bucketing happens in core, on the
/// loaded rows.
pub fn list_ordered() -> Built {
    Query::select()
        .columns(columns())
        .from(ScheduleItems::Table)
        .order_by(ScheduleItems::StartsAt, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// DELETE one item.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(ScheduleItems::Table)
        .and_where(Expr::col(ScheduleItems::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// COUNT all items.
pub fn count() -> Built {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(ScheduleItems::Table)
        .build(SqliteQueryBuilder)
}
