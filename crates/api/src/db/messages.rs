//! Chat message query builders.

use sea_query::{Asterisk, Expr, Func, OnConflict, Order, Query, SqliteQueryBuilder};

use super::tables::Messages;
use super::Built;
use crate::ChatMessage;
use chrono::SecondsFormat;

fn columns() -> [Messages; 4] {
    [
        Messages::Id,
        Messages::Text,
        Messages::Sender,
        Messages::Timestamp,
    ]
}

/// INSERT one message. Conflicting ids are ignored so re-delivery of the same
/// row is harmless.
pub fn insert(msg: &ChatMessage) -> Built {
    Query::insert()
        .into_table(Messages::Table)
        .columns(columns())
        .values_panic([
            msg.id.to_string().into(),
            msg.text.clone().into(),
            msg.sender.as_str().into(),
            msg.timestamp
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .into(),
        ])
        .on_conflict(OnConflict::column(Messages::Id).do_nothing().to_owned())
        .build(SqliteQueryBuilder)
}

/// SELECT the full history ordered by timestamp ascending.
pub fn list_ordered() -> Built {
    Query::select()
        .columns(columns())
        .from(Messages::Table)
        .order_by(Messages::Timestamp, Order::Asc)
        .build(SqliteQueryBuilder)
}

/// COUNT all messages.
pub fn count() -> Built {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(Messages::Table)
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sender;

    #[test]
    fn insert_ignores_duplicate_ids() {
        let (sql, values) = insert(&ChatMessage::new(Sender::User, "hi"));
        assert!(sql.contains("ON CONFLICT"));
        assert!(sql.contains("DO NOTHING"));
        assert_eq!(values.0.len(), 4);
    }

    #[test]
    fn history_is_ordered_by_timestamp_ascending() {
        let (sql, _) = list_ordered();
        assert!(sql.contains("ORDER BY \"timestamp\" ASC"));
    }
}
