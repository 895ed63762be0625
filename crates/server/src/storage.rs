use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use callsheet_api::db::{self, Built};
use callsheet_api::{
    ChatMessage, CrewMember, CrewStatus, Priority, SceneRender, ScheduledItem, Script,
    ScriptStatus, Sender, VisualPrompt,
};

/// Shared database state
#[derive(Clone)]
pub struct Db {
    conn: Arc<Mutex<Connection>>,
}

impl Db {
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }
}

/// Initialize the database: open connection, enable WAL, run migrations
pub fn init_db(data_dir: &Path) -> Result<Db> {
    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("callsheet.db");
    let conn = Connection::open(&db_path).context("opening SQLite database")?;
    init_connection(conn)
}

/// In-memory database, used by tests.
#[cfg(test)]
pub fn init_db_in_memory() -> Result<Db> {
    let conn = Connection::open_in_memory().context("opening in-memory SQLite database")?;
    init_connection(conn)
}

fn init_connection(conn: Connection) -> Result<Db> {
    // WAL gives better concurrent read behaviour
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    run_migrations(&conn)?;

    Ok(Db {
        conn: Arc::new(Mutex::new(conn)),
    })
}

fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    for (name, sql) in db::migrations::MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !already_applied {
            conn.execute_batch(sql)
                .with_context(|| format!("running migration {name}"))?;
            conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [name])?;
            tracing::info!("Applied migration: {name}");
        }
    }

    Ok(())
}

// ── sea-query → rusqlite bridge ────────────────────────────────────────────

fn sq_value(value: &sea_query::Value) -> rusqlite::types::Value {
    use rusqlite::types::Value as Sql;
    use sea_query::Value as Sq;
    match value {
        Sq::Bool(v) => v.map(|b| Sql::Integer(b as i64)).unwrap_or(Sql::Null),
        Sq::TinyInt(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::SmallInt(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::Int(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::BigInt(v) => v.map(Sql::Integer).unwrap_or(Sql::Null),
        Sq::TinyUnsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::SmallUnsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::Unsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::BigUnsigned(v) => v.map(|n| Sql::Integer(n as i64)).unwrap_or(Sql::Null),
        Sq::Float(v) => v.map(|n| Sql::Real(n as f64)).unwrap_or(Sql::Null),
        Sq::Double(v) => v.map(Sql::Real).unwrap_or(Sql::Null),
        Sq::String(v) => v
            .as_ref()
            .map(|s| Sql::Text(s.as_ref().clone()))
            .unwrap_or(Sql::Null),
        Sq::Bytes(v) => v
            .as_ref()
            .map(|b| Sql::Blob(b.as_ref().clone()))
            .unwrap_or(Sql::Null),
        _ => Sql::Null,
    }
}

fn bound_params(values: &sea_query::Values) -> Vec<rusqlite::types::Value> {
    values.0.iter().map(sq_value).collect()
}

/// Execute a built statement, returning the affected row count.
pub fn sq_execute(conn: &Connection, (sql, values): Built) -> rusqlite::Result<usize> {
    conn.execute(&sql, rusqlite::params_from_iter(bound_params(&values)))
}

/// Run a built SELECT expected to yield exactly one row.
pub fn sq_query_row<T>(
    conn: &Connection,
    (sql, values): Built,
    f: impl FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<T> {
    conn.query_row(&sql, rusqlite::params_from_iter(bound_params(&values)), f)
}

/// Run a built SELECT, mapping every row.
pub fn sq_query_map<T>(
    conn: &Connection,
    (sql, values): Built,
    f: impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
) -> rusqlite::Result<Vec<T>> {
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(bound_params(&values)), f)?;
    rows.collect()
}

// ── Row mappers ────────────────────────────────────────────────────────────
// Column order must match the `columns()` lists in `callsheet_api::db`.

fn bad_text(idx: usize, what: &str, raw: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("invalid {what}: {raw}"),
        )),
    )
}

fn uuid_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<uuid::Uuid> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|_| bad_text(idx, "uuid", &raw))
}

fn ts_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| bad_text(idx, "timestamp", &raw))
}

pub fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChatMessage> {
    let sender_raw: String = row.get(2)?;
    Ok(ChatMessage {
        id: uuid_col(row, 0)?,
        text: row.get(1)?,
        sender: Sender::parse(&sender_raw).ok_or_else(|| bad_text(2, "sender", &sender_raw))?,
        timestamp: ts_col(row, 3)?,
    })
}

pub fn schedule_item_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScheduledItem> {
    let priority_raw: String = row.get(5)?;
    Ok(ScheduledItem {
        id: uuid_col(row, 0)?,
        title: row.get(1)?,
        location: row.get(2)?,
        starts_at: ts_col(row, 3)?,
        ends_at: ts_col(row, 4)?,
        priority: Priority::parse(&priority_raw)
            .ok_or_else(|| bad_text(5, "priority", &priority_raw))?,
        participants: row.get(6)?,
    })
}

pub fn crew_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CrewMember> {
    let status_raw: String = row.get(3)?;
    Ok(CrewMember {
        id: uuid_col(row, 0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        status: CrewStatus::parse(&status_raw)
            .ok_or_else(|| bad_text(3, "crew status", &status_raw))?,
        notes: row.get(4)?,
    })
}

pub fn script_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Script> {
    let status_raw: String = row.get(4)?;
    Ok(Script {
        id: uuid_col(row, 0)?,
        title: row.get(1)?,
        scene_number: row.get(2)?,
        assigned_to: row.get(3)?,
        status: ScriptStatus::parse(&status_raw)
            .ok_or_else(|| bad_text(4, "script status", &status_raw))?,
        description: row.get(5)?,
        updated_at: ts_col(row, 6)?,
    })
}

pub fn render_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SceneRender> {
    use callsheet_api::{Lighting, Mood, Style};
    let style_raw: String = row.get(2)?;
    let mood_raw: String = row.get(3)?;
    let lighting_raw: String = row.get(4)?;
    Ok(SceneRender {
        id: uuid_col(row, 0)?,
        prompt: VisualPrompt {
            description: row.get(1)?,
            style: Style::parse(&style_raw).ok_or_else(|| bad_text(2, "style", &style_raw))?,
            mood: Mood::parse(&mood_raw).ok_or_else(|| bad_text(3, "mood", &mood_raw))?,
            lighting: Lighting::parse(&lighting_raw)
                .ok_or_else(|| bad_text(4, "lighting", &lighting_raw))?,
        },
        image_url: row.get(5)?,
        created_at: ts_col(row, 6)?,
    })
}

// ── Seeding ────────────────────────────────────────────────────────────────

/// Insert the sample production datasets when the database is empty.
/// Idempotent across restarts.
pub fn seed_if_empty(db: &Db, now: DateTime<Utc>) -> Result<()> {
    use callsheet_core::sample;

    let conn = db.conn();
    let schedule_count: i64 = sq_query_row(&conn, db::schedule::count(), |row| row.get(0))?;
    let crew_count: i64 = sq_query_row(&conn, db::crew::count(None), |row| row.get(0))?;
    let script_count: i64 = sq_query_row(&conn, db::scripts::count(None), |row| row.get(0))?;
    if schedule_count + crew_count + script_count > 0 {
        return Ok(());
    }

    for item in sample::schedule_items(now) {
        sq_execute(&conn, db::schedule::insert(&item))?;
    }
    for member in sample::crew_members() {
        sq_execute(&conn, db::crew::insert(&member))?;
    }
    for script in sample::scripts(now) {
        sq_execute(&conn, db::scripts::insert(&script))?;
    }
    tracing::info!("seeded sample production data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use callsheet_api::Sender;

    #[test]
    fn messages_round_trip_and_stay_ordered() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();

        let first = ChatMessage::new(Sender::User, "Hi");
        let mut second = ChatMessage::new(Sender::Assistant, "Hello!");
        second.timestamp = first.timestamp + chrono::Duration::seconds(1);

        // Insert out of order; the listing must come back chronological.
        sq_execute(&conn, db::messages::insert(&second)).unwrap();
        sq_execute(&conn, db::messages::insert(&first)).unwrap();

        let rows = sq_query_map(&conn, db::messages::list_ordered(), message_from_row).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], first);
        assert_eq!(rows[1], second);
    }

    #[test]
    fn duplicate_message_insert_is_a_no_op() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();

        let msg = ChatMessage::new(Sender::User, "once");
        assert_eq!(sq_execute(&conn, db::messages::insert(&msg)).unwrap(), 1);
        assert_eq!(sq_execute(&conn, db::messages::insert(&msg)).unwrap(), 0);

        let rows = sq_query_map(&conn, db::messages::list_ordered(), message_from_row).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn seeding_is_idempotent() {
        let db = init_db_in_memory().unwrap();
        let now = Utc::now();
        seed_if_empty(&db, now).unwrap();
        seed_if_empty(&db, now).unwrap();

        let conn = db.conn();
        let schedule_count: i64 =
            sq_query_row(&conn, db::schedule::count(), |row| row.get(0)).unwrap();
        assert_eq!(schedule_count, 5);
        let crew_count: i64 = sq_query_row(&conn, db::crew::count(None), |row| row.get(0)).unwrap();
        assert_eq!(crew_count, 6);
    }

    #[test]
    fn crew_update_persists_every_field() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();

        let mut member = CrewMember::new("Ahmad", "Gaffer");
        sq_execute(&conn, db::crew::insert(&member)).unwrap();

        member.role = "First Assistant Director".into();
        member.status = CrewStatus::OnLeave;
        member.notes = "Back next week".into();
        sq_execute(&conn, db::crew::update(&member)).unwrap();

        let loaded = sq_query_row(
            &conn,
            db::crew::get_by_id(&member.id.to_string()),
            crew_from_row,
        )
        .unwrap();
        assert_eq!(loaded, member);
    }

    #[test]
    fn renders_keep_prompt_fields_alongside_the_url() {
        let db = init_db_in_memory().unwrap();
        let conn = db.conn();

        let render = SceneRender::new(
            VisualPrompt::new("old market at dusk"),
            "https://images.example/render-1.png",
        );
        sq_execute(&conn, db::renders::insert(&render)).unwrap();

        let rows = sq_query_map(&conn, db::renders::list_recent(), render_from_row).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], render);
    }
}
