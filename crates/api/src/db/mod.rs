//! Shared database schema, migrations, and query builders.
//!
//! Builders return `(sql, values)` pairs ready for the server's rusqlite
//! helpers, so the SQL stays compile-time checked in one place.

pub mod crew;
pub mod messages;
pub mod migrations;
pub mod renders;
pub mod schedule;
pub mod scripts;
pub mod tables;

pub use tables::*;

/// A built statement: SQL text plus bound values.
pub type Built = (String, sea_query::Values);
