//! Crew roster query builders.

use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::CrewMembers;
use super::Built;
use crate::{CrewMember, CrewStatus};

fn columns() -> [CrewMembers; 5] {
    [
        CrewMembers::Id,
        CrewMembers::Name,
        CrewMembers::Role,
        CrewMembers::Status,
        CrewMembers::Notes,
    ]
}

/// INSERT one crew member.
pub fn insert(member: &CrewMember) -> Built {
    Query::insert()
        .into_table(CrewMembers::Table)
        .columns(columns())
        .values_panic([
            member.id.to_string().into(),
            member.name.clone().into(),
            member.role.clone().into(),
            member.status.as_str().into(),
            member.notes.clone().into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT the roster, optionally filtered by status, ordered by name.
pub fn list(status: Option<CrewStatus>) -> Built {
    let mut q = Query::select()
        .columns(columns())
        .from(CrewMembers::Table)
        .order_by(CrewMembers::Name, Order::Asc)
        .to_owned();
    if let Some(status) = status {
        q.and_where(Expr::col(CrewMembers::Status).eq(status.as_str()));
    }
    q.build(SqliteQueryBuilder)
}

/// SELECT one member by id.
pub fn get_by_id(id: &str) -> Built {
    Query::select()
        .columns(columns())
        .from(CrewMembers::Table)
        .and_where(Expr::col(CrewMembers::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// UPDATE every mutable column from the given record.
pub fn update(member: &CrewMember) -> Built {
    Query::update()
        .table(CrewMembers::Table)
        .values([
            (CrewMembers::Name, member.name.clone().into()),
            (CrewMembers::Role, member.role.clone().into()),
            (CrewMembers::Status, member.status.as_str().into()),
            (CrewMembers::Notes, member.notes.clone().into()),
        ])
        .and_where(Expr::col(CrewMembers::Id).eq(member.id.to_string()))
        .build(SqliteQueryBuilder)
}

/// DELETE one member.
pub fn delete(id: &str) -> Built {
    Query::delete()
        .from_table(CrewMembers::Table)
        .and_where(Expr::col(CrewMembers::Id).eq(id))
        .build(SqliteQueryBuilder)
}

/// COUNT members, optionally by status.
pub fn count(status: Option<CrewStatus>) -> Built {
    let mut q = Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(CrewMembers::Table)
        .to_owned();
    if let Some(status) = status {
        q.and_where(Expr::col(CrewMembers::Status).eq(status.as_str()));
    }
    q.build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_is_applied_only_when_present() {
        let (all, _) = list(None);
        assert!(!all.contains("WHERE"));
        let (active, values) = list(Some(CrewStatus::Active));
        assert!(active.contains("WHERE"));
        assert_eq!(values.0.len(), 1);
    }

    #[test]
    fn update_touches_all_mutable_columns() {
        let member = CrewMember::new("Ahmad", "First Assistant Director");
        let (sql, values) = update(&member);
        for col in ["name", "role", "status", "notes"] {
            assert!(sql.contains(col), "missing column {col}");
        }
        // 4 SET values + id in WHERE
        assert_eq!(values.0.len(), 5);
    }
}
