//! Column identifiers for all tables, checked at compile time.

use sea_query::Iden;

#[derive(Iden)]
pub enum Messages {
    Table,
    Id,
    Text,
    Sender,
    Timestamp,
}

#[derive(Iden)]
pub enum ScheduleItems {
    Table,
    Id,
    Title,
    Location,
    StartsAt,
    EndsAt,
    Priority,
    Participants,
}

#[derive(Iden)]
pub enum CrewMembers {
    Table,
    Id,
    Name,
    Role,
    Status,
    Notes,
}

#[derive(Iden)]
pub enum Scripts {
    Table,
    Id,
    Title,
    SceneNumber,
    AssignedTo,
    Status,
    Description,
    UpdatedAt,
}

#[derive(Iden)]
pub enum SceneRenders {
    Table,
    Id,
    Description,
    Style,
    Mood,
    Lighting,
    ImageUrl,
    CreatedAt,
}
