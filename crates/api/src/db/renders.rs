//! Scene render query builders.

use chrono::SecondsFormat;
use sea_query::{Asterisk, Expr, Func, Order, Query, SqliteQueryBuilder};

use super::tables::SceneRenders;
use super::Built;
use crate::SceneRender;

fn columns() -> [SceneRenders; 7] {
    [
        SceneRenders::Id,
        SceneRenders::Description,
        SceneRenders::Style,
        SceneRenders::Mood,
        SceneRenders::Lighting,
        SceneRenders::ImageUrl,
        SceneRenders::CreatedAt,
    ]
}

/// INSERT one render, prompt fields alongside the resulting URL.
pub fn insert(render: &SceneRender) -> Built {
    Query::insert()
        .into_table(SceneRenders::Table)
        .columns(columns())
        .values_panic([
            render.id.to_string().into(),
            render.prompt.description.clone().into(),
            render.prompt.style.as_str().into(),
            render.prompt.mood.as_str().into(),
            render.prompt.lighting.as_str().into(),
            render.image_url.clone().into(),
            render
                .created_at
                .to_rfc3339_opts(SecondsFormat::Nanos, true)
                .into(),
        ])
        .build(SqliteQueryBuilder)
}

/// SELECT render history, newest first.
pub fn list_recent() -> Built {
    Query::select()
        .columns(columns())
        .from(SceneRenders::Table)
        .order_by(SceneRenders::CreatedAt, Order::Desc)
        .build(SqliteQueryBuilder)
}

/// COUNT all renders.
pub fn count() -> Built {
    Query::select()
        .expr(Func::count(Expr::col(Asterisk)))
        .from(SceneRenders::Table)
        .build(SqliteQueryBuilder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisualPrompt;

    #[test]
    fn insert_binds_prompt_fields_and_url() {
        let render = SceneRender::new(VisualPrompt::new("market at dusk"), "https://img/1.png");
        let (_, values) = insert(&render);
        assert_eq!(values.0.len(), 7);
    }
}
