//! Render-views command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use ta_core::config::split_list;
use ta_sql::{generate_views, inspect_view, view_catalog, GeneratedView, ViewShape};

use crate::cli::{RenderOutput, RenderViewsArgs};

#[derive(Serialize)]
struct RenderedView {
    #[serde(flatten)]
    view: GeneratedView,
    shape: ViewShape,
}

/// Execute the render-views command
pub fn execute(args: &RenderViewsArgs) -> Result<()> {
    let tags = split_list(args.tags.as_deref().unwrap_or_default());
    let views = generate_views(&view_catalog(), &tags, args.tags_table_present);

    let mut rendered = Vec::with_capacity(views.len());
    for view in views {
        let shape = inspect_view(&view.sql)
            .with_context(|| format!("Rendered view {} does not parse", view.query_id))?;
        rendered.push(RenderedView { view, shape });
    }

    match args.output {
        RenderOutput::Sql => {
            for r in &rendered {
                println!("-- {}\n{};\n", r.view.query_id, r.view.sql);
            }
        }
        RenderOutput::Json => println!("{}", serde_json::to_string_pretty(&rendered)?),
    }
    Ok(())
}
