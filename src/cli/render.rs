//! Render command.

use std::fs;

use anyhow::{Context, Result};
use serde::Serialize;

use super::args::{OutputFormat, RenderArgs};
use super::common::{bind, write_output};
use crate::config::HipConfig;
use crate::registry::Hip;
use crate::tag::Markup;
use crate::debug;

/// JSON shape of `render --format json`.
#[derive(Debug, Serialize)]
struct HeadTags {
    metas: Vec<Markup>,
    links: Vec<Markup>,
    scripts: Vec<Markup>,
}

impl HeadTags {
    fn collect(hip: &Hip) -> Result<Self> {
        Ok(Self {
            metas: hip.rendered_metas(),
            links: hip.rendered_links()?,
            scripts: hip.rendered_scripts()?,
        })
    }
}

/// Run the render command
pub fn run_render(args: &RenderArgs, config: &HipConfig) -> Result<()> {
    let output = render(args, config)?;
    write_output(&output, args.output.as_deref(), "render")
}

fn render(args: &RenderArgs, config: &HipConfig) -> Result<String> {
    let (app, hip) = bind(config)?;
    debug!("render"; "{} tags registered", hip.len());

    if let Some(template) = &args.template {
        let content = fs::read_to_string(template)
            .with_context(|| format!("failed to read template `{}`", template.display()))?;
        return Ok(app.render_template(&content)?);
    }

    Ok(match args.format {
        OutputFormat::Html => hip.render_head()?,
        OutputFormat::Json => {
            let tags = HeadTags::collect(&hip)?;
            if args.pretty {
                serde_json::to_string_pretty(&tags)?
            } else {
                serde_json::to_string(&tags)?
            }
        }
    })
}
