use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use clap::Args;
use minijinja::Environment;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file; `.html` and `.xml` templates are auto-escaped
    pub template: PathBuf,
    /// JSON object used as the template context
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Write the result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn render_template(ctx: &Context<'_>, args: RenderArgs) -> Result<()> {
    if !args.template.exists() {
        return Err(not_found(format!(
            "template {}",
            args.template.display()
        )));
    }
    let source = fs::read_to_string(&args.template)
        .with_context(|| format!("read template {}", args.template.display()))?;
    let name = args
        .template
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("template")
        .to_string();
    let data = load_data(args.data.as_ref())?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    gravatar_core::register(&mut env, ctx.resolver.clone());
    env.add_template(&name, &source)
        .with_context(|| format!("parse template {}", args.template.display()))?;
    let rendered = env
        .get_template(&name)
        .and_then(|template| template.render(&data))
        .with_context(|| format!("render template {}", args.template.display()))?;
    debug!(template = %name, bytes = rendered.len(), "template rendered");

    if let Some(output) = args.output.as_ref() {
        fs::write(output, &rendered)
            .with_context(|| format!("write {}", output.display()))?;
    }

    if ctx.json {
        print_json(&serde_json::json!({
            "template": args.template.display().to_string(),
            "output": args.output.as_ref().map(|path| path.display().to_string()),
            "rendered": rendered,
        }))?;
    } else if args.output.is_none() {
        print!("{rendered}");
    }
    Ok(())
}

fn load_data(path: Option<&PathBuf>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Default::default()));
    };
    if !path.exists() {
        return Err(not_found(format!("data file {}", path.display())));
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("read data file {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse data file {}", path.display()))?;
    if !value.is_object() {
        return Err(invalid_input(format!(
            "data file {} must contain a JSON object",
            path.display()
        )));
    }
    Ok(value)
}
