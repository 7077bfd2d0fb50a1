//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { base_url, force } => init_config(base_url, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("timeout_ms", &ctx.config.api.timeout_ms.to_string());
    ctx.output.kv("page_size", &ctx.config.api.page_size.to_string());

    ctx.output.info("[images]");
    if !ctx.config.images.base_url.is_empty() {
        ctx.output.kv("base_url", &ctx.config.images.base_url);
    }
    ctx.output.kv("placeholder", &ctx.config.images.placeholder);

    ctx.output.info("[search]");
    ctx.output
        .kv("suggestions", &ctx.config.search.suggestions.join(", "));

    ctx.output.info("[storage]");
    ctx.output
        .kv("dir", &ctx.storage_dir().display().to_string());

    Ok(())
}

fn init_config(base_url: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("lustre.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let base_url = base_url.unwrap_or_else(|| ctx.config.api.base_url.clone());
    fs::write(&config_path, generate_default_config(&base_url))
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
