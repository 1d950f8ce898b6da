mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, digest, render, resolve, Context};
use crate::error::{exit_code_for, report_error};
use crate::util::digest_source_override;
use gravatar_config as config;

#[derive(Debug, Parser)]
#[command(name = "gravatar", version, about = "Email address to avatar URL")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Embed a fixed digest in every URL (the legacy placeholder when no value is given)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        value_name = "DIGEST",
        conflicts_with = "computed"
    )]
    pinned: Option<Option<String>>,
    /// Embed the computed digest even when the config pins one
    #[arg(long, global = true)]
    computed: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the avatar URL for each address
    Url(resolve::UrlArgs),
    /// Print the normalized address and its computed digest
    Digest(digest::DigestArgs),
    /// Render a template with the gravatar filter registered
    Render(render::RenderArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        pinned,
        computed,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let source = digest_source_override(pinned, computed)
                .with_context(|| "parse --pinned digest")?
                .unwrap_or(app_config.digest);
            let resolver = app_config.resolver().with_source(source);
            debug!(
                source = source.label(),
                base_url = %resolver.base_url(),
                "resolver ready"
            );

            let ctx = Context {
                resolver: &resolver,
                json,
            };

            match command {
                Command::Url(args) => resolve::print_urls(&ctx, args),
                Command::Digest(args) => digest::print_digest(&ctx, args),
                Command::Render(args) => render::render_template(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before config load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
