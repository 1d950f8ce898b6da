use crate::commands::{print_json, Context};
use crate::util::read_lines;
use anyhow::{Context as _, Result};
use clap::Args;
use gravatar_core::{DefaultImage, HashDigest, NormalizedEmail, Rating};
use serde::Serialize;
use std::io;
use tracing::debug;

#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Addresses to resolve; read from stdin, one per line, when omitted
    pub emails: Vec<String>,
    /// Requested image size in pixels (1-2048)
    #[arg(long, short)]
    pub size: Option<u32>,
    /// Fallback image: 404, mp, identicon, monsterid, wavatar, retro, robohash, blank
    #[arg(long, short = 'd')]
    pub default_image: Option<DefaultImage>,
    /// Maximum rating: g, pg, r, x
    #[arg(long, short)]
    pub rating: Option<Rating>,
}

#[derive(Debug, Serialize)]
struct UrlDto {
    email: String,
    normalized: NormalizedEmail,
    digest: HashDigest,
    source: &'static str,
    url: String,
}

pub fn print_urls(ctx: &Context<'_>, args: UrlArgs) -> Result<()> {
    let mut options = *ctx.resolver.options();
    if let Some(size) = args.size {
        options = options.with_size(size)?;
    }
    if let Some(image) = args.default_image {
        options = options.with_default_image(image);
    }
    if let Some(rating) = args.rating {
        options = options.with_rating(rating);
    }
    let resolver = ctx.resolver.clone().with_options(options);

    let emails = if args.emails.is_empty() {
        debug!("reading addresses from stdin");
        read_lines(io::stdin().lock()).with_context(|| "read addresses from stdin")?
    } else {
        args.emails
    };

    let items: Vec<UrlDto> = emails
        .into_iter()
        .map(|email| {
            let outcome = resolver.digest_for(&email);
            let url = resolver.compose(&outcome.embedded).into_string();
            UrlDto {
                email,
                normalized: outcome.normalized,
                digest: outcome.embedded,
                source: resolver.source().label(),
                url,
            }
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    for item in items {
        println!("{}", item.url);
    }
    Ok(())
}
