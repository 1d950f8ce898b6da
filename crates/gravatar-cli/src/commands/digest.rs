use crate::commands::{print_json, Context};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DigestArgs {
    pub email: String,
}

pub fn print_digest(ctx: &Context<'_>, args: DigestArgs) -> Result<()> {
    let outcome = ctx.resolver.digest_for(&args.email);

    if ctx.json {
        print_json(&serde_json::json!({
            "email": args.email,
            "normalized": outcome.normalized,
            "digest": outcome.computed,
        }))?;
    } else {
        println!("{}", outcome.computed);
    }
    Ok(())
}
