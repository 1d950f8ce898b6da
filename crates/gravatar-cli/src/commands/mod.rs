use anyhow::Result;
use gravatar_core::AvatarResolver;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod digest;
pub mod render;
pub mod resolve;

pub struct Context<'a> {
    pub resolver: &'a AvatarResolver,
    pub json: bool,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
