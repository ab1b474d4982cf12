//! Front end: getting the snippet text in and the shorthand lines expanded.
mod aliases;

pub use aliases::expand_aliases;

use std::io::{IsTerminal, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Pick the snippet source: inline code wins, then a file, then stdin.
pub fn load_source(code: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(code) = code {
        return Ok(code.to_string());
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()));
    }
    read_stdin()
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter one or more lines and hit ctrl-D");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .with_context(|| "Reading snippet from stdin")?;
    Ok(buf)
}
