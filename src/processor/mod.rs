//! The source-to-program core.
//!
//! `prepare` is pure text processing: no files, no processes. The runner
//! takes its result the rest of the way.
pub mod assemble;
pub mod imports;
pub mod lexer;
pub mod partition;

use tracing::debug;

use crate::config::Config;
use crate::error::EvalError;
use crate::model::Prepared;
use crate::parser;

/// Turn raw input into either a pass-through program or a partitioned snippet.
pub fn prepare(code: &str, config: &Config) -> Result<Prepared, EvalError> {
    if assemble::has_package_clause(code) {
        debug!("input has a package clause; passing through");
        return Ok(Prepared::PassThrough(code.to_string()));
    }

    let partition = if config.expand_aliases {
        partition::partition(&parser::expand_aliases(code), &config.packages)?
    } else {
        partition::partition(code, &config.packages)?
    };
    Ok(Prepared::Snippet(partition))
}
