use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::EvalError;

/// What a [`Chunk`] holds. Only `Text` chunks take part in bracket tracking
/// and import inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    String,
    Comment,
    Text,
}

/// A contiguous slice of the input. Chunks come out of the lexer in order and
/// concatenate back to the exact input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: ChunkKind,
    pub text: &'a str,
    /// Line breaks embedded in `text`.
    pub newlines: usize,
}

/// Canonical package paths to import, e.g. `math/rand`.
///
/// Ordered so the generated import block is stable between runs.
pub type ImportSet = BTreeSet<String>;

/// Result of splitting a snippet into declarations and statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// `import`, `type` and `func` blocks, placed before `main`.
    pub top_level: String,
    /// Everything else; wrapped inside `func main()`.
    pub body: String,
    pub imports: ImportSet,
}

/// What the pipeline hands to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prepared {
    /// Input already carried a `package` clause and is run verbatim.
    PassThrough(String),
    Snippet(Partition),
}

/// Final answer of one evaluation. At most one of the two fields is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvalOutcome {
    pub output: String,
    pub error: String,
}

impl EvalOutcome {
    pub fn success(output: String) -> Self {
        Self {
            output,
            error: String::new(),
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            output: String::new(),
            error,
        }
    }

    /// The one place where pipeline errors become user-facing text.
    /// Malformed input keeps its own line tag; anything else is pinned to line 1.
    pub fn from_error(err: &EvalError) -> Self {
        match err {
            EvalError::NewlineInString { .. } | EvalError::UnclosedBracket { .. } => {
                Self::failure(err.to_string())
            }
            EvalError::Toolchain(e) => Self::failure(format!("1:{e:#}")),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}
