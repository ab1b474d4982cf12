use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvalError {
    /// Quoted literals may not span lines.
    #[error("{line}: newline in string literal")]
    NewlineInString { line: usize },

    #[error("{line}: bracket or paren not closed ({depth} still open)")]
    UnclosedBracket { line: usize, depth: usize },

    /// Writing the program or running the external compiler failed.
    #[error(transparent)]
    Toolchain(#[from] anyhow::Error),
}
