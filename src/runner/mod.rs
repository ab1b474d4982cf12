//! Compile, run, and, when our import guesses were wrong, repair once.
pub mod diagnostics;
pub mod toolchain;

use tracing::{debug, info, warn};

pub use diagnostics::{DiagnosticClassifier, GoClassifier};
pub use toolchain::{CommandToolchain, RunOutput, Toolchain};

use crate::error::EvalError;
use crate::model::{EvalOutcome, ImportSet, Prepared};
use crate::processor::assemble::{SUPPORT_IMPORT, assemble};

/// The first attempt plus at most one repair. Diagnostics that keep
/// blaming imports must not turn into a retry loop.
pub const MAX_ATTEMPTS: usize = 2;

/// Drop every import the diagnostics blame, matching either the full path or
/// its last element. Returns whether anything was removed.
pub fn repair_imports(names: &[String], imports: &mut ImportSet) -> bool {
    let mut repaired = false;
    for name in names {
        let before = imports.len();
        imports.retain(|path| path != name && path.rsplit('/').next() != Some(name.as_str()));
        if imports.len() != before {
            info!(%name, "dropping guessed import");
            repaired = true;
        }
    }
    repaired
}

fn failure(classifier: &dyn DiagnosticClassifier, run: &RunOutput) -> EvalOutcome {
    let lines = classifier.translate(&run.output);
    if lines.is_empty() {
        return EvalOutcome::failure("1:program exited with an error".to_string());
    }
    EvalOutcome::failure(lines.join("\n"))
}

/// Run a prepared program to completion.
pub fn execute(
    prepared: Prepared,
    toolchain: &dyn Toolchain,
    classifier: &dyn DiagnosticClassifier,
) -> Result<EvalOutcome, EvalError> {
    let mut partition = match prepared {
        Prepared::PassThrough(src) => {
            let run = toolchain.run(&src)?;
            return Ok(if run.success {
                EvalOutcome::success(run.output)
            } else {
                failure(classifier, &run)
            });
        }
        Prepared::Snippet(partition) => partition,
    };
    partition.imports.insert(SUPPORT_IMPORT.to_string());

    let mut attempt = 1;
    loop {
        debug!(attempt, imports = ?partition.imports, "compiling");
        let run = toolchain.run(&assemble(&partition))?;
        if run.success {
            return Ok(EvalOutcome::success(run.output));
        }

        let blamed = classifier.implicated_imports(&run.output);
        if attempt < MAX_ATTEMPTS && repair_imports(&blamed, &mut partition.imports) {
            attempt += 1;
            continue;
        }

        warn!(attempt, "compilation failed");
        return Ok(failure(classifier, &run));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imports(paths: &[&str]) -> ImportSet {
        paths.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_repair_by_short_name_or_path() {
        let mut set = imports(&["fmt", "math/rand", "os", "strings"]);
        let names = vec!["rand".to_string(), "os".to_string(), "time".to_string()];

        assert!(repair_imports(&names, &mut set));
        assert_eq!(set, imports(&["fmt", "strings"]));

        let names = vec!["encoding/json".to_string()];
        assert!(!repair_imports(&names, &mut set), "nothing to remove");
        assert_eq!(set, imports(&["fmt", "strings"]));
    }

    #[test]
    fn test_repair_with_full_path() {
        let mut set = imports(&["fmt", "math/rand"]);
        assert!(repair_imports(&["math/rand".to_string()], &mut set));
        assert_eq!(set, imports(&["fmt"]));
    }
}
