//! Running a generated program through an external toolchain.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;

/// What one build-and-run attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub success: bool,
    /// Standard output followed by standard error.
    pub output: String,
}

/// Something that can build and run a complete program.
pub trait Toolchain {
    fn run(&self, source: &str) -> Result<RunOutput>;
}

/// `go run <file>`, or whatever command the config names.
///
/// The program is written to a fixed path, so two evaluations running at the
/// same time in one temp dir overwrite each other's file.
#[derive(Debug, Clone)]
pub struct CommandToolchain {
    program: String,
    args: Vec<String>,
    path: PathBuf,
}

impl CommandToolchain {
    pub fn from_config(config: &Config) -> Self {
        Self {
            program: config.toolchain.program.clone(),
            args: config.toolchain.args.clone(),
            path: config.program_path(),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Toolchain for CommandToolchain {
    fn run(&self, source: &str) -> Result<RunOutput> {
        std::fs::write(&self.path, source)
            .with_context(|| format!("Unable to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), program = %self.program, "running toolchain");

        // blocks until the child exits; there is no timeout
        let out = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.path)
            .output()
            .with_context(|| format!("Running {}", self.program))?;

        let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&out.stderr));

        Ok(RunOutput {
            success: out.status.success(),
            output,
        })
    }
}
