//! Runtime settings, optionally loaded from a JSON file.
//!
//! Every field has a default, so `{}` is a valid config and so is no file at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variables checked, in order, for the directory that receives
/// the generated program.
pub const TEMP_DIR_VARS: [&str; 2] = ["TMPDIR", "TEMPDIR"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    /// Executable that builds and runs the program.
    pub program: String,
    /// Arguments placed before the source file path.
    pub args: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
            args: vec!["run".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolchain: ToolchainConfig,
    /// Overrides `$TMPDIR`/`$TEMPDIR` and the platform default.
    pub temp_dir: Option<PathBuf>,
    /// Name of the generated file inside the temp dir.
    pub file_name: String,
    /// Extra short-name → import path entries for import inference.
    pub packages: BTreeMap<String, String>,
    /// Rewrite `p ...` / `t ...` lines into print helper calls.
    pub expand_aliases: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toolchain: ToolchainConfig::default(),
            temp_dir: None,
            file_name: "gore_eval.go".to_string(),
            packages: BTreeMap::new(),
            expand_aliases: true,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing config {}", path.display()))
    }

    /// Where the generated program is written. The file is left in place
    /// after the run so it can be inspected.
    pub fn program_path(&self) -> PathBuf {
        self.resolve_temp_dir(|var| std::env::var_os(var).map(PathBuf::from))
            .join(&self.file_name)
    }

    fn resolve_temp_dir(&self, env: impl Fn(&str) -> Option<PathBuf>) -> PathBuf {
        self.temp_dir
            .clone()
            .or_else(|| {
                TEMP_DIR_VARS
                    .iter()
                    .filter_map(|var| env(var))
                    .find(|dir| !dir.as_os_str().is_empty())
            })
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config = Config::from_json("{}").expect("valid config");
        assert_eq!(config, Config::default());
        assert_eq!(config.toolchain.program, "go");
        assert_eq!(config.toolchain.args, vec!["run"]);
        assert!(config.expand_aliases);
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "toolchain": { "program": "/usr/local/go/bin/go" },
            "packages": { "errgroup": "golang.org/x/sync/errgroup" },
            "expand_aliases": false
        }"#;
        let config = Config::from_json(json).expect("valid config");

        assert_eq!(config.toolchain.program, "/usr/local/go/bin/go");
        assert_eq!(config.toolchain.args, vec!["run"], "args keep their default");
        assert_eq!(
            config.packages.get("errgroup").map(String::as_str),
            Some("golang.org/x/sync/errgroup")
        );
        assert!(!config.expand_aliases);
        assert_eq!(config.file_name, "gore_eval.go");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Config::from_json("{ \"temp_dir\": 3 }").is_err());
    }

    #[test]
    fn test_temp_dir_resolution_order() {
        let vars = |tmpdir: Option<&str>, tempdir: Option<&str>| {
            let tmpdir = tmpdir.map(PathBuf::from);
            let tempdir = tempdir.map(PathBuf::from);
            move |var: &str| match var {
                "TMPDIR" => tmpdir.clone(),
                "TEMPDIR" => tempdir.clone(),
                _ => None,
            }
        };

        let config = Config::default();
        assert_eq!(
            config.resolve_temp_dir(vars(Some("/a"), Some("/b"))),
            PathBuf::from("/a")
        );
        assert_eq!(
            config.resolve_temp_dir(vars(None, Some("/b"))),
            PathBuf::from("/b")
        );
        assert_eq!(
            config.resolve_temp_dir(vars(Some(""), Some("/b"))),
            PathBuf::from("/b"),
            "empty variables are skipped"
        );
        assert_eq!(config.resolve_temp_dir(vars(None, None)), std::env::temp_dir());

        let pinned = Config {
            temp_dir: Some(PathBuf::from("/pinned")),
            ..Config::default()
        };
        assert_eq!(
            pinned.resolve_temp_dir(vars(Some("/a"), None)),
            PathBuf::from("/pinned")
        );
    }
}
