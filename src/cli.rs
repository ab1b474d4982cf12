use clap::Parser;
use std::path::PathBuf;

/// Run a fragment of Go code without writing the package, imports or main.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Code to evaluate; read from --file or stdin when omitted
    pub code: Option<String>,
    /// Read the snippet from a file
    #[arg(short, long, conflicts_with = "code")]
    pub file: Option<PathBuf>,
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Toolchain executable (default: go)
    #[arg(long)]
    pub toolchain: Option<String>,
    /// Directory for the generated program (default: $TMPDIR, $TEMPDIR, system temp)
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
    /// Print the generated program instead of running it
    #[arg(long)]
    pub emit: bool,
    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,
    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
