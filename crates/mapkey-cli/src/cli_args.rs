use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "mapkey-graph")]
#[command(about = "Inspect mapkey records and their call graph")]
pub(crate) struct Cli {
    /// Config file to use instead of ~/.config/mapkey-graph/config.toml
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Every token with its position
    Tokens(FileArgs),
    /// One line per record
    Defs(FileArgs),
    /// Outgoing calls per record
    Graph(FileArgs),
    /// Call cycles
    Cycles(FileArgs),
    /// Records whose call chain exceeds the nesting limit
    Nesting(LimitArgs),
    /// All diagnostics; exits with 1 when any is an error
    Lint(LimitArgs),
    /// Write a config file with the default settings
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub(crate) struct FileArgs {
    /// Mapkey file; falls back to `default_file` from the config
    pub(crate) file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct LimitArgs {
    #[command(flatten)]
    pub(crate) input: FileArgs,
    /// Override the configured nesting limit
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    /// Replace an existing config file
    #[arg(long)]
    pub(crate) force: bool,
}

impl Command {
    pub(crate) fn file(&self) -> Option<&PathBuf> {
        match self {
            Command::Tokens(a) | Command::Defs(a) | Command::Graph(a) | Command::Cycles(a) => {
                a.file.as_ref()
            }
            Command::Nesting(a) | Command::Lint(a) => a.input.file.as_ref(),
            Command::Init(_) => None,
        }
    }

    pub(crate) fn limit(&self) -> Option<usize> {
        match self {
            Command::Nesting(a) | Command::Lint(a) => a.limit,
            _ => None,
        }
    }
}
