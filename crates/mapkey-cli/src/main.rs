use anyhow::{Context, Result, bail};
use clap::Parser;
use mapkey_config::Config;
use mapkey_engine::MapkeyDocument;
use std::{io::stdout, path::PathBuf, process};

mod cli_args;
mod commands;

use cli_args::{Cli, Command};

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        log::debug!("Config path: {}", Config::config_path().display());
        return Ok(Config::load()?.unwrap_or_default());
    };

    log::debug!("Config path: {}", path.display());
    match Config::load_from_path(path)? {
        Some(config) => Ok(config),
        None => bail!("Config file {} not found", path.display()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    if let Command::Init(args) = &cli.command {
        return commands::init(cli.config.as_deref(), args, &mut stdout().lock());
    }
    let config = load_config(cli.config.as_ref())?;

    let Some(file) = cli.command.file().or(config.default_file.as_ref()) else {
        bail!(
            "No mapkey file given and no default_file set in {}",
            Config::config_path().display()
        );
    };

    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let doc = MapkeyDocument::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", file.display()))?;
    log::debug!(
        "{}: {} records, {} tokens",
        file.display(),
        doc.definitions().len(),
        doc.tokens().len()
    );

    let mut options = config.analysis_options();
    if let Some(limit) = cli.command.limit() {
        options.nesting_limit = limit;
    }

    let code = commands::run(&cli.command, &doc, &options, cli.json, &mut stdout().lock())?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
