use std::{io::Write, path::Path};

use anyhow::{Result, bail};
use mapkey_config::Config;
use mapkey_engine::{
    AnalysisOptions, MapkeyDocument, Severity, Span, TokenKind, graph, lint,
};
use serde::Serialize;

use crate::cli_args::{Command, InitArgs};

/// Source text longer than this is cut in text output.
const PREVIEW_BYTES: usize = 40;

/// Writes the report for `command` and returns the process exit code.
pub(crate) fn run(
    command: &Command,
    doc: &MapkeyDocument,
    options: &AnalysisOptions,
    json: bool,
    out: &mut impl Write,
) -> Result<i32> {
    match command {
        Command::Tokens(_) => {
            if json {
                return emit_json(out, doc.tokens());
            }
            for t in doc.tokens() {
                let source = doc.preview(t.span, PREVIEW_BYTES);
                write!(out, "{} {} {source:?}", position(doc, t.span)?, t.kind)?;
                if matches!(
                    t.kind,
                    TokenKind::Description | TokenKind::Label | TokenKind::SystemInstruction
                ) {
                    write!(out, " -> {:?}", t.value)?;
                }
                writeln!(out)?;
            }
        }
        Command::Defs(_) => {
            if json {
                return emit_json(out, doc.definitions());
            }
            for d in doc.definitions() {
                write!(out, "{} {}", position(doc, d.range)?, d.name)?;
                if let Some(label) = &d.label {
                    write!(out, " label={label:?}")?;
                }
                if let Some(description) = &d.description {
                    write!(out, " description={description:?}")?;
                }
                if !d.called_names.is_empty() {
                    write!(out, " calls={}", d.called_names.join(","))?;
                }
                if !d.terminated {
                    write!(out, " (unterminated)")?;
                }
                writeln!(out)?;
            }
        }
        Command::Graph(_) => {
            let graph = doc.call_graph();
            if json {
                return emit_json(out, graph);
            }
            for e in &graph.entries {
                writeln!(out, "{} -> {}", e.name, e.calls.join(", "))?;
            }
        }
        Command::Cycles(_) => {
            let cycles = graph::find_cycles_in(&doc.analysis(options));
            if json {
                return emit_json(out, &cycles);
            }
            for cycle in &cycles {
                writeln!(out, "{}", cycle.join(" -> "))?;
            }
        }
        Command::Nesting(_) => {
            let index = doc.analysis(options);
            let violations = graph::violations_in(doc.call_graph(), &index, options.nesting_limit);
            if json {
                return emit_json(out, &violations);
            }
            for v in &violations {
                writeln!(
                    out,
                    "{} nests {} records (limit {})",
                    v.name,
                    v.depth + 1,
                    options.nesting_limit
                )?;
            }
        }
        Command::Lint(_) => {
            let found = lint(doc, options);
            let failed = found.iter().any(|d| d.severity == Severity::Error);
            if json {
                emit_json(out, &found)?;
            } else {
                for d in &found {
                    let severity = match d.severity {
                        Severity::Error => "error",
                        Severity::Warning => "warning",
                    };
                    writeln!(
                        out,
                        "{}: {severity}: {} [{}]",
                        position(doc, d.span)?,
                        d.message,
                        d.code
                    )?;
                }
            }
            return Ok(i32::from(failed));
        }
        Command::Init(_) => bail!("init does not take a mapkey file"),
    }
    Ok(0)
}

/// Writes the default config to `path`, or to the user config path.
pub(crate) fn init(path: Option<&Path>, args: &InitArgs, out: &mut impl Write) -> Result<()> {
    let target = path.map_or_else(Config::config_path, Path::to_path_buf);
    if target.exists() && !args.force {
        bail!("{} already exists; pass --force to replace it", target.display());
    }

    let config = Config::default();
    match path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    log::debug!("Wrote default config to {}", target.display());
    writeln!(out, "{}", target.display())?;
    Ok(())
}

fn emit_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<i32> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(0)
}

/// One-based `line:col` of the span start.
fn position(doc: &MapkeyDocument, sp: Span) -> Result<String> {
    let (line, col) = doc.line_col(sp.start)?;
    Ok(format!("{}:{}", line + 1, col + 1))
}
