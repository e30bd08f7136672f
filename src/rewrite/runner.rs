//! File-level driver
//!
//! Reads a whole program (the fold needs the materialized line
//! sequence for its one-line lookahead), rewrites it, and persists the
//! output stream plus the optional annotation stream.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::rewrite::engine::{RewriteOptions, RewriteOutput, rewrite_program};

/// Rewrite one file on disk.
///
/// Writes the rewritten program to `output` and, when `annotate` is
/// given, the annotation stream next to it. Returns the streams so
/// callers can inspect them.
pub fn rewrite_file(
    input: &Path,
    output: &Path,
    annotate: Option<&Path>,
    opts: &RewriteOptions,
) -> Result<RewriteOutput> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let lines: Vec<&str> = content.lines().collect();

    let result = rewrite_program(&lines, opts)?;

    write_lines(output, &result.lines)?;
    if let Some(annotate) = annotate {
        write_lines(annotate, &result.annotations)?;
    }

    Ok(result)
}

/// Entry point for the binary.
pub fn run(config: &Config) -> Result<()> {
    log::info!("reading from {}", config.input.display());
    if let Some(annotate) = &config.annotate {
        log::info!("annotating {}", annotate.display());
    }
    log::info!("writing to {}", config.output.display());

    let result = rewrite_file(
        &config.input,
        &config.output,
        config.annotate.as_deref(),
        &config.rewrite_options(),
    )?;
    log::debug!(
        "wrote {} output lines, {} annotation records",
        result.lines.len(),
        result.annotations.len()
    );

    Ok(())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}
