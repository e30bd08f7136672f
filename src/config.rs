//! Configuration management for the rewriter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Default output/annotation filename derivation
//! - The guard against overwriting the input file

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::Parser;

use crate::rewrite::engine::RewriteOptions;

/// Command-line arguments for the rewriter
#[derive(Debug, Parser)]
#[command(name = "gcode-rapid")]
#[command(about = "Convert implicit travel moves in a G-code program to rapid (G0) moves")]
#[command(version)]
pub struct Args {
    /// GCode file to read
    #[arg(short = 'I', long)]
    pub infile: PathBuf,

    /// GCode file to write (default: input with a `_rapid` suffix)
    #[arg(short = 'O', long)]
    pub outfile: Option<PathBuf>,

    /// Also write an annotated copy of the program; without a value,
    /// the input name with an `_annotate` suffix is used
    #[arg(short = 'A', long)]
    pub annotate: Option<Option<PathBuf>>,

    /// Maximum comment line length before replacement
    #[arg(long, default_value_t = 65)]
    pub max_comment_len: usize,

    /// Descent distance above which a closing move is split into a
    /// rapid approach plus a cutting move
    #[arg(long, default_value_t = 1.0)]
    pub descent_threshold: f64,

    /// Starting ceiling for the cutting and rapid feed memories
    #[arg(long, default_value_t = 3000.0)]
    pub max_feed: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Combined configuration for one run
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Annotation stream destination, if requested.
    pub annotate: Option<PathBuf>,
    pub max_comment_len: usize,
    pub descent_threshold: f64,
    pub max_feed: f64,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let output = args
            .outfile
            .unwrap_or_else(|| derived_name(&args.infile, "_rapid"));
        if output == args.infile {
            bail!("output file {} would overwrite the input", output.display());
        }

        let annotate = match args.annotate {
            None => None,
            Some(Some(path)) => Some(path),
            Some(None) => Some(derived_name(&args.infile, "_annotate")),
        };
        if let Some(annotate) = &annotate
            && *annotate == args.infile
        {
            bail!(
                "annotation file {} would overwrite the input",
                annotate.display()
            );
        }

        Ok(Config {
            input: args.infile,
            output,
            annotate,
            max_comment_len: args.max_comment_len,
            descent_threshold: args.descent_threshold,
            max_feed: args.max_feed,
            log_level: args.log_level,
        })
    }

    /// The rewrite limits carried by this configuration.
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            max_comment_len: self.max_comment_len,
            descent_threshold: self.descent_threshold,
            max_feed: self.max_feed,
        }
    }
}

/// Insert a suffix before the input's extension: `part.nc` with
/// `_rapid` becomes `part_rapid.nc`; extensionless names just get the
/// suffix appended.
fn derived_name(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv.iter().copied()).expect("parse args")
    }

    #[test]
    fn test_default_output_name() {
        let config = Config::from_args(parse(&["gcode-rapid", "-I", "part.nc"])).unwrap();
        assert_eq!(config.output, PathBuf::from("part_rapid.nc"));
        assert_eq!(config.annotate, None);
    }

    #[test]
    fn test_extensionless_input() {
        let config = Config::from_args(parse(&["gcode-rapid", "-I", "part"])).unwrap();
        assert_eq!(config.output, PathBuf::from("part_rapid"));
    }

    #[test]
    fn test_annotate_flag_without_value() {
        let config = Config::from_args(parse(&["gcode-rapid", "-I", "part.nc", "-A"])).unwrap();
        assert_eq!(config.annotate, Some(PathBuf::from("part_annotate.nc")));
    }

    #[test]
    fn test_annotate_flag_with_value() {
        let config =
            Config::from_args(parse(&["gcode-rapid", "-I", "part.nc", "-A", "notes.nc"])).unwrap();
        assert_eq!(config.annotate, Some(PathBuf::from("notes.nc")));
    }

    #[test]
    fn test_output_collision_rejected() {
        let result = Config::from_args(parse(&["gcode-rapid", "-I", "part.nc", "-O", "part.nc"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_annotate_collision_rejected() {
        let result = Config::from_args(parse(&["gcode-rapid", "-I", "part.nc", "-A", "part.nc"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_limit_overrides() {
        let config = Config::from_args(parse(&[
            "gcode-rapid",
            "-I",
            "part.nc",
            "--max-comment-len",
            "80",
            "--descent-threshold",
            "2.5",
            "--max-feed",
            "5000",
        ]))
        .unwrap();
        let opts = config.rewrite_options();
        assert_eq!(opts.max_comment_len, 80);
        assert_eq!(opts.descent_threshold, 2.5);
        assert_eq!(opts.max_feed, 5000.0);
    }

    #[test]
    fn test_missing_input_rejected_by_clap() {
        assert!(Args::try_parse_from(["gcode-rapid"]).is_err());
    }
}
