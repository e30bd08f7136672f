//! Rewrite engine
//!
//! The single-pass fold over a program: classify each line, resolve
//! its target against the sticky motion state, decide whether the move
//! is travel or cutting, and emit the rewritten line(s) plus an
//! annotation record. Strictly sequential with exactly one line of
//! lookahead, so the whole input must be materialized first.

use thiserror::Error;

use crate::parser::{LineKind, Motion, ParseError, classify_line};
use crate::state::{MotionState, Z_UNKNOWN};

/// Replacement text for comment lines over the length limit.
pub const LONG_COMMENT_PLACEHOLDER: &str = "(Long comment removed)";

/// Tunable limits of the rewrite. Fixed constants in the original
/// tool, exposed as options here.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOptions {
    /// Comment lines longer than this are replaced on output.
    pub max_comment_len: usize,
    /// Descents longer than this split into a rapid approach plus a
    /// cutting move; the approach stops this far above the target.
    pub descent_threshold: f64,
    /// Starting value for both feed memories.
    pub max_feed: f64,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            max_comment_len: 65,
            descent_threshold: 1.0,
            max_feed: 3000.0,
        }
    }
}

/// A parse failure, located for reporting. Fatal for the run: no
/// partial output is guaranteed consistent past this line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {source} in '{line}'")]
pub struct RewriteError {
    /// 1-based input line number.
    pub line_number: usize,
    /// The offending trimmed line.
    pub line: String,
    pub source: ParseError,
}

/// Result of processing one non-empty input line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOutcome {
    /// One output line, or two when a long descent is split.
    pub output: Vec<String>,
    /// The original line plus human-readable notes, possibly none.
    pub annotation: String,
}

/// The rewritten streams for a whole program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteOutput {
    /// Authoritative rewritten line sequence.
    pub lines: Vec<String>,
    /// One record per non-empty input line, in input order.
    pub annotations: Vec<String>,
}

/// Per-run rewriter owning the motion state.
#[derive(Debug)]
pub struct Rewriter {
    state: MotionState,
    opts: RewriteOptions,
}

impl Rewriter {
    pub fn new(opts: RewriteOptions) -> Self {
        Self {
            state: MotionState::new(opts.max_feed),
            opts,
        }
    }

    /// Read access to the folded state, mainly for tests.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// Process one trimmed, non-empty line.
    ///
    /// `next_raw` is the immediately following raw input line, or
    /// `None` at end of input (treated as "next line carries no Z").
    pub fn process_line(
        &mut self,
        raw: &str,
        next_raw: Option<&str>,
    ) -> Result<LineOutcome, ParseError> {
        let line = classify_line(raw)?;
        match line.kind {
            LineKind::Comment => Ok(self.process_comment(raw)),
            // Control lines pass through and never touch the state.
            LineKind::Control => Ok(LineOutcome {
                output: vec![raw.to_string()],
                annotation: raw.to_string(),
            }),
            LineKind::Motion(motion) => Ok(self.process_motion(raw, &motion, next_raw)),
        }
    }

    fn process_comment(&self, raw: &str) -> LineOutcome {
        if raw.chars().count() > self.opts.max_comment_len {
            LineOutcome {
                output: vec![LONG_COMMENT_PLACEHOLDER.to_string()],
                annotation: format!("{raw} (Too long line)"),
            }
        } else {
            LineOutcome {
                output: vec![raw.to_string()],
                annotation: raw.to_string(),
            }
        }
    }

    fn process_motion(&mut self, raw: &str, motion: &Motion, next_raw: Option<&str>) -> LineOutcome {
        let mut anno = String::new();

        // The G word takes effect before this line's coordinates and
        // feed are interpreted.
        if let Some(code) = motion.code {
            self.state.apply_code(code);
            if let Some(note) = code_note(code) {
                anno.push_str(note);
            }
        }

        let target = self.state.target(motion);
        if let Some(feed) = motion.f {
            self.state.note_feed(feed);
        }

        let current = self.state.position;
        let mut output = vec![raw.to_string()];

        if target.position.x != current.x || target.position.y != current.y {
            // Travel or cutting in the plane; never rewritten, but an
            // open inferred rapid is flagged as inconsistent. The flag
            // deliberately stays set.
            if self.state.in_inferred_rapid {
                anno.push_str(" (Should be rapid)");
            }
            if target.position.z == current.z {
                anno.push_str(&format!(" (Move in horizontal plane at Z={})", current.z));
            } else {
                anno.push_str(" (Ramped move)");
            }
        } else if target.position.z > current.z {
            anno.push_str(" (Going up)");
            // Explicit G words reflect operator intent; only implicit
            // moves with a fast feed are candidates for inference.
            if !motion.origin.is_explicit()
                && motion.f.is_some()
                && target.feed >= self.state.feed
            {
                let next_has_z = next_raw.is_some_and(|line| line.contains('Z'));
                if next_has_z {
                    self.state.in_inferred_rapid = false;
                    anno.push_str(" (Move update, but not into rapid)");
                } else {
                    self.state.in_inferred_rapid = true;
                    anno.push_str(" (Move upwards into rapid)");
                    // Any F word is dropped with the rest of the line.
                    output[0] = format!("G0 Z{}", target.position.z);
                }
            }
        } else {
            anno.push_str(" (Going down)");
            if !motion.origin.is_explicit() && current.z != Z_UNKNOWN {
                let descent = current.z - target.position.z;
                if self.state.in_inferred_rapid {
                    if descent > self.opts.descent_threshold {
                        // Long drop: rapid down to just above the
                        // target, then cut the rest.
                        anno.push_str(" (Down a long way)");
                        output[0] = format!(
                            "G0 Z{}",
                            target.position.z + self.opts.descent_threshold
                        );
                        output.push(self.cut_line(raw, motion));
                    } else {
                        output[0] = self.cut_line(raw, motion);
                    }
                    anno.push_str(" (End rapid move)");
                    self.state.in_inferred_rapid = false;
                }
            }
        }

        self.state.commit(&target);

        LineOutcome {
            output,
            annotation: format!("{raw}{anno}"),
        }
    }

    /// Re-prefix a line as an explicit cutting move, restoring the
    /// cutting feed when the line carried none.
    fn cut_line(&self, raw: &str, motion: &Motion) -> String {
        if motion.f.is_none() {
            format!("G1 {raw} F{}", self.state.cut_feed)
        } else {
            format!("G1 {raw}")
        }
    }
}

fn code_note(code: i32) -> Option<&'static str> {
    match code {
        0 => Some(" (Rapid)"),
        1 => Some(" (Straight)"),
        2 => Some(" (Arc CW)"),
        3 => Some(" (Arc CCW)"),
        90 => Some(" (Absolute moves)"),
        91 => Some(" (Relative moves)"),
        _ => None,
    }
}

/// Rewrite a whole program.
///
/// `lines` are the raw input records in order; each is trimmed before
/// processing and empty lines are skipped entirely. Lookahead always
/// reads the immediately following raw record, so the input must be
/// fully materialized before the fold starts.
pub fn rewrite_program(
    lines: &[&str],
    opts: &RewriteOptions,
) -> Result<RewriteOutput, RewriteError> {
    let mut rewriter = Rewriter::new(opts.clone());
    let mut out = RewriteOutput::default();

    for (idx, raw) in lines.iter().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let next = lines.get(idx + 1).copied();
        let outcome =
            rewriter
                .process_line(trimmed, next)
                .map_err(|source| RewriteError {
                    line_number: idx + 1,
                    line: trimmed.to_string(),
                    source,
                })?;
        out.lines.extend(outcome.output);
        out.annotations.push(outcome.annotation);
    }

    Ok(out)
}
