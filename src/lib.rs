//! GCode Rapid Rewriter
//!
//! Rewrites a machine-tool motion program so that non-cutting travel
//! moves that were encoded as cutting moves become rapid (G0) moves,
//! preserving true cutting behavior. Optionally emits a parallel
//! annotation stream describing the interpretation of each line.
//!
//! This library provides:
//! - Line classification and numeric token extraction
//! - The sticky motion state threaded through the run
//! - The single-pass rewrite fold with one line of lookahead
//! - Configuration management

pub mod config;
pub mod parser;
pub mod rewrite;
pub mod state;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{Line, LineKind, Motion, MoveOrigin, ParseError, classify_line};
pub use rewrite::{RewriteError, RewriteOptions, RewriteOutput, Rewriter, rewrite_program};
pub use state::{MotionState, MotionType, PositioningMode};
