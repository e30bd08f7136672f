//! Rewrite policy
//!
//! The core of the tool: the sequential fold that converts implicit
//! travel moves to rapids, plus the file-level runner used by the
//! binary.

pub mod engine;
pub mod runner;

pub use engine::{
    LONG_COMMENT_PLACEHOLDER, LineOutcome, RewriteError, RewriteOptions, RewriteOutput, Rewriter,
    rewrite_program,
};
pub use runner::{rewrite_file, run};
