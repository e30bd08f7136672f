//! Classified line model
//!
//! Minimal types representing one classified input line. No rewrite
//! decisions live here - pure data handed to the rewrite engine.

/// How a line arrived at its motion type.
///
/// The rewrite engine trusts explicit G words and only applies rapid
/// inference to implicit moves (lines continuing a previous mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOrigin {
    /// Leading `G0`.
    ExplicitRapid,
    /// Leading `G1`, `G2` or `G3`.
    ExplicitCut,
    /// Any other leading G word (`G90`, `G17`, ...).
    ExplicitOther,
    /// No leading G word; the previous motion type carries over.
    Implicit,
}

impl MoveOrigin {
    /// True for any line that carried its own leading G word.
    pub fn is_explicit(self) -> bool {
        !matches!(self, MoveOrigin::Implicit)
    }
}

/// Motion words extracted from a motion-bearing line.
///
/// Each coordinate is independently present or absent; an absent axis
/// means "no movement on that axis."
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    /// Integer following a leading `G`, if the line starts with one.
    pub code: Option<i32>,
    /// Whether the motion type was set explicitly on this line.
    pub origin: MoveOrigin,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub f: Option<f64>,
}

/// Category of a trimmed, non-empty input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Parenthesized comment line; never interpreted further.
    Comment,
    /// Leading `S`, `M` or `T`; passed through untouched.
    Control,
    /// Everything else: carries zero or more motion words.
    Motion(Motion),
}

/// A classified input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<'a> {
    /// The trimmed input text.
    pub raw: &'a str,
    pub kind: LineKind,
}
