//! Line classification
//!
//! Categorizes one trimmed input line by its first character and
//! extracts the motion words the rewrite engine works with. The only
//! low-level primitive is the numeric token extractor in [`lexer`].

pub mod ast;
pub mod lexer;

pub use ast::{Line, LineKind, Motion, MoveOrigin};
pub use lexer::number_token;

use thiserror::Error;

/// A mandatory numeric field could not be read.
///
/// Any structural violation is fatal for the run; there is no
/// partial-recovery path for a corrupt numeric field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A parameter letter (or leading `G`) with no digits after it.
    #[error("missing number after '{letter}'")]
    MissingNumber { letter: char },
    /// A token that is not a well-formed number (e.g. `1.2.3`, `-+5`).
    #[error("malformed number '{token}' after '{letter}'")]
    MalformedNumber { letter: char, token: String },
}

/// Classify a single trimmed, non-empty line.
///
/// This is the main entry point for classification. Comments and
/// control lines are recognized by their first character and never
/// scanned for motion words; everything else has its G word and
/// X/Y/Z/F parameters extracted.
pub fn classify_line(raw: &str) -> Result<Line<'_>, ParseError> {
    match raw.chars().next() {
        Some('(') => Ok(Line {
            raw,
            kind: LineKind::Comment,
        }),
        // Control lines are assumed not to carry motion parameters.
        Some('S') | Some('M') | Some('T') => Ok(Line {
            raw,
            kind: LineKind::Control,
        }),
        _ => {
            let code = if raw.starts_with('G') {
                Some(g_number(raw)?)
            } else {
                None
            };

            let origin = match code {
                Some(0) => MoveOrigin::ExplicitRapid,
                Some(1..=3) => MoveOrigin::ExplicitCut,
                Some(_) => MoveOrigin::ExplicitOther,
                None => MoveOrigin::Implicit,
            };

            Ok(Line {
                raw,
                kind: LineKind::Motion(Motion {
                    code,
                    origin,
                    x: axis_word(raw, 'X')?,
                    y: axis_word(raw, 'Y')?,
                    z: axis_word(raw, 'Z')?,
                    f: axis_word(raw, 'F')?,
                }),
            })
        }
    }
}

/// Parse the mandatory integer following a leading `G`.
fn g_number(line: &str) -> Result<i32, ParseError> {
    let token = lexer::number_token(line, 1);
    if token.is_empty() {
        return Err(ParseError::MissingNumber { letter: 'G' });
    }
    token.parse().map_err(|_| ParseError::MalformedNumber {
        letter: 'G',
        token: token.to_string(),
    })
}

/// Extract the value after the first occurrence of `letter`, if any.
fn axis_word(line: &str, letter: char) -> Result<Option<f64>, ParseError> {
    let Some(pos) = line.find(letter) else {
        return Ok(None);
    };
    let token = lexer::number_token(line, pos + 1);
    if token.is_empty() {
        return Err(ParseError::MissingNumber { letter });
    }
    match token.parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ParseError::MalformedNumber {
            letter,
            token: token.to_string(),
        }),
    }
}
