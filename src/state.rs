//! Motion state threaded through the rewrite fold
//!
//! One `MotionState` instance lives for a single file run. Motion type
//! and positioning mode are sticky: they change only on explicit G
//! words and never reset implicitly. Position and feed are committed
//! exactly once per motion-bearing line, to that line's target.

use crate::parser::Motion;

/// Sentinel Z meaning "no real Z established yet". Valid only before
/// the first Z-bearing line.
pub const Z_UNKNOWN: f64 = 999.0;

/// Default ceiling for cutting and rapid feed rates.
pub const DEFAULT_MAX_FEED: f64 = 3000.0;

/// Motion type selected by G0-G3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionType {
    Rapid,
    Linear,
    ArcCw,
    ArcCcw,
}

impl MotionType {
    /// Motion type for a G word, if the word selects one.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MotionType::Rapid),
            1 => Some(MotionType::Linear),
            2 => Some(MotionType::ArcCw),
            3 => Some(MotionType::ArcCcw),
            _ => None,
        }
    }
}

/// Positioning mode selected by G90/G91.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositioningMode {
    Absolute,
    Relative,
}

/// Last known absolute tool position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Computed destination of one motion-bearing line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Position,
    pub feed: f64,
}

/// Sticky per-run state owned by the rewrite engine.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub position: Position,
    /// Last feed rate seen on any line.
    pub feed: f64,
    /// Last feed rate set while the motion type was cutting.
    pub cut_feed: f64,
    /// Last feed rate set while the motion type was rapid.
    pub rapid_feed: f64,
    pub motion_type: MotionType,
    pub positioning_mode: PositioningMode,
    /// True while an inferred upward rapid is open, pending closure by
    /// a recognized downward move.
    pub in_inferred_rapid: bool,
}

impl MotionState {
    /// Fresh state for one run. Both feed memories start at the
    /// configured ceiling.
    pub fn new(max_feed: f64) -> Self {
        Self {
            position: Position {
                x: 0.0,
                y: 0.0,
                z: Z_UNKNOWN,
            },
            feed: 0.0,
            cut_feed: max_feed,
            rapid_feed: max_feed,
            motion_type: MotionType::Rapid,
            positioning_mode: PositioningMode::Absolute,
            in_inferred_rapid: false,
        }
    }

    /// Apply a G word: G0-G3 select the motion type, G90/G91 the
    /// positioning mode. All other codes leave the state untouched.
    pub fn apply_code(&mut self, code: i32) {
        if let Some(motion_type) = MotionType::from_code(code) {
            self.motion_type = motion_type;
        }
        match code {
            90 => self.positioning_mode = PositioningMode::Absolute,
            91 => self.positioning_mode = PositioningMode::Relative,
            _ => {}
        }
    }

    /// Destination of a line's motion words, given the current state.
    ///
    /// Absent axes keep their current value; present axes are taken as
    /// absolute or relative per the positioning mode. An absent F
    /// keeps the current feed.
    pub fn target(&self, motion: &Motion) -> Target {
        Target {
            position: Position {
                x: self.resolve_axis(self.position.x, motion.x),
                y: self.resolve_axis(self.position.y, motion.y),
                z: self.resolve_axis(self.position.z, motion.z),
            },
            feed: motion.f.unwrap_or(self.feed),
        }
    }

    fn resolve_axis(&self, current: f64, word: Option<f64>) -> f64 {
        match word {
            None => current,
            Some(value) => match self.positioning_mode {
                PositioningMode::Absolute => value,
                PositioningMode::Relative => current + value,
            },
        }
    }

    /// Record an explicitly set feed into the memory matching the
    /// current motion type.
    pub fn note_feed(&mut self, feed: f64) {
        if self.motion_type == MotionType::Rapid {
            self.rapid_feed = feed;
        } else {
            self.cut_feed = feed;
        }
    }

    /// Commit a line's target as the new current state.
    pub fn commit(&mut self, target: &Target) {
        self.position = target.position;
        self.feed = target.feed;
    }
}
