use std::{borrow::Borrow, fmt};

use crate::foundation::error::{ScrublineError, ScrublineResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Stable identifier of an animated visual element.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    /// Wrap a target name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TargetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for TargetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of a scroll-tracked region (one per section).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    /// Wrap a region name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RegionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One scroll sample, taken at the start of an animation frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollFrame {
    pub scroll_y: f64,
    pub now_ms: f64, // monotonic frame clock
}

/// Closed progress interval `[start, end]` with `0 <= start < end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressWindow {
    pub start: f64,
    pub end: f64,
}

impl ProgressWindow {
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> ScrublineResult<Self> {
        let w = Self { start, end };
        w.validate()?;
        Ok(w)
    }

    pub fn validate(self) -> ScrublineResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ScrublineError::validation(
                "progress window bounds must be finite",
            ));
        }
        if self.start < 0.0 || self.end > 1.0 {
            return Err(ScrublineError::validation(format!(
                "progress window [{}, {}] must lie within [0, 1]",
                self.start, self.end
            )));
        }
        if self.start >= self.end {
            return Err(ScrublineError::validation(format!(
                "progress window start {} must be < end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn len(self) -> f64 {
        self.end - self.start
    }

    pub fn contains(self, p: f64) -> bool {
        self.start <= p && p <= self.end
    }

    /// Position of `p` inside the window, clamped to `[0, 1]`.
    pub fn local_t(self, p: f64) -> f64 {
        if p <= self.start {
            return 0.0;
        }
        if p >= self.end {
            return 1.0;
        }
        ((p - self.start) / self.len()).clamp(0.0, 1.0)
    }

    /// True when the windows share more than a single boundary point.
    pub fn overlaps_interior(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
