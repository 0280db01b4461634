use kurbo::{ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathSeg};

use crate::{
    animation::ease::Ease,
    foundation::{
        core::{BezPath, Point, ProgressWindow, TargetId},
        error::{ScrublineError, ScrublineResult},
    },
    timeline::stage::Phase,
};

const ARCLEN_ACCURACY: f64 = 1e-4;

/// A marker that follows a path across a progress window.
///
/// Position comes from arc length along `path` (SVG path data), not from interpolating x and y
/// separately. The eased path progress is clamped to `[0, 1]`, so overshooting eases park the
/// marker at the path end instead of running past it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionSegment {
    pub target: TargetId,
    pub path: String,
    pub window: ProgressWindow,
    #[serde(default)]
    pub ease: Ease,
    /// Emit the path tangent (degrees) as the target's rotation.
    #[serde(default)]
    pub auto_rotate: bool,
}

impl MotionSegment {
    pub fn new(target: impl Into<TargetId>, path: impl Into<String>, window: ProgressWindow) -> Self {
        Self {
            target: target.into(),
            path: path.into(),
            window,
            ease: Ease::Linear,
            auto_rotate: false,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_auto_rotate(mut self, on: bool) -> Self {
        self.auto_rotate = on;
        self
    }

    /// Structural checks only; path data is measured separately by [`PathSampler::from_svg`].
    pub fn validate(&self) -> ScrublineResult<()> {
        if self.target.as_str().trim().is_empty() {
            return Err(ScrublineError::validation(
                "motion segment target must be non-empty",
            ));
        }
        self.window.validate()?;
        self.ease.validate()
    }

    /// Path progress at timeline progress `p`, always within `[0, 1]`.
    pub fn path_progress_at(&self, p: f64) -> f64 {
        match Phase::of(self.window, p) {
            Phase::Before => 0.0,
            Phase::After => 1.0,
            Phase::Active(t) => self.ease.apply(t).clamp(0.0, 1.0),
        }
    }
}

/// Point and heading on a path.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathSample {
    pub point: Point,
    pub angle_deg: f64,
}

#[derive(Clone, Debug)]
struct MeasuredSeg {
    seg: PathSeg,
    start: f64, // cumulative arc length at segment start
    len: f64,
}

/// Arc-length parameterized path.
#[derive(Clone, Debug)]
pub struct PathSampler {
    segs: Vec<MeasuredSeg>,
    total: f64,
}

impl PathSampler {
    pub fn from_svg(d: &str) -> ScrublineResult<Self> {
        let path = BezPath::from_svg(d)
            .map_err(|e| ScrublineError::path(format!("invalid path data: {e}")))?;
        Self::from_bez_path(&path)
    }

    pub fn from_bez_path(path: &BezPath) -> ScrublineResult<Self> {
        let mut segs = Vec::new();
        let mut total = 0.0;
        for seg in path.segments() {
            let len = seg.arclen(ARCLEN_ACCURACY);
            if !len.is_finite() {
                return Err(ScrublineError::path("path segment length is not finite"));
            }
            if len <= 0.0 {
                continue;
            }
            segs.push(MeasuredSeg {
                seg,
                start: total,
                len,
            });
            total += len;
        }
        if segs.is_empty() || !(total > 0.0) {
            return Err(ScrublineError::path("path has zero length"));
        }
        Ok(Self { segs, total })
    }

    pub fn length(&self) -> f64 {
        self.total
    }

    /// Sample at `progress` in `[0, 1]` of the total arc length.
    pub fn sample(&self, progress: f64) -> PathSample {
        let progress = progress.clamp(0.0, 1.0);
        let (seg, t) = if progress <= 0.0 {
            (&self.segs[0], 0.0)
        } else if progress >= 1.0 {
            (&self.segs[self.segs.len() - 1], 1.0)
        } else {
            let target = progress * self.total;
            let idx = self
                .segs
                .partition_point(|s| s.start + s.len < target)
                .min(self.segs.len() - 1);
            let s = &self.segs[idx];
            let local = (target - s.start).clamp(0.0, s.len);
            (s, s.seg.inv_arclen(local, ARCLEN_ACCURACY).clamp(0.0, 1.0))
        };

        let point = seg.seg.eval(t);
        let tangent = match seg.seg {
            PathSeg::Line(l) => l.p1 - l.p0,
            PathSeg::Quad(q) => q.deriv().eval(t).to_vec2(),
            PathSeg::Cubic(c) => c.deriv().eval(t).to_vec2(),
        };
        PathSample {
            point,
            angle_deg: tangent.y.atan2(tangent.x).to_degrees(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/motion.rs"]
mod tests;
