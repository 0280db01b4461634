use crate::foundation::{core::RegionId, math::sanitize_progress};

/// Scroll offsets (document px) between which a region's progress runs from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Boundary {
    pub start: f64,
    pub end: f64,
}

impl Boundary {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Derive a boundary from layout geometry.
    ///
    /// The region starts once its top reaches `start_fraction` of the viewport height and runs for
    /// the pin distance. Returns `None` when any input is unmeasurable.
    pub fn from_layout(
        layout: RegionLayout,
        viewport_height: f64,
        start_fraction: f64,
    ) -> Option<Self> {
        let distance = layout.pin_distance.unwrap_or(layout.height);
        let inputs = [layout.top, distance, viewport_height, start_fraction];
        if inputs.iter().any(|v| !v.is_finite()) || distance < 0.0 || viewport_height <= 0.0 {
            return None;
        }
        let start = layout.top - start_fraction * viewport_height;
        Some(Self {
            start,
            end: start + distance,
        })
    }

    /// `end <= start`, or a bound is not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.start.is_finite() && self.end.is_finite() && self.end > self.start)
    }

    pub fn distance(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.end - self.start
        }
    }

    /// Raw progress at `scroll_y`. Degenerate boundaries report 1.
    pub fn progress_at(&self, scroll_y: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        sanitize_progress((scroll_y - self.start) / (self.end - self.start))
    }
}

/// Measured geometry of a region's container, in document px.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionLayout {
    pub top: f64,
    pub height: f64,
    /// Scroll distance the region stays pinned for. Defaults to `height`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_distance: Option<f64>,
}

impl RegionLayout {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height,
            pin_distance: None,
        }
    }

    pub fn with_pin_distance(mut self, distance: f64) -> Self {
        self.pin_distance = Some(distance);
        self
    }
}

/// A tracked scroll region.
#[derive(Clone, Debug)]
pub struct Region {
    id: RegionId,
    boundary: Option<Boundary>,
    progress: f64,
    pinned: bool,
    unresolved_passes: u32,
    warned: bool,
}

impl Region {
    /// A region whose boundary is not known yet. Its progress reads as 1 until one is resolved.
    pub fn new(id: impl Into<RegionId>) -> Self {
        Self {
            id: id.into(),
            boundary: None,
            progress: 1.0,
            pinned: false,
            unresolved_passes: 0,
            warned: false,
        }
    }

    pub fn with_boundary(id: impl Into<RegionId>, boundary: Boundary) -> Self {
        let mut region = Self::new(id);
        region.set_boundary(boundary);
        region
    }

    pub fn id(&self) -> &RegionId {
        &self.id
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.boundary
    }

    /// Last smoothed progress published by the progress source.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn unresolved_passes(&self) -> u32 {
        self.unresolved_passes
    }

    /// True when progress is pinned to the constant 1 fallback.
    pub fn is_degenerate(&self) -> bool {
        self.boundary.is_none_or(|b| b.is_degenerate())
    }

    pub fn raw_progress(&self, scroll_y: f64) -> f64 {
        match self.boundary {
            Some(b) => b.progress_at(scroll_y),
            None => 1.0,
        }
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        self.boundary = Some(boundary);
        self.unresolved_passes = 0;
        self.warned = false;
    }

    pub(crate) fn set_progress(&mut self, progress: f64) {
        self.progress = progress;
    }

    pub(crate) fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Run one layout pass. Returns whether a usable boundary came out of it.
    ///
    /// A failed pass clears the boundary (progress falls back to 1). After `max_passes`
    /// consecutive failures a single warning is logged until a later pass succeeds.
    pub fn resolve_layout(
        &mut self,
        layout: Option<RegionLayout>,
        viewport_height: f64,
        start_fraction: f64,
        max_passes: u32,
    ) -> bool {
        let resolved = layout
            .and_then(|l| Boundary::from_layout(l, viewport_height, start_fraction))
            .filter(|b| !b.is_degenerate());

        if let Some(boundary) = resolved {
            tracing::debug!(region = %self.id, start = boundary.start, end = boundary.end, "region boundary resolved");
            self.set_boundary(boundary);
            return true;
        }

        self.boundary = None;
        self.record_unresolved(max_passes);
        false
    }

    /// Layout pass for a region with a fixed boundary. A degenerate one counts as unresolved and
    /// is kept, so progress stays at 1.
    pub fn check_fixed_boundary(&mut self, max_passes: u32) -> bool {
        if self.boundary.is_some_and(|b| !b.is_degenerate()) {
            self.unresolved_passes = 0;
            self.warned = false;
            return true;
        }
        self.record_unresolved(max_passes);
        false
    }

    fn record_unresolved(&mut self, max_passes: u32) {
        self.unresolved_passes = self.unresolved_passes.saturating_add(1);
        if self.unresolved_passes >= max_passes && !self.warned {
            tracing::warn!(
                region = %self.id,
                passes = self.unresolved_passes,
                "region boundary unresolved; holding progress at 1"
            );
            self.warned = true;
        }
    }

    /// Whether the unresolved-boundary warning has been logged for the current failure streak.
    pub fn has_warned(&self) -> bool {
        self.warned
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/region.rs"]
mod tests;
