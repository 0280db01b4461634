use std::collections::BTreeMap;

use crate::{
    foundation::{
        core::{RegionId, ScrollFrame},
        error::{ScrublineError, ScrublineResult},
        math::{half_life_alpha, is_finite_non_negative},
    },
    scroll::region::Region,
};

/// Once smoothed and raw progress are this close, smoothed snaps to raw.
pub const SNAP_EPSILON: f64 = 1e-4;

/// Smoothing and settle tuning for one input kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressSettings {
    /// Exponential smoothing half-life. Zero disables smoothing.
    pub half_life_ms: f64,
    /// Velocity (progress per second) below which the region counts as still.
    pub settle_velocity: f64,
    /// How long velocity must stay below `settle_velocity` before `Settled` fires.
    pub settle_debounce_ms: f64,
    /// Progress delta required before the reported direction flips.
    pub direction_hysteresis: f64,
}

impl ProgressSettings {
    pub fn desktop() -> Self {
        Self {
            half_life_ms: 80.0,
            settle_velocity: 0.05,
            settle_debounce_ms: 150.0,
            direction_hysteresis: 0.002,
        }
    }

    /// Touch input settles and follows faster than wheel input.
    pub fn touch() -> Self {
        Self {
            half_life_ms: 40.0,
            settle_velocity: 0.05,
            settle_debounce_ms: 90.0,
            direction_hysteresis: 0.002,
        }
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        let fields = [
            ("half_life_ms", self.half_life_ms),
            ("settle_velocity", self.settle_velocity),
            ("settle_debounce_ms", self.settle_debounce_ms),
            ("direction_hysteresis", self.direction_hysteresis),
        ];
        for (name, v) in fields {
            if !is_finite_non_negative(v) {
                return Err(ScrublineError::config(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self::desktop()
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    #[default]
    Pointer,
    Touch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Owner token shared by every subscription a variant creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Generation(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct SubscriptionId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub region: RegionId,
    pub owner: Generation,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    Changed {
        subscription: SubscriptionId,
        region: RegionId,
        progress: f64,
        /// Progress per second.
        velocity: f64,
        direction: Direction,
    },
    Settled {
        subscription: SubscriptionId,
        region: RegionId,
        progress: f64,
    },
}

impl ProgressEvent {
    pub fn subscription(&self) -> SubscriptionId {
        match self {
            Self::Changed { subscription, .. } | Self::Settled { subscription, .. } => *subscription,
        }
    }

    pub fn region(&self) -> &RegionId {
        match self {
            Self::Changed { region, .. } | Self::Settled { region, .. } => region,
        }
    }
}

#[derive(Clone, Debug)]
struct Track {
    region: Region,
    half_life_override: Option<f64>,
    last_ms: Option<f64>,
    velocity: f64,
    direction: Direction,
    anchor: f64,
    /// Raw progress seen on the last step.
    raw: f64,
    quiet_since: Option<f64>,
    settled: bool,
}

impl Track {
    fn new(region: Region) -> Self {
        let anchor = region.progress();
        Self {
            region,
            half_life_override: None,
            last_ms: None,
            velocity: 0.0,
            direction: Direction::Forward,
            anchor,
            raw: anchor,
            quiet_since: None,
            settled: false,
        }
    }

    /// Advance one frame. Returns `(changed, settled_now)`.
    fn step(&mut self, frame: ScrollFrame, settings: &ProgressSettings) -> (bool, bool) {
        let raw = self.region.raw_progress(frame.scroll_y);
        let prev = self.region.progress();
        self.raw = raw;

        let next = match self.last_ms {
            None => raw,
            Some(_) if self.region.is_degenerate() => raw,
            Some(last) => {
                let half_life = self.half_life_override.unwrap_or(settings.half_life_ms);
                let alpha = half_life_alpha(frame.now_ms - last, half_life);
                let smoothed = prev + (raw - prev) * alpha;
                if (raw - smoothed).abs() < SNAP_EPSILON {
                    raw
                } else {
                    smoothed
                }
            }
        };

        let dt_ms = self.last_ms.map_or(0.0, |last| frame.now_ms - last);
        let first = self.last_ms.is_none();
        self.last_ms = Some(frame.now_ms);
        self.velocity = if dt_ms > 0.0 {
            (next - prev) / (dt_ms / 1000.0)
        } else {
            0.0
        };

        let delta = next - self.anchor;
        if first {
            self.anchor = next;
        } else if delta > settings.direction_hysteresis {
            self.direction = Direction::Forward;
            self.anchor = next;
        } else if delta < -settings.direction_hysteresis {
            self.direction = Direction::Backward;
            self.anchor = next;
        }

        self.region.set_progress(next);
        let changed = first || next != prev;

        if self.velocity.abs() < settings.settle_velocity {
            let since = *self.quiet_since.get_or_insert(frame.now_ms);
            if !self.settled && frame.now_ms - since >= settings.settle_debounce_ms {
                self.settled = true;
                return (changed, true);
            }
        } else {
            self.quiet_since = None;
            self.settled = false;
        }
        (changed, false)
    }

    /// Smoothed progress still trails the last raw sample.
    fn is_converging(&self) -> bool {
        self.region.progress() != self.raw
    }
}

/// Normalizes scroll position into smoothed per-region progress.
///
/// The source only publishes progress; it never touches visual state. Regions are independent:
/// one region's boundary or smoothing never affects another's.
#[derive(Clone, Debug, Default)]
pub struct ProgressSource {
    pointer: ProgressSettings,
    touch: ProgressSettings,
    input: InputKind,
    tracks: BTreeMap<RegionId, Track>,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    by_region: BTreeMap<RegionId, Vec<SubscriptionId>>,
    next_subscription: u64,
    next_generation: u64,
}

impl ProgressSource {
    pub fn new(pointer: ProgressSettings, touch: ProgressSettings) -> Self {
        Self {
            pointer,
            touch,
            ..Self::default()
        }
    }

    pub fn input(&self) -> InputKind {
        self.input
    }

    pub fn set_input(&mut self, input: InputKind) {
        self.input = input;
    }

    pub fn settings(&self) -> &ProgressSettings {
        match self.input {
            InputKind::Pointer => &self.pointer,
            InputKind::Touch => &self.touch,
        }
    }

    pub fn register(&mut self, region: Region) -> ScrublineResult<()> {
        if self.tracks.contains_key(region.id()) {
            return Err(ScrublineError::validation(format!(
                "region '{}' is already registered",
                region.id()
            )));
        }
        tracing::debug!(region = %region.id(), "region registered");
        self.tracks.insert(region.id().clone(), Track::new(region));
        Ok(())
    }

    /// Remove a region together with every subscription on it.
    pub fn unregister(&mut self, id: &RegionId) -> Option<Region> {
        let track = self.tracks.remove(id)?;
        for sub in self.by_region.remove(id).unwrap_or_default() {
            self.subscriptions.remove(&sub);
        }
        tracing::debug!(region = %id, "region unregistered");
        Some(track.region)
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.tracks.get(id).map(|t| &t.region)
    }

    pub fn region_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        self.tracks.get_mut(id).map(|t| &mut t.region)
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.tracks.values().map(|t| &t.region)
    }

    pub fn progress(&self, id: &RegionId) -> Option<f64> {
        self.region(id).map(Region::progress)
    }

    /// Whether any region's smoothed progress has not reached its last raw sample, so further
    /// ticks at the same scroll position would still move it.
    pub fn is_converging(&self) -> bool {
        self.tracks.values().any(Track::is_converging)
    }

    pub fn set_pinned(&mut self, id: &RegionId, pinned: bool) {
        if let Some(r) = self.region_mut(id) {
            r.set_pinned(pinned);
        }
    }

    /// Per-region half-life, used instead of the input kind's default.
    pub fn set_half_life_override(&mut self, id: &RegionId, half_life_ms: Option<f64>) {
        if let Some(t) = self.tracks.get_mut(id) {
            t.half_life_override = half_life_ms;
        }
    }

    pub fn next_generation(&mut self) -> Generation {
        self.next_generation += 1;
        Generation(self.next_generation)
    }

    pub fn observe(&mut self, region: &RegionId, owner: Generation) -> ScrublineResult<SubscriptionId> {
        if !self.tracks.contains_key(region) {
            return Err(ScrublineError::validation(format!(
                "cannot observe unknown region '{region}'"
            )));
        }
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscriptions.insert(
            id,
            Subscription {
                id,
                region: region.clone(),
                owner,
            },
        );
        self.by_region.entry(region.clone()).or_default().push(id);
        tracing::debug!(region = %region, subscription = id.0, owner = owner.0, "subscribed");
        Ok(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let Some(sub) = self.subscriptions.remove(&id) else {
            return false;
        };
        if let Some(ids) = self.by_region.get_mut(&sub.region) {
            ids.retain(|s| *s != id);
        }
        true
    }

    /// Drop every subscription created under `owner`. Returns how many were removed.
    pub fn dispose_owner(&mut self, owner: Generation) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|_, s| s.owner != owner);
        let removed = before - self.subscriptions.len();
        let subscriptions = &self.subscriptions;
        for ids in self.by_region.values_mut() {
            ids.retain(|id| subscriptions.contains_key(id));
        }
        if removed > 0 {
            tracing::debug!(owner = owner.0, removed, "disposed subscriptions");
        }
        removed
    }

    pub fn active_subscriptions(&self) -> impl Iterator<Item = &Subscription> + '_ {
        self.subscriptions.values()
    }

    pub fn subscriptions_owned_by(&self, owner: Generation) -> Vec<SubscriptionId> {
        self.subscriptions
            .values()
            .filter(|s| s.owner == owner)
            .map(|s| s.id)
            .collect()
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscriptions.contains_key(&id)
    }

    /// Sample every region at `frame` and emit events for live subscriptions.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, frame: ScrollFrame) -> Vec<ProgressEvent> {
        let settings = *self.settings();
        let mut events = Vec::new();

        for (id, track) in &mut self.tracks {
            let (changed, settled) = track.step(frame, &settings);
            if !changed && !settled {
                continue;
            }
            let progress = track.region.progress();
            let subs = self.by_region.get(id).map_or(&[][..], Vec::as_slice);
            for &sub in subs {
                if changed {
                    events.push(ProgressEvent::Changed {
                        subscription: sub,
                        region: id.clone(),
                        progress,
                        velocity: track.velocity,
                        direction: track.direction,
                    });
                }
                if settled {
                    events.push(ProgressEvent::Settled {
                        subscription: sub,
                        region: id.clone(),
                        progress,
                    });
                }
            }
        }

        events
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
