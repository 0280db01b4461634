use std::collections::{BTreeMap, BTreeSet};

use crate::{
    animation::property::Property,
    foundation::{
        core::{ProgressWindow, TargetId},
        error::{ScrublineError, ScrublineResult},
        math::sanitize_progress,
    },
    responsive::tier::Tier,
    scene::registry::TargetRegistry,
    timeline::{
        motion::{MotionSegment, PathSample, PathSampler},
        spec::TimelineEntry,
        stage::Stage,
    },
};

/// Per-target property values.
pub type PropertyValues = BTreeMap<Property, f64>;

/// Visual state for one progress value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct EvaluatedFrame {
    /// Progress the frame was evaluated at, after clamping.
    pub progress: f64,
    /// Values keyed by target, then property. Every value is within its property domain.
    pub targets: BTreeMap<TargetId, PropertyValues>,
}

impl EvaluatedFrame {
    pub fn new(progress: f64) -> Self {
        Self {
            progress,
            targets: BTreeMap::new(),
        }
    }

    pub fn get(&self, target: &str, property: Property) -> Option<f64> {
        self.targets.get(target)?.get(&property).copied()
    }

    pub fn insert(&mut self, target: TargetId, property: Property, value: f64) {
        self.targets.entry(target).or_default().insert(property, value);
    }

    /// Overlay `other` on top of `self`; values from `other` win.
    pub fn merge(&mut self, other: EvaluatedFrame) {
        for (target, values) in other.targets {
            self.targets.entry(target).or_default().extend(values);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn value_count(&self) -> usize {
        self.targets.values().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TargetId, Property, f64)> + '_ {
        self.targets
            .iter()
            .flat_map(|(t, values)| values.iter().map(move |(p, v)| (t, *p, *v)))
    }
}

/// Timeline-level settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSettings {
    /// Tier the timeline is authored for.
    #[serde(default)]
    pub tier: Tier,
    /// Overrides the engine's smoothing half-life for the owning region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoothing_half_life_ms: Option<f64>,
}

impl TimelineSettings {
    pub fn validate(&self) -> ScrublineResult<()> {
        if let Some(h) = self.smoothing_half_life_ms {
            if !(h.is_finite() && h >= 0.0) {
                return Err(ScrublineError::validation(
                    "smoothing_half_life_ms must be finite and >= 0",
                ));
            }
        }
        Ok(())
    }
}

/// Two stages writing the same (target, property) with overlapping windows.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlapWarning {
    pub target: TargetId,
    pub property: Property,
    pub earlier: ProgressWindow,
    pub later: ProgressWindow,
}

/// Motion segment dropped at build time because its path could not be measured.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkippedMotion {
    pub target: TargetId,
    pub reason: String,
}

#[derive(Clone, Copy, Debug)]
enum SourceKind {
    Stage(usize),
    Motion { index: usize, property: Property },
}

#[derive(Clone, Copy, Debug)]
struct Source {
    window: ProgressWindow,
    kind: SourceKind,
}

/// All sources writing one (target, property), in declaration order.
#[derive(Clone, Debug)]
struct Channel {
    target: TargetId,
    property: Property,
    sources: Vec<Source>,
}

#[derive(Clone, Debug)]
struct CompiledMotion {
    segment: MotionSegment,
    sampler: PathSampler,
}

/// Ordered stages and motion segments forming a pure `progress -> visual state` function.
///
/// For each (target, property) the governing entry at progress `p` is:
///
/// 1. the last-declared entry whose window contains `p`, else
/// 2. the entry that ended most recently before `p` (its `to` value), else
/// 3. the earliest-starting entry (its `from` value).
///
/// Ties in (2) and (3) go to the later-declared entry. Overlapping windows on the same pair are
/// reported by [`Timeline::overlaps`] and resolved by rule (1), never averaged.
#[derive(Clone, Debug)]
pub struct Timeline {
    settings: TimelineSettings,
    stages: Vec<Stage>,
    motions: Vec<CompiledMotion>,
    skipped: Vec<SkippedMotion>,
    channels: Vec<Channel>,
    overlaps: Vec<OverlapWarning>,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    pub fn settings(&self) -> TimelineSettings {
        self.settings
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn motion_count(&self) -> usize {
        self.motions.len()
    }

    pub fn skipped_motions(&self) -> &[SkippedMotion] {
        &self.skipped
    }

    pub fn overlaps(&self) -> &[OverlapWarning] {
        &self.overlaps
    }

    pub fn targets(&self) -> BTreeSet<&TargetId> {
        self.channels.iter().map(|c| &c.target).collect()
    }

    /// Evaluate every channel at `progress`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn evaluate(&self, progress: f64) -> EvaluatedFrame {
        self.evaluate_filtered(progress, |_| true)
    }

    /// Evaluate only targets present in `registry`; the rest are skipped silently.
    pub fn evaluate_for<H>(&self, progress: f64, registry: &TargetRegistry<H>) -> EvaluatedFrame {
        self.evaluate_filtered(progress, |t| registry.contains(t))
    }

    fn evaluate_filtered(&self, progress: f64, keep: impl Fn(&TargetId) -> bool) -> EvaluatedFrame {
        let p = sanitize_progress(progress);
        let mut samples: Vec<Option<(f64, PathSample)>> = vec![None; self.motions.len()];
        let mut frame = EvaluatedFrame::new(p);

        for ch in &self.channels {
            if !keep(&ch.target) {
                continue;
            }
            let Some(src) = governing(&ch.sources, p) else {
                continue;
            };

            let raw = match src.kind {
                SourceKind::Stage(i) => self.stages[i].value_at(p),
                SourceKind::Motion { index, property } => {
                    let (pp, sample) = *samples[index].get_or_insert_with(|| {
                        let m = &self.motions[index];
                        let pp = m.segment.path_progress_at(p);
                        (pp, m.sampler.sample(pp))
                    });
                    match property {
                        Property::TranslateX => sample.point.x,
                        Property::TranslateY => sample.point.y,
                        Property::Rotation => sample.angle_deg,
                        Property::PathProgress => pp,
                        _ => continue,
                    }
                }
            };

            if !raw.is_finite() {
                tracing::debug!(target_id = %ch.target, property = %ch.property, "skipping non-finite value");
                continue;
            }
            frame.insert(ch.target.clone(), ch.property, ch.property.clamp_to_domain(raw));
        }

        frame
    }
}

fn governing(sources: &[Source], p: f64) -> Option<&Source> {
    if let Some(active) = sources.iter().rev().find(|s| s.window.contains(p)) {
        return Some(active);
    }

    let mut ended: Option<&Source> = None;
    for s in sources.iter().filter(|s| s.window.end < p) {
        if ended.is_none_or(|e| s.window.end >= e.window.end) {
            ended = Some(s);
        }
    }
    if ended.is_some() {
        return ended;
    }

    let mut pending: Option<&Source> = None;
    for s in sources {
        if pending.is_none_or(|e| s.window.start <= e.window.start) {
            pending = Some(s);
        }
    }
    pending
}

/// Collects entries in declaration order and compiles them into a [`Timeline`].
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    settings: TimelineSettings,
    entries: Vec<TimelineEntry>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: TimelineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.entries.push(TimelineEntry::Stage(stage));
        self
    }

    pub fn motion(mut self, motion: MotionSegment) -> Self {
        self.entries.push(TimelineEntry::Motion(motion));
        self
    }

    pub fn entry(mut self, entry: TimelineEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn build(self) -> ScrublineResult<Timeline> {
        self.settings.validate()?;

        let mut stages = Vec::new();
        let mut motions = Vec::new();
        let mut skipped = Vec::new();
        let mut order = Vec::new();

        for entry in self.entries {
            match entry {
                TimelineEntry::Stage(stage) => {
                    stage.validate()?;
                    order.push(SourceKind::Stage(stages.len()));
                    stages.push(stage);
                }
                TimelineEntry::Stagger(spec) => {
                    for stage in spec.expand()? {
                        stage.validate()?;
                        order.push(SourceKind::Stage(stages.len()));
                        stages.push(stage);
                    }
                }
                TimelineEntry::Motion(segment) => {
                    segment.validate()?;
                    match PathSampler::from_svg(&segment.path) {
                        Ok(sampler) => {
                            order.push(SourceKind::Motion {
                                index: motions.len(),
                                property: Property::PathProgress,
                            });
                            motions.push(CompiledMotion { segment, sampler });
                        }
                        Err(err) => {
                            tracing::warn!(
                                target_id = %segment.target,
                                error = %err,
                                "skipping motion segment with unusable path"
                            );
                            skipped.push(SkippedMotion {
                                target: segment.target,
                                reason: err.to_string(),
                            });
                        }
                    }
                }
            }
        }

        let mut by_pair: BTreeMap<(TargetId, Property), Vec<Source>> = BTreeMap::new();
        for kind in order {
            match kind {
                SourceKind::Stage(i) => {
                    let stage = &stages[i];
                    for target in &stage.targets {
                        by_pair
                            .entry((target.clone(), stage.property))
                            .or_default()
                            .push(Source {
                                window: stage.window,
                                kind,
                            });
                    }
                }
                SourceKind::Motion { index, .. } => {
                    let seg = &motions[index].segment;
                    let mut props = vec![
                        Property::TranslateX,
                        Property::TranslateY,
                        Property::PathProgress,
                    ];
                    if seg.auto_rotate {
                        props.push(Property::Rotation);
                    }
                    for property in props {
                        by_pair
                            .entry((seg.target.clone(), property))
                            .or_default()
                            .push(Source {
                                window: seg.window,
                                kind: SourceKind::Motion { index, property },
                            });
                    }
                }
            }
        }

        let channels: Vec<Channel> = by_pair
            .into_iter()
            .map(|((target, property), sources)| Channel {
                target,
                property,
                sources,
            })
            .collect();

        let mut overlaps = Vec::new();
        for ch in &channels {
            for (i, a) in ch.sources.iter().enumerate() {
                for b in &ch.sources[i + 1..] {
                    if a.window.overlaps_interior(b.window) {
                        tracing::warn!(
                            target_id = %ch.target,
                            property = %ch.property,
                            "overlapping windows on one property; the later entry wins"
                        );
                        overlaps.push(OverlapWarning {
                            target: ch.target.clone(),
                            property: ch.property,
                            earlier: a.window,
                            later: b.window,
                        });
                    }
                }
            }
        }

        Ok(Timeline {
            settings: self.settings,
            stages,
            motions,
            skipped,
            channels,
            overlaps,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/evaluator.rs"]
mod tests;
