use crate::{
    animation::{ease::Ease, ops::slot_targets, ops::stagger_windows, property::Property},
    foundation::{
        core::{ProgressWindow, TargetId},
        error::{ScrublineError, ScrublineResult},
    },
    timeline::{
        evaluator::{Timeline, TimelineBuilder, TimelineSettings},
        motion::MotionSegment,
        stage::Stage,
    },
};

/// `count` content slots named `prefix-0 .. prefix-{count-1}`.
///
/// Content fetched from the CMS only decides how many slots exist; the values never reach the
/// animation logic.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlotSpec {
    pub prefix: String,
    pub count: usize,
}

/// One stage per target, windows spread across `span` by [`stagger_windows`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerSpec {
    #[serde(default)]
    pub targets: Vec<TargetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<SlotSpec>,
    pub property: Property,
    pub span: ProgressWindow,
    pub each: f64,
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub ease: Ease,
}

impl StaggerSpec {
    /// Explicit targets first, then generated slot targets.
    pub fn resolved_targets(&self) -> Vec<TargetId> {
        let mut out = self.targets.clone();
        if let Some(slots) = &self.slots {
            out.extend(slot_targets(&slots.prefix, slots.count));
        }
        out
    }

    pub fn expand(&self) -> ScrublineResult<Vec<Stage>> {
        let targets = self.resolved_targets();
        if targets.is_empty() {
            return Err(ScrublineError::validation(format!(
                "{} stagger resolves to no targets",
                self.property
            )));
        }
        let windows = stagger_windows(targets.len(), self.span, self.each)?;
        Ok(targets
            .into_iter()
            .zip(windows)
            .map(|(target, window)| {
                Stage::new([target], self.property, window, self.from, self.to).with_ease(self.ease)
            })
            .collect())
    }
}

/// Declared timeline entry, as it appears in scene files.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimelineEntry {
    Stage(Stage),
    Motion(MotionSegment),
    Stagger(StaggerSpec),
}

/// Serializable timeline description.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimelineSpec {
    #[serde(default)]
    pub settings: TimelineSettings,
    #[serde(default)]
    pub entries: Vec<TimelineEntry>,
}

impl TimelineSpec {
    pub fn build(&self) -> ScrublineResult<Timeline> {
        self.entries
            .iter()
            .cloned()
            .fold(
                TimelineBuilder::new().settings(self.settings),
                TimelineBuilder::entry,
            )
            .build()
    }
}
