use crate::{
    engine::scheduler::FrameTicket,
    foundation::{
        core::RegionId,
        error::{ScrublineError, ScrublineResult},
    },
    responsive::{reveal::RevealGroup, selector::VariantSelector, tier::Tier},
    scroll::region::{Boundary, RegionLayout},
    timeline::{
        evaluator::{EvaluatedFrame, Timeline},
        spec::TimelineSpec,
    },
};

/// Declarative description of one page section.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionSpec {
    pub id: RegionId,
    /// Explicit scroll offsets. Takes precedence over `layout`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<RegionLayout>,
    /// Fraction of the viewport height at which pinning starts (0 = region top at viewport top).
    #[serde(default)]
    pub pin_start_fraction: f64,
    /// Timelines, each authored for one tier.
    #[serde(default)]
    pub timelines: Vec<TimelineSpec>,
    #[serde(default)]
    pub reveals: Vec<RevealGroup>,
}

impl SectionSpec {
    pub fn new(id: impl Into<RegionId>) -> Self {
        Self {
            id: id.into(),
            boundary: None,
            layout: None,
            pin_start_fraction: 0.0,
            timelines: Vec::new(),
            reveals: Vec::new(),
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_layout(mut self, layout: RegionLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_timeline(mut self, timeline: TimelineSpec) -> Self {
        self.timelines.push(timeline);
        self
    }

    pub fn with_reveal(mut self, group: RevealGroup) -> Self {
        self.reveals.push(group);
        self
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(ScrublineError::validation("section id must be non-empty"));
        }
        if !self.pin_start_fraction.is_finite() {
            return Err(ScrublineError::validation(format!(
                "section '{}' pin_start_fraction must be finite",
                self.id
            )));
        }
        for (i, g) in self.reveals.iter().enumerate() {
            g.validate()?;
            if self.reveals[..i].iter().any(|o| o.id == g.id) {
                return Err(ScrublineError::validation(format!(
                    "section '{}' declares reveal group '{}' twice",
                    self.id, g.id
                )));
            }
        }
        for t in &self.timelines {
            t.settings.validate()?;
        }
        Ok(())
    }

    pub fn build(&self, pinned_tiers: &[Tier]) -> ScrublineResult<Section> {
        self.validate()?;
        let timelines = self
            .timelines
            .iter()
            .map(TimelineSpec::build)
            .collect::<ScrublineResult<Vec<_>>>()?;
        Ok(Section {
            id: self.id.clone(),
            boundary: self.boundary,
            layout: self.layout,
            pin_start_fraction: self.pin_start_fraction,
            timelines,
            reveals: self.reveals.clone(),
            selector: VariantSelector::new(self.id.clone(), pinned_tiers.to_vec()),
            ticket: None,
        })
    }
}

/// A mounted section: its timelines, reveal groups and the variant selected for the current tier.
#[derive(Clone, Debug)]
pub struct Section {
    pub(crate) id: RegionId,
    pub(crate) boundary: Option<Boundary>,
    pub(crate) layout: Option<RegionLayout>,
    pub(crate) pin_start_fraction: f64,
    pub(crate) timelines: Vec<Timeline>,
    pub(crate) reveals: Vec<RevealGroup>,
    pub(crate) selector: VariantSelector,
    pub(crate) ticket: Option<FrameTicket>,
}

impl Section {
    pub fn id(&self) -> &RegionId {
        &self.id
    }

    pub fn layout(&self) -> Option<RegionLayout> {
        self.layout
    }

    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    pub fn reveal_groups(&self) -> &[RevealGroup] {
        &self.reveals
    }

    pub fn selector(&self) -> &VariantSelector {
        &self.selector
    }

    /// Timelines authored for `tier`; desktop timelines when none are.
    pub fn timelines_for(&self, tier: Tier) -> Vec<&Timeline> {
        let exact: Vec<_> = self
            .timelines
            .iter()
            .filter(|t| t.settings().tier == tier)
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        self.timelines
            .iter()
            .filter(|t| t.settings().tier == Tier::Desktop)
            .collect()
    }

    /// Evaluate every timeline for `tier` at one progress value. Later timelines win on conflict.
    pub fn evaluate(&self, tier: Tier, progress: f64) -> EvaluatedFrame {
        let mut timelines = self.timelines_for(tier).into_iter();
        let Some(first) = timelines.next() else {
            return EvaluatedFrame::new(progress);
        };
        let mut frame = first.evaluate(progress);
        for t in timelines {
            frame.merge(t.evaluate(progress));
        }
        frame
    }

    pub fn half_life_for(&self, tier: Tier) -> Option<f64> {
        self.timelines_for(tier)
            .into_iter()
            .find_map(|t| t.settings().smoothing_half_life_ms)
    }
}
