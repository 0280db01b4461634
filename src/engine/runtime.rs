use std::collections::BTreeMap;

use crate::{
    animation::property::Property,
    engine::{
        scheduler::{FrameScheduler, FrameTicket},
        section::{Section, SectionSpec},
    },
    foundation::{
        core::{RegionId, ScrollFrame, Viewport},
        error::{ScrublineError, ScrublineResult},
    },
    responsive::{
        selector::{TierSwitch, Variant},
        tier::{Breakpoints, Tier},
    },
    scene::registry::TargetRegistry,
    scroll::{
        pin::{PinState, PinUpdate},
        progress::{InputKind, ProgressEvent, ProgressSettings, ProgressSource},
        region::{Region, RegionLayout},
    },
    timeline::evaluator::EvaluatedFrame,
};

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub breakpoints: Breakpoints,
    #[serde(default)]
    pub input: InputKind,
    #[serde(default = "ProgressSettings::desktop")]
    pub desktop: ProgressSettings,
    #[serde(default = "ProgressSettings::touch")]
    pub touch: ProgressSettings,
    /// Consecutive failed layout passes before an unresolved region is reported.
    #[serde(default = "default_max_unresolved_layout_passes")]
    pub max_unresolved_layout_passes: u32,
    /// Tiers that get the pinned, scrubbed variant. Every other tier gets entry reveals.
    #[serde(default = "default_pinned_tiers")]
    pub pinned_tiers: Vec<Tier>,
}

fn default_max_unresolved_layout_passes() -> u32 {
    3
}

fn default_pinned_tiers() -> Vec<Tier> {
    vec![Tier::Desktop]
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            input: InputKind::default(),
            desktop: ProgressSettings::desktop(),
            touch: ProgressSettings::touch(),
            max_unresolved_layout_passes: default_max_unresolved_layout_passes(),
            pinned_tiers: default_pinned_tiers(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> ScrublineResult<()> {
        self.breakpoints.validate()?;
        self.desktop.validate()?;
        self.touch.validate()?;
        if self.max_unresolved_layout_passes == 0 {
            return Err(ScrublineError::config(
                "max_unresolved_layout_passes must be >= 1",
            ));
        }
        Ok(())
    }
}

/// Inputs for one animation frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameInput {
    pub scroll_y: f64,
    pub viewport: Viewport,
    pub now_ms: f64,
}

/// Evaluated state of one section for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionFrame {
    pub section: RegionId,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinUpdate>,
    /// Progress snapshot every stage of the section was evaluated against.
    pub progress: f64,
    pub state: EvaluatedFrame,
    #[serde(skip)]
    pub ticket: Option<FrameTicket>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameOutput {
    pub now_ms: f64,
    pub events: Vec<ProgressEvent>,
    /// Tier switches applied at the end of this frame; they affect the next one.
    pub switches: Vec<TierSwitch>,
    pub sections: Vec<SectionFrame>,
}

impl FrameOutput {
    pub fn section(&self, id: &str) -> Option<&SectionFrame> {
        self.sections.iter().find(|s| s.section.as_str() == id)
    }
}

/// Owns the progress source, the frame scheduler and every mounted section of a page.
///
/// Construct one per page and pass it around; nothing in the crate keeps global animation state.
#[derive(Debug)]
pub struct AnimationEngine {
    settings: EngineSettings,
    source: ProgressSource,
    scheduler: FrameScheduler,
    sections: BTreeMap<RegionId, Section>,
    viewport: Option<Viewport>,
    tier: Option<Tier>,
}

impl AnimationEngine {
    pub fn new(settings: EngineSettings) -> ScrublineResult<Self> {
        settings.validate()?;
        let mut source = ProgressSource::new(settings.desktop, settings.touch);
        source.set_input(settings.input);
        Ok(Self {
            settings,
            source,
            scheduler: FrameScheduler::new(),
            sections: BTreeMap::new(),
            viewport: None,
            tier: None,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn source(&self) -> &ProgressSource {
        &self.source
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.get(id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &RegionId> + '_ {
        self.sections.keys()
    }

    pub fn region(&self, id: &RegionId) -> Option<&Region> {
        self.source.region(id)
    }

    pub fn set_input(&mut self, input: InputKind) {
        self.source.set_input(input);
    }

    /// Register a section. If a viewport is known its layout is resolved and a variant selected
    /// right away; otherwise that happens on the first frame.
    pub fn mount(&mut self, spec: &SectionSpec) -> ScrublineResult<()> {
        if self.sections.contains_key(&spec.id) {
            return Err(ScrublineError::validation(format!(
                "section '{}' is already mounted",
                spec.id
            )));
        }
        let mut section = spec.build(&self.settings.pinned_tiers)?;
        let region = match section.boundary {
            Some(b) => Region::with_boundary(section.id.clone(), b),
            None => Region::new(section.id.clone()),
        };
        self.source.register(region)?;

        if let (Some(viewport), Some(tier)) = (self.viewport, self.tier) {
            if let Err(err) = self.prepare_section(&mut section, viewport, tier) {
                self.source.unregister(&section.id);
                return Err(err);
            }
        }
        tracing::debug!(section = %spec.id, "section mounted");
        self.sections.insert(section.id.clone(), section);
        Ok(())
    }

    /// Dispose a section's variant and forget its region. Returns false if it was not mounted.
    pub fn unmount(&mut self, id: &RegionId) -> bool {
        let Some(mut section) = self.sections.remove(id) else {
            return false;
        };
        section.selector.teardown(&mut self.source, &mut self.scheduler);
        self.source.unregister(id);
        tracing::debug!(section = %id, "section unmounted");
        true
    }

    /// Apply a new viewport between frames: re-run layout and switch variants where the tier changed.
    pub fn resize(&mut self, viewport: Viewport) -> ScrublineResult<Vec<TierSwitch>> {
        self.apply_viewport(viewport)
    }

    /// Replace a section's measured layout and run a layout pass. Returns whether it resolved.
    pub fn relayout(
        &mut self,
        id: &RegionId,
        layout: Option<RegionLayout>,
    ) -> ScrublineResult<bool> {
        let max = self.settings.max_unresolved_layout_passes;
        let section = self
            .sections
            .get_mut(id)
            .ok_or_else(|| ScrublineError::validation(format!("unknown section '{id}'")))?;
        section.layout = layout;
        let Some(viewport) = self.viewport else {
            return Ok(false);
        };
        Ok(layout_pass(&mut self.source, section, viewport, max))
    }

    /// Whether more frames are needed without new scroll input: a reveal is mid-animation or a
    /// region's smoothed progress has not caught up with its scroll position yet.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        self.source.is_converging()
            || self.sections.values().any(|s| match s.selector.variant() {
                Some(Variant::Reveal(v)) => v.reveals.iter().any(|r| r.is_animating(now_ms)),
                _ => false,
            })
    }

    /// Run one frame.
    ///
    /// Each region's progress is read once and every stage of the region is evaluated against that
    /// snapshot. A viewport change seen here is applied after evaluation, so it shows up next frame.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame(&mut self, input: FrameInput) -> ScrublineResult<FrameOutput> {
        let mut switches = Vec::new();
        if self.viewport.is_none() {
            switches.extend(self.apply_viewport(input.viewport)?);
        }

        let events = self.source.tick(ScrollFrame {
            scroll_y: input.scroll_y,
            now_ms: input.now_ms,
        });

        let mut sections = Vec::with_capacity(self.sections.len());
        for (id, section) in &mut self.sections {
            let Some(tier) = section.selector.tier() else {
                continue;
            };
            let snapshot = self.source.progress(id).unwrap_or(1.0);
            let layout_top = section.layout.map(|l| l.top);

            let (owner, pin, revealed) = match section.selector.variant_mut() {
                Some(Variant::Pinned(v)) => {
                    let Some(region) = self.source.region(id) else {
                        continue;
                    };
                    (v.owner, Some(v.pin.update(region, input.scroll_y)), None)
                }
                Some(Variant::Reveal(v)) => {
                    let mut state = EvaluatedFrame::new(snapshot);
                    for r in &mut v.reveals {
                        let top = r.group().top.or(layout_top);
                        let in_viewport = top.map_or(f64::NAN, |t| t - input.scroll_y);
                        r.observe_entry(in_viewport, input.viewport.height, input.now_ms);
                        state.merge(r.evaluate(input.now_ms));
                    }
                    (v.owner, None, Some(state))
                }
                None => continue,
            };

            let (progress, state) = match (&pin, revealed) {
                (Some(update), _) => {
                    self.source
                        .set_pinned(id, update.state == PinState::Pinned);
                    (update.progress, section.evaluate(tier, update.progress))
                }
                (None, Some(state)) => (snapshot, state),
                (None, None) => continue,
            };

            let ticket = self.scheduler.request(owner);
            if let Some(stale) = section.ticket.replace(ticket) {
                self.scheduler.complete(&stale);
            }

            sections.push(SectionFrame {
                section: id.clone(),
                tier,
                pin,
                progress,
                state,
                ticket: Some(ticket),
            });
        }

        if self.viewport != Some(input.viewport) {
            switches.extend(self.apply_viewport(input.viewport)?);
        }

        Ok(FrameOutput {
            now_ms: input.now_ms,
            events,
            switches,
            sections,
        })
    }

    /// Forward a section frame to the renderer through `registry`.
    ///
    /// Frames whose ticket was superseded or disposed by a tier switch are dropped. Returns the
    /// number of values applied.
    pub fn apply<H, F>(
        &mut self,
        frame: &SectionFrame,
        registry: &TargetRegistry<H>,
        sink: F,
    ) -> usize
    where
        F: FnMut(&H, Property, f64),
    {
        if let Some(ticket) = frame.ticket {
            if !self.scheduler.complete(&ticket) {
                tracing::debug!(section = %frame.section, "dropping stale frame");
                return 0;
            }
            if let Some(section) = self.sections.get_mut(&frame.section) {
                if section.ticket == Some(ticket) {
                    section.ticket = None;
                }
            }
        }
        registry.apply(&frame.state, sink)
    }

    fn apply_viewport(&mut self, viewport: Viewport) -> ScrublineResult<Vec<TierSwitch>> {
        let tier = self.settings.breakpoints.classify(viewport.width);
        if self.tier != Some(tier) {
            tracing::debug!(width = viewport.width, tier = ?tier, "tier changed");
        }
        self.viewport = Some(viewport);
        self.tier = Some(tier);

        let mut switches = Vec::new();
        let max = self.settings.max_unresolved_layout_passes;
        for section in self.sections.values_mut() {
            layout_pass(&mut self.source, section, viewport, max);
            let switch = section.selector.select(
                tier,
                &section.reveals,
                &mut self.source,
                &mut self.scheduler,
            )?;
            if let Some(switch) = switch {
                self.source
                    .set_half_life_override(&section.id, section.half_life_for(tier));
                section.ticket = None;
                switches.push(switch);
            }
        }
        Ok(switches)
    }

    fn prepare_section(
        &mut self,
        section: &mut Section,
        viewport: Viewport,
        tier: Tier,
    ) -> ScrublineResult<()> {
        layout_pass(
            &mut self.source,
            section,
            viewport,
            self.settings.max_unresolved_layout_passes,
        );
        section
            .selector
            .select(tier, &section.reveals, &mut self.source, &mut self.scheduler)?;
        self.source
            .set_half_life_override(&section.id, section.half_life_for(tier));
        Ok(())
    }
}

fn layout_pass(
    source: &mut ProgressSource,
    section: &mut Section,
    viewport: Viewport,
    max_passes: u32,
) -> bool {
    let Some(region) = source.region_mut(&section.id) else {
        return false;
    };
    if section.boundary.is_some() {
        return region.check_fixed_boundary(max_passes);
    }
    region.resolve_layout(
        section.layout,
        viewport.height,
        section.pin_start_fraction,
        max_passes,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/engine/runtime.rs"]
mod tests;
