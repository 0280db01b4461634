//! Scrubline is a scroll-synchronized animation sequencer.
//!
//! A page registers sections with an [`AnimationEngine`]. Each frame, raw scroll position becomes
//! smoothed per-region progress, and progress drives either a pinned, scrubbed [`Timeline`] or a
//! one-shot entry reveal, depending on the device [`Tier`]. The output is a map of
//! `(target, property) -> value` for the rendering layer to apply through a [`TargetRegistry`].
//!
//! - Describe a page with [`SceneConfig`] (or build [`SectionSpec`]s directly)
//! - Feed [`FrameInput`]s to [`AnimationEngine::frame`]
//! - Apply each [`SectionFrame`] with [`AnimationEngine::apply`]
//!
//! See [`guide`] for the evaluation rules in detail.
#![forbid(unsafe_code)]

mod foundation;

/// Easing curves, interpolation and animatable properties.
pub mod animation;
/// Engine runtime: sections, frame loop and frame scheduling.
pub mod engine;
pub mod guide;
/// Scripted auto-scroll demos.
pub mod phases;
/// Device tiers, entry reveals and variant selection.
pub mod responsive;
/// Scene files and the target registry.
pub mod scene;
/// Scroll progress, regions and pinning.
pub mod scroll;
/// Stages, motion paths and timeline evaluation.
pub mod timeline;

pub use crate::foundation::core::{
    BezPath, Point, ProgressWindow, RegionId, ScrollFrame, TargetId, Vec2, Viewport,
};
pub use crate::foundation::error::{ScrublineError, ScrublineResult};

pub use crate::animation::{ease::Ease, lerp::lerp, property::Property};
pub use crate::engine::runtime::{
    AnimationEngine, EngineSettings, FrameInput, FrameOutput, SectionFrame,
};
pub use crate::engine::section::SectionSpec;
pub use crate::phases::{Phase, PhaseRunner, PhaseSequence};
pub use crate::responsive::{
    reveal::RevealGroup,
    tier::{Breakpoints, Tier},
};
pub use crate::scene::{config::SceneConfig, registry::TargetRegistry};
pub use crate::scroll::{
    controller::{ScrollController, SimulatedScroll},
    pin::{PinState, PinTransition},
    progress::{InputKind, ProgressEvent, ProgressSettings},
    region::{Boundary, RegionLayout},
};
pub use crate::timeline::{
    evaluator::{EvaluatedFrame, Timeline, TimelineBuilder},
    motion::{MotionSegment, PathSampler},
    spec::{TimelineEntry, TimelineSpec},
    stage::Stage,
};
