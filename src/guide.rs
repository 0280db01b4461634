//! # Scrubline guide
//!
//! This module is a standalone walkthrough of how a scroll position turns into visual state. It
//! has no items of its own.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Region`](crate::scroll::region::Region): a tracked scroll range with a start/end
//!   [`Boundary`](crate::Boundary), measured from layout or given directly
//! - [`ProgressSource`](crate::scroll::progress::ProgressSource): turns scroll position into
//!   smoothed `[0, 1]` progress per region and emits change/settle events to subscribers
//! - [`Stage`](crate::Stage): one property of one or more targets moving `from -> to` across a
//!   progress window
//! - [`Timeline`](crate::Timeline): ordered stages and motion segments; a pure function of
//!   progress
//! - [`PinController`](crate::scroll::pin::PinController): before / pinned / after state machine
//! - [`VariantSelector`](crate::responsive::selector::VariantSelector): pinned timeline on wide
//!   screens, one-shot entry reveals on narrow ones
//! - [`AnimationEngine`](crate::AnimationEngine): owns all of the above for one page
//!
//! One frame runs in this order:
//!
//! 1. Sample scroll: [`ProgressSource::tick`](crate::scroll::progress::ProgressSource::tick)
//! 2. Per section, read the region's progress once and run its variant
//! 3. Evaluate: [`Timeline::evaluate`](crate::Timeline::evaluate) or
//!    [`RevealAnimation::evaluate`](crate::responsive::reveal::RevealAnimation::evaluate)
//! 4. Hand the result to the renderer: [`AnimationEngine::apply`](crate::AnimationEngine::apply)
//!
//! ---
//!
//! ## Progress
//!
//! Raw progress is `clamp((scroll_y - start) / (end - start), 0, 1)`. A region whose boundary is
//! unknown, or whose `end <= start`, reads as `1`: everything is shown in its final state rather
//! than hidden behind a broken measurement.
//!
//! Smoothed progress follows raw progress with a half-life (`0` disables smoothing) and snaps onto
//! it once the two are within [`SNAP_EPSILON`](crate::scroll::progress::SNAP_EPSILON). Touch
//! input uses a shorter half-life and settle debounce than pointer input.
//!
//! ---
//!
//! ## Stage evaluation
//!
//! For a stage with window `[start, end]`:
//!
//! - `p < start`: the stage holds `from`
//! - `p > end`: the stage holds `to`
//! - otherwise: `lerp(from, to, ease((p - start) / (end - start)))`
//!
//! At `p == start` the value is exactly `from` and at `p == end` exactly `to`, for every ease.
//!
//! When several stages write the same (target, property):
//!
//! 1. among stages whose window contains `p`, the last declared wins
//! 2. otherwise the stage that ended most recently supplies its `to`
//! 3. otherwise the earliest-starting stage supplies its `from`
//!
//! Overlaps beyond a shared boundary point are reported as
//! [`OverlapWarning`](crate::timeline::evaluator::OverlapWarning)s and logged; values are never
//! averaged.
//!
//! Outputs are clamped to their property domain: opacity and path progress to `[0, 1]`, scale and
//! blur to `>= 0`.
//!
//! ### Motion paths
//!
//! A [`MotionSegment`](crate::MotionSegment) moves a marker along SVG path data by arc length.
//! Path progress is clamped to `[0, 1]` even under `BackOut`/`ElasticOut`, so the marker parks at
//! the path end. A segment whose path cannot be parsed or has zero length is dropped at build time
//! with a warning; the rest of the timeline still evaluates.
//!
//! ---
//!
//! ## Pinning
//!
//! The pin state is derived from `scroll_y` against the boundary on each update. Jumping straight
//! across a region yields both crossings (`Enter` then `Leave`) in one update. Leaving forward
//! forces progress `1`; leaving backward forces `0`. Re-entering pins again; nothing is latched.
//!
//! ---
//!
//! ## Tiers
//!
//! Widths below `768` are mobile, below `1024` tablet, the rest desktop
//! ([`Breakpoints`](crate::Breakpoints)). Pinned tiers (desktop by default) scrub timelines; the
//! others fade reveal groups in once the container top reaches a fraction of the viewport height
//! (default `0.85`), at most once per mount.
//!
//! A viewport change seen during [`AnimationEngine::frame`](crate::AnimationEngine::frame) is
//! applied after that frame is evaluated. The old variant's subscriptions and frame tickets are
//! disposed before the new variant subscribes, so a frame evaluated for the old tier can no longer
//! be applied.
//!
//! ---
//!
//! ## Scene files
//!
//! [`SceneConfig`](crate::SceneConfig) is the JSON form of a page: engine settings, sections with
//! timelines and reveal groups, and an optional demo phase list. `scrubline validate --in
//! scene.json` checks one; `scrubline eval` runs it against a list of scroll positions and prints
//! the evaluated frames.
