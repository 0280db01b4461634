//! Scripted auto-scroll sequences.
//!
//! A demo is a list of named phases with declared durations, driven from the same frame loop as
//! everything else. Nothing here sleeps or spawns timers: [`PhaseRunner::tick`] is called once per
//! frame and writes the scroll position through the [`ScrollController`] it is handed.

use crate::{
    animation::{ease::Ease, lerp::lerp},
    foundation::{
        error::{ScrublineError, ScrublineResult},
        math::is_finite_non_negative,
    },
    scroll::controller::ScrollController,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Phase {
    pub name: String,
    pub duration_ms: f64,
    /// Scroll offset to reach by the end of the phase. `None` holds the current position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_to: Option<f64>,
    #[serde(default)]
    pub ease: Ease,
}

impl Phase {
    pub fn hold(name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            name: name.into(),
            duration_ms,
            scroll_to: None,
            ease: Ease::Linear,
        }
    }

    pub fn scroll(name: impl Into<String>, duration_ms: f64, scroll_to: f64) -> Self {
        Self {
            scroll_to: Some(scroll_to),
            ..Self::hold(name, duration_ms)
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Where a point in time falls inside a sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseCursor {
    pub index: usize,
    /// Position inside the phase, `[0, 1]`.
    pub local_t: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhaseSequence {
    phases: Vec<Phase>,
    total_ms: f64,
}

impl PhaseSequence {
    pub fn new(phases: Vec<Phase>) -> ScrublineResult<Self> {
        if phases.is_empty() {
            return Err(ScrublineError::validation(
                "phase sequence must have at least one phase",
            ));
        }
        for (i, p) in phases.iter().enumerate() {
            if p.name.trim().is_empty() {
                return Err(ScrublineError::validation(format!(
                    "phase {i} must have a name"
                )));
            }
            if phases[..i].iter().any(|o| o.name == p.name) {
                return Err(ScrublineError::validation(format!(
                    "phase name '{}' is used twice",
                    p.name
                )));
            }
            if !is_finite_non_negative(p.duration_ms) {
                return Err(ScrublineError::validation(format!(
                    "phase '{}' duration must be finite and >= 0",
                    p.name
                )));
            }
            if p.scroll_to.is_some_and(|y| !y.is_finite()) {
                return Err(ScrublineError::validation(format!(
                    "phase '{}' scroll_to must be finite",
                    p.name
                )));
            }
            p.ease.validate()?;
        }
        let total_ms = phases.iter().map(|p| p.duration_ms).sum();
        Ok(Self { phases, total_ms })
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.total_ms
    }

    /// Locate `elapsed_ms`. Returns `None` once the whole sequence has elapsed.
    pub fn locate(&self, elapsed_ms: f64) -> Option<PhaseCursor> {
        let mut start = 0.0;
        for (index, p) in self.phases.iter().enumerate() {
            let end = start + p.duration_ms;
            if elapsed_ms < end {
                let local_t = ((elapsed_ms - start) / p.duration_ms).clamp(0.0, 1.0);
                return Some(PhaseCursor { index, local_t });
            }
            start = end;
        }
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhaseTick {
    pub phase: Option<String>,
    /// Phases that completed during this tick, in order.
    pub completed: Vec<String>,
    pub scroll_y: f64,
    pub state: RunnerState,
}

/// Drives a [`PhaseSequence`]. Cancelling stops every remaining phase at once.
#[derive(Clone, Debug)]
pub struct PhaseRunner {
    sequence: PhaseSequence,
    state: RunnerState,
    started_at_ms: f64,
    index: usize,
    origin_y: f64,
}

impl PhaseRunner {
    pub fn new(sequence: PhaseSequence) -> Self {
        Self {
            sequence,
            state: RunnerState::Idle,
            started_at_ms: 0.0,
            index: 0,
            origin_y: 0.0,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn sequence(&self) -> &PhaseSequence {
        &self.sequence
    }

    pub fn start(&mut self, now_ms: f64, scroll: &dyn ScrollController) {
        self.state = RunnerState::Running;
        self.started_at_ms = now_ms;
        self.index = 0;
        self.origin_y = scroll.scroll_y();
        tracing::debug!(phases = self.sequence.phases.len(), "phase sequence started");
    }

    pub fn cancel(&mut self) {
        if self.state == RunnerState::Running {
            tracing::debug!(index = self.index, "phase sequence cancelled");
            self.state = RunnerState::Cancelled;
        }
    }

    /// Advance to `now_ms`. Phases skipped over by a long frame still land on their end position.
    pub fn tick(&mut self, now_ms: f64, scroll: &mut dyn ScrollController) -> PhaseTick {
        if self.state != RunnerState::Running {
            return PhaseTick {
                phase: None,
                completed: Vec::new(),
                scroll_y: scroll.scroll_y(),
                state: self.state,
            };
        }

        let elapsed = now_ms - self.started_at_ms;
        let cursor = self.sequence.locate(elapsed);
        let reached = cursor.map_or(self.sequence.phases.len(), |c| c.index);

        let mut completed = Vec::new();
        while self.index < reached {
            let p = &self.sequence.phases[self.index];
            if let Some(y) = p.scroll_to {
                scroll.scroll_to(y);
            }
            self.origin_y = scroll.scroll_y();
            completed.push(p.name.clone());
            self.index += 1;
        }

        let phase = match cursor {
            Some(c) => {
                let p = &self.sequence.phases[c.index];
                if let Some(target) = p.scroll_to {
                    scroll.scroll_to(lerp(self.origin_y, target, p.ease.apply(c.local_t)));
                }
                Some(p.name.clone())
            }
            None => {
                tracing::debug!("phase sequence finished");
                self.state = RunnerState::Finished;
                None
            }
        };

        PhaseTick {
            phase,
            completed,
            scroll_y: scroll.scroll_y(),
            state: self.state,
        }
    }
}
