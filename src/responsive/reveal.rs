use crate::{
    animation::{ease::Ease, lerp::lerp, property::Property},
    foundation::{
        core::TargetId,
        error::{ScrublineError, ScrublineResult},
        math::is_finite_non_negative,
    },
    timeline::evaluator::EvaluatedFrame,
};

/// Targets that fade in together once their container scrolls into view.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealGroup {
    pub id: String,
    pub targets: Vec<TargetId>,
    /// Container top in document px. Defaults to the owning section's layout top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    /// Fraction of the viewport height the container top must reach.
    #[serde(default = "default_trigger_fraction")]
    pub trigger_fraction: f64,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f64,
    /// Delay between consecutive targets.
    #[serde(default)]
    pub stagger_ms: f64,
    /// Starting vertical offset; each target settles at 0.
    #[serde(default = "default_translate_y")]
    pub translate_y: f64,
    #[serde(default = "default_reveal_ease")]
    pub ease: Ease,
}

fn default_trigger_fraction() -> f64 {
    0.85
}

fn default_duration_ms() -> f64 {
    600.0
}

fn default_translate_y() -> f64 {
    24.0
}

fn default_reveal_ease() -> Ease {
    Ease::OutCubic
}

impl RevealGroup {
    pub fn new<I, T>(id: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        Self {
            id: id.into(),
            targets: targets.into_iter().map(Into::into).collect(),
            top: None,
            trigger_fraction: default_trigger_fraction(),
            duration_ms: default_duration_ms(),
            stagger_ms: 0.0,
            translate_y: default_translate_y(),
            ease: default_reveal_ease(),
        }
    }

    pub fn with_top(mut self, top: f64) -> Self {
        self.top = Some(top);
        self
    }

    pub fn with_stagger_ms(mut self, stagger_ms: f64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.targets.is_empty() {
            return Err(ScrublineError::validation(format!(
                "reveal group '{}' must name at least one target",
                self.id
            )));
        }
        if !(self.trigger_fraction.is_finite() && (0.0..=1.0).contains(&self.trigger_fraction)) {
            return Err(ScrublineError::validation(format!(
                "reveal group '{}' trigger_fraction must be within [0, 1]",
                self.id
            )));
        }
        if !is_finite_non_negative(self.duration_ms) || !is_finite_non_negative(self.stagger_ms) {
            return Err(ScrublineError::validation(format!(
                "reveal group '{}' timings must be finite and >= 0",
                self.id
            )));
        }
        if !self.translate_y.is_finite() {
            return Err(ScrublineError::validation(format!(
                "reveal group '{}' translate_y must be finite",
                self.id
            )));
        }
        self.ease.validate()
    }

    /// Time from trigger until the last target finishes.
    pub fn total_duration_ms(&self) -> f64 {
        let n = self.targets.len().saturating_sub(1) as f64;
        self.duration_ms + self.stagger_ms * n
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RevealState {
    Waiting,
    Playing { started_at_ms: f64 },
    Revealed,
}

/// One-shot viewport-entry reveal. Plays at most once per mount.
#[derive(Clone, Debug)]
pub struct RevealAnimation {
    group: RevealGroup,
    state: RevealState,
}

impl RevealAnimation {
    pub fn new(group: RevealGroup) -> Self {
        Self {
            group,
            state: RevealState::Waiting,
        }
    }

    pub fn group(&self) -> &RevealGroup {
        &self.group
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// True once the entry latch has fired.
    pub fn is_triggered(&self) -> bool {
        !matches!(self.state, RevealState::Waiting)
    }

    /// Feed the container's top edge in viewport px. Returns true on the call that triggers.
    pub fn observe_entry(&mut self, container_top: f64, viewport_height: f64, now_ms: f64) -> bool {
        if self.is_triggered() {
            return false;
        }
        if !(container_top.is_finite() && viewport_height.is_finite()) {
            self.force_reveal();
            return true;
        }
        if container_top <= self.group.trigger_fraction * viewport_height {
            tracing::debug!(group = %self.group.id, now_ms, "reveal triggered");
            self.state = RevealState::Playing {
                started_at_ms: now_ms,
            };
            return true;
        }
        false
    }

    /// Jump straight to the fully revealed state.
    pub fn force_reveal(&mut self) {
        self.state = RevealState::Revealed;
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        match self.state {
            RevealState::Waiting => false,
            RevealState::Revealed => true,
            RevealState::Playing { started_at_ms } => {
                now_ms - started_at_ms >= self.group.total_duration_ms()
            }
        }
    }

    /// Playing but not finished at `now_ms`, so another frame is needed.
    pub fn is_animating(&self, now_ms: f64) -> bool {
        matches!(self.state, RevealState::Playing { .. }) && !self.is_finished(now_ms)
    }

    pub fn evaluate(&self, now_ms: f64) -> EvaluatedFrame {
        let mut frame = EvaluatedFrame::new(if self.is_triggered() { 1.0 } else { 0.0 });
        for (i, target) in self.group.targets.iter().enumerate() {
            let t = match self.state {
                RevealState::Waiting => 0.0,
                RevealState::Revealed => 1.0,
                RevealState::Playing { started_at_ms } => {
                    let start = started_at_ms + self.group.stagger_ms * i as f64;
                    if self.group.duration_ms <= 0.0 {
                        if now_ms >= start { 1.0 } else { 0.0 }
                    } else {
                        ((now_ms - start) / self.group.duration_ms).clamp(0.0, 1.0)
                    }
                }
            };
            let e = self.group.ease.apply(t);
            frame.insert(
                target.clone(),
                Property::Opacity,
                Property::Opacity.clamp_to_domain(lerp(0.0, 1.0, e)),
            );
            frame.insert(
                target.clone(),
                Property::TranslateY,
                lerp(self.group.translate_y, 0.0, e),
            );
        }
        frame
    }
}

#[cfg(test)]
#[path = "../../tests/unit/responsive/reveal.rs"]
mod tests;
