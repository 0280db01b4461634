use crate::{
    animation::{ease::Ease, lerp::lerp, property::Property},
    foundation::{
        core::{ProgressWindow, TargetId},
        error::{ScrublineError, ScrublineResult},
    },
};

/// One declared animation step: `property` of every target moves `from -> to` across `window`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    pub targets: Vec<TargetId>,
    pub property: Property,
    pub window: ProgressWindow,
    pub from: f64,
    pub to: f64,
    #[serde(default)]
    pub ease: Ease,
}

/// Where a progress value falls relative to a window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Phase {
    Before,
    Active(f64), // local t in [0, 1]
    After,
}

impl Phase {
    pub(crate) fn of(window: ProgressWindow, p: f64) -> Self {
        if p < window.start {
            Self::Before
        } else if p > window.end {
            Self::After
        } else {
            Self::Active(window.local_t(p))
        }
    }
}

impl Stage {
    pub fn new<I, T>(
        targets: I,
        property: Property,
        window: ProgressWindow,
        from: f64,
        to: f64,
    ) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            property,
            window,
            from,
            to,
            ease: Ease::Linear,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.targets.is_empty() {
            return Err(ScrublineError::validation(format!(
                "{} stage must name at least one target",
                self.property
            )));
        }
        if let Some(t) = self.targets.iter().find(|t| t.as_str().trim().is_empty()) {
            return Err(ScrublineError::validation(format!(
                "{} stage has an empty target id '{t}'",
                self.property
            )));
        }
        for (i, t) in self.targets.iter().enumerate() {
            if self.targets[..i].contains(t) {
                return Err(ScrublineError::validation(format!(
                    "{} stage lists target '{t}' twice",
                    self.property
                )));
            }
        }
        self.window.validate()?;
        if !self.from.is_finite() || !self.to.is_finite() {
            return Err(ScrublineError::validation(format!(
                "{} stage values must be finite",
                self.property
            )));
        }
        self.ease.validate()
    }

    /// Raw (unclamped) value at progress `p`: `from` before the window, `to` after it.
    pub fn value_at(&self, p: f64) -> f64 {
        match Phase::of(self.window, p) {
            Phase::Before => self.from,
            Phase::After => self.to,
            Phase::Active(t) => lerp(self.from, self.to, self.ease.apply(t)),
        }
    }
}
