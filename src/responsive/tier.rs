use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Device-size class selecting the animation strategy.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

/// Width thresholds (CSS px) between tiers. A width equal to a threshold belongs to the larger tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoints {
    #[serde(default = "default_tablet_min")]
    pub tablet_min: f64,
    #[serde(default = "default_desktop_min")]
    pub desktop_min: f64,
}

fn default_tablet_min() -> f64 {
    768.0
}

fn default_desktop_min() -> f64 {
    1024.0
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            tablet_min: default_tablet_min(),
            desktop_min: default_desktop_min(),
        }
    }
}

impl Breakpoints {
    pub fn validate(&self) -> ScrublineResult<()> {
        if !(self.tablet_min.is_finite() && self.desktop_min.is_finite()) {
            return Err(ScrublineError::config("breakpoints must be finite"));
        }
        if !(0.0 < self.tablet_min && self.tablet_min < self.desktop_min) {
            return Err(ScrublineError::config(format!(
                "breakpoints must satisfy 0 < tablet_min ({}) < desktop_min ({})",
                self.tablet_min, self.desktop_min
            )));
        }
        Ok(())
    }

    /// Classify a viewport width. Unmeasurable widths fall back to the simplest variant.
    pub fn classify(&self, width: f64) -> Tier {
        if !width.is_finite() || width < self.tablet_min {
            Tier::Mobile
        } else if width < self.desktop_min {
            Tier::Tablet
        } else {
            Tier::Desktop
        }
    }
}
