use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Default overshoot for [`Ease::BackOut`].
pub const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

/// Progress remapping curves.
///
/// Every curve maps `0 -> 0` and `1 -> 1` exactly. `BackOut` and `ElasticOut` leave `[0, 1]` in
/// between; callers that cannot tolerate that clamp the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    SmoothStep,
    BackOut {
        overshoot: f64,
    },
    ElasticOut,
}

impl Ease {
    pub fn back_out() -> Self {
        Self::BackOut {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t >= 1.0 {
            return 1.0;
        }
        if t <= 0.0 {
            return 0.0;
        }
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::BackOut { overshoot } => {
                let c1 = overshoot;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u.powi(3) + c1 * u.powi(2)
            }
            Self::ElasticOut => {
                const C4: f64 = std::f64::consts::TAU / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
            }
        }
    }

    /// Whether the curve may leave `[0, 1]` for inputs inside `(0, 1)`.
    pub fn overshoots(self) -> bool {
        match self {
            Self::BackOut { overshoot } => overshoot > 0.0,
            Self::ElasticOut => true,
            _ => false,
        }
    }

    pub fn validate(self) -> ScrublineResult<()> {
        if let Self::BackOut { overshoot } = self {
            if !overshoot.is_finite() || overshoot < 0.0 {
                return Err(ScrublineError::validation(
                    "BackOut overshoot must be finite and >= 0",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
