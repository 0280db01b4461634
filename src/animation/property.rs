use std::fmt;

/// Closed set of animatable properties.
///
/// Units follow CSS: translations and blur in px, rotation in degrees, opacity, scale and
/// path progress unitless.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    Blur,
    StrokeDashoffset,
    Rotation,
    PathProgress,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Opacity,
        Property::TranslateX,
        Property::TranslateY,
        Property::Scale,
        Property::Blur,
        Property::StrokeDashoffset,
        Property::Rotation,
        Property::PathProgress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::TranslateX => "translate_x",
            Self::TranslateY => "translate_y",
            Self::Scale => "scale",
            Self::Blur => "blur",
            Self::StrokeDashoffset => "stroke_dashoffset",
            Self::Rotation => "rotation",
            Self::PathProgress => "path_progress",
        }
    }

    /// Value of an untouched element.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Opacity | Self::Scale => 1.0,
            _ => 0.0,
        }
    }

    /// Clamp `v` into the property's valid domain. Non-finite values fall back to the rest value.
    pub fn clamp_to_domain(self, v: f64) -> f64 {
        if !v.is_finite() {
            return self.rest_value();
        }
        match self {
            Self::Opacity | Self::PathProgress => v.clamp(0.0, 1.0),
            Self::Scale | Self::Blur => v.max(0.0),
            Self::TranslateX | Self::TranslateY | Self::StrokeDashoffset | Self::Rotation => v,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
