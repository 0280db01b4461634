use crate::foundation::core::{Point, Vec2};

/// Linear interpolation that is exact at `t = 0` and `t = 1`.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
    }
}

/// Scalar lerp. `a + (b - a) * 1` is not always `b` in floating point, so `t == 1` is special-cased.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 {
        return b;
    }
    a + (b - a) * t
}
