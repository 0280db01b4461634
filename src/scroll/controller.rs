/// Handle for writing the page's scroll position.
///
/// Scripted sequences receive one of these explicitly instead of reaching for a global scroller.
pub trait ScrollController {
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, y: f64);
}

/// In-memory scroller with an optional maximum, used by the CLI and tests.
#[derive(Clone, Debug, Default)]
pub struct SimulatedScroll {
    y: f64,
    max: Option<f64>,
    writes: usize,
}

impl SimulatedScroll {
    pub fn new(y: f64) -> Self {
        Self {
            y,
            ..Self::default()
        }
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Number of `scroll_to` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScrollController for SimulatedScroll {
    fn scroll_y(&self) -> f64 {
        self.y
    }

    fn scroll_to(&mut self, y: f64) {
        self.writes += 1;
        if !y.is_finite() {
            return;
        }
        let upper = self.max.unwrap_or(f64::INFINITY);
        self.y = y.clamp(0.0, upper.max(0.0));
    }
}
