use crate::{foundation::core::RegionId, scroll::region::Region};

/// Where the scroll position sits relative to a pinned region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinState {
    #[default]
    UnpinnedBefore,
    Pinned,
    UnpinnedAfter,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinTransition {
    /// Before -> pinned, scrolling down.
    Enter,
    /// Pinned -> after. Progress is forced to 1.
    Leave,
    /// After -> pinned, scrolling up.
    EnterBack,
    /// Pinned -> before. Progress is forced to 0.
    LeaveBack,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PinUpdate {
    pub state: PinState,
    /// Progress the region's timeline should be evaluated at.
    pub progress: f64,
    /// Transitions crossed since the previous update, in scroll order.
    pub transitions: Vec<PinTransition>,
    /// Translation keeping the container fixed; holds at the pin distance after the region.
    pub container_offset: f64,
}

/// Pin state machine for one region.
///
/// The state is re-derived from the scroll position on every update, so jumping straight across
/// the region still reports both crossings and lands in the right state. There is no played-once
/// latch: the region pins again every time it is re-entered.
#[derive(Clone, Debug)]
pub struct PinController {
    region: RegionId,
    state: PinState,
}

impl PinController {
    pub fn new(region: RegionId) -> Self {
        Self {
            region,
            state: PinState::UnpinnedBefore,
        }
    }

    pub fn region(&self) -> &RegionId {
        &self.region
    }

    pub fn state(&self) -> PinState {
        self.state
    }

    pub fn update(&mut self, region: &Region, scroll_y: f64) -> PinUpdate {
        let (next, progress, container_offset) = match region.boundary() {
            Some(b) if !b.is_degenerate() && scroll_y.is_finite() => {
                if scroll_y < b.start {
                    (PinState::UnpinnedBefore, 0.0, 0.0)
                } else if scroll_y > b.end {
                    (PinState::UnpinnedAfter, 1.0, b.distance())
                } else {
                    (PinState::Pinned, region.progress(), scroll_y - b.start)
                }
            }
            _ => (PinState::UnpinnedAfter, 1.0, 0.0),
        };

        let transitions = transitions_between(self.state, next);
        for t in &transitions {
            tracing::debug!(region = %self.region, transition = ?t, "pin transition");
        }
        self.state = next;

        PinUpdate {
            state: next,
            progress,
            transitions,
            container_offset,
        }
    }
}

fn transitions_between(from: PinState, to: PinState) -> Vec<PinTransition> {
    use PinState::*;
    use PinTransition::*;
    match (from, to) {
        (UnpinnedBefore, Pinned) => vec![Enter],
        (Pinned, UnpinnedAfter) => vec![Leave],
        (UnpinnedAfter, Pinned) => vec![EnterBack],
        (Pinned, UnpinnedBefore) => vec![LeaveBack],
        (UnpinnedBefore, UnpinnedAfter) => vec![Enter, Leave],
        (UnpinnedAfter, UnpinnedBefore) => vec![EnterBack, LeaveBack],
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/pin.rs"]
mod tests;
