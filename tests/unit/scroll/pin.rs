use super::*;
use crate::scroll::region::{Boundary, RegionLayout};

/// Region whose published progress equals the raw progress at `scroll_y`.
fn region_at(boundary: Boundary, scroll_y: f64) -> Region {
    let mut r = Region::with_boundary("showcase", boundary);
    r.set_progress(r.raw_progress(scroll_y));
    r
}

#[test]
fn re_entry_in_both_directions() {
    let b = Boundary::new(1000.0, 2000.0);
    let mut pin = PinController::new(RegionId::new("showcase"));

    let u = pin.update(&region_at(b, 500.0), 500.0);
    assert_eq!((u.state, u.progress), (PinState::UnpinnedBefore, 0.0));
    assert!(u.transitions.is_empty());

    let u = pin.update(&region_at(b, 1500.0), 1500.0);
    assert_eq!((u.state, u.progress), (PinState::Pinned, 0.5));
    assert_eq!(u.transitions, vec![PinTransition::Enter]);
    assert_eq!(u.container_offset, 500.0);

    let u = pin.update(&region_at(b, 500.0), 500.0);
    assert_eq!((u.state, u.progress), (PinState::UnpinnedBefore, 0.0));
    assert_eq!(u.transitions, vec![PinTransition::LeaveBack]);

    // Second pass pins again.
    let u = pin.update(&region_at(b, 1200.0), 1200.0);
    assert_eq!(u.state, PinState::Pinned);
    assert_eq!(u.transitions, vec![PinTransition::Enter]);
}

#[test]
fn leaving_forward_forces_one_and_holds_the_spacer() {
    let b = Boundary::new(1000.0, 2000.0);
    let mut pin = PinController::new(RegionId::new("showcase"));
    pin.update(&region_at(b, 1500.0), 1500.0);

    // Smoothed progress lags behind; leaving still reports exactly 1.
    let mut lagging = Region::with_boundary("showcase", b);
    lagging.set_progress(0.93);
    let u = pin.update(&lagging, 2600.0);
    assert_eq!(u.state, PinState::UnpinnedAfter);
    assert_eq!(u.progress, 1.0);
    assert_eq!(u.transitions, vec![PinTransition::Leave]);
    assert_eq!(u.container_offset, 1000.0);

    let u = pin.update(&region_at(b, 1900.0), 1900.0);
    assert_eq!(u.transitions, vec![PinTransition::EnterBack]);
}

#[test]
fn anchor_jump_across_region_reports_both_crossings() {
    let b = Boundary::new(1000.0, 2000.0);
    let mut pin = PinController::new(RegionId::new("showcase"));

    let u = pin.update(&region_at(b, 5000.0), 5000.0);
    assert_eq!(u.state, PinState::UnpinnedAfter);
    assert_eq!(u.transitions, vec![PinTransition::Enter, PinTransition::Leave]);

    let u = pin.update(&region_at(b, 0.0), 0.0);
    assert_eq!(u.state, PinState::UnpinnedBefore);
    assert_eq!(
        u.transitions,
        vec![PinTransition::EnterBack, PinTransition::LeaveBack]
    );
}

#[test]
fn layout_derived_boundary_pins_at_start_fraction() {
    // top 1080 with pin start at 10% of an 800px viewport: pins from 1000 for 1000px.
    let layout = RegionLayout::new(1080.0, 1000.0);
    let b = Boundary::from_layout(layout, 800.0, 0.1).unwrap();
    let mut pin = PinController::new(RegionId::new("showcase"));

    assert_eq!(pin.update(&region_at(b, 999.0), 999.0).state, PinState::UnpinnedBefore);
    let u = pin.update(&region_at(b, 1000.0), 1000.0);
    assert_eq!((u.state, u.progress), (PinState::Pinned, 0.0));
}

#[test]
fn unmeasured_region_stays_fully_revealed() {
    let mut pin = PinController::new(RegionId::new("showcase"));
    let u = pin.update(&Region::new("showcase"), 300.0);
    assert_eq!(u.state, PinState::UnpinnedAfter);
    assert_eq!(u.progress, 1.0);
}
