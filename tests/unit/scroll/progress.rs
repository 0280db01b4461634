use super::*;
use crate::scroll::region::Boundary;

fn frame(scroll_y: f64, now_ms: f64) -> ScrollFrame {
    ScrollFrame { scroll_y, now_ms }
}

fn source_with(region: Region) -> (ProgressSource, RegionId) {
    let id = region.id().clone();
    let mut src = ProgressSource::new(ProgressSettings::desktop(), ProgressSettings::touch());
    src.register(region).unwrap();
    (src, id)
}

fn unsmoothed() -> ProgressSettings {
    ProgressSettings {
        half_life_ms: 0.0,
        ..ProgressSettings::desktop()
    }
}

#[test]
fn unknown_and_degenerate_regions_report_one() {
    let mut src = ProgressSource::new(ProgressSettings::desktop(), ProgressSettings::touch());
    src.register(Region::new("unmeasured")).unwrap();
    src.register(Region::with_boundary("flat", Boundary::new(500.0, 500.0)))
        .unwrap();

    for (i, y) in [0.0, 500.0, 2400.0].into_iter().enumerate() {
        src.tick(frame(y, i as f64 * 16.0));
        assert_eq!(src.progress(&RegionId::new("unmeasured")), Some(1.0));
        assert_eq!(src.progress(&RegionId::new("flat")), Some(1.0));
    }
}

#[test]
fn smoothing_follows_half_life() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    src.tick(frame(0.0, 0.0));
    assert_eq!(src.progress(&id), Some(0.0));

    src.tick(frame(1000.0, 80.0));
    assert_eq!(src.progress(&id), Some(0.5));
    src.tick(frame(1000.0, 160.0));
    assert_eq!(src.progress(&id), Some(0.75));

    // Converges, then snaps exactly onto the raw value.
    for i in 3..40 {
        src.tick(frame(1000.0, f64::from(i) * 80.0));
    }
    assert_eq!(src.progress(&id), Some(1.0));
}

#[test]
fn touch_input_uses_shorter_half_life() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    src.set_input(InputKind::Touch);
    src.tick(frame(0.0, 0.0));
    src.tick(frame(1000.0, 80.0));
    assert_eq!(src.progress(&id), Some(0.75));
}

#[test]
fn zero_half_life_override_disables_smoothing() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    src.set_half_life_override(&id, Some(0.0));
    src.tick(frame(0.0, 0.0));
    src.tick(frame(420.0, 16.0));
    assert_eq!(src.progress(&id), Some(0.42));
}

#[test]
fn first_frame_emits_changed_to_every_subscriber() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    let owner = src.next_generation();
    let a = src.observe(&id, owner).unwrap();
    let b = src.observe(&id, owner).unwrap();

    let events = src.tick(frame(250.0, 0.0));
    let subs: Vec<_> = events.iter().map(ProgressEvent::subscription).collect();
    assert_eq!(subs, vec![a, b]);
    assert!(matches!(
        events[0],
        ProgressEvent::Changed { progress, .. } if progress == 0.25
    ));

    // Nothing moved, nothing to report.
    assert!(src.tick(frame(250.0, 16.0)).is_empty());
}

#[test]
fn disposed_owner_receives_no_events() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    let old = src.next_generation();
    let stale = src.observe(&id, old).unwrap();
    let new = src.next_generation();
    let live = src.observe(&id, new).unwrap();

    assert_eq!(src.dispose_owner(old), 1);
    assert!(!src.is_subscribed(stale));
    assert_eq!(src.subscriptions_owned_by(new), vec![live]);

    let events = src.tick(frame(100.0, 0.0));
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.subscription() == live));
}

#[test]
fn settled_fires_once_after_debounce() {
    let mut src = ProgressSource::new(unsmoothed(), ProgressSettings::touch());
    src.register(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)))
        .unwrap();
    let id = RegionId::new("hero");
    let owner = src.next_generation();
    src.observe(&id, owner).unwrap();

    src.tick(frame(0.0, 0.0));
    src.tick(frame(500.0, 16.0));
    let settled_at = |events: &[ProgressEvent]| {
        events
            .iter()
            .any(|e| matches!(e, ProgressEvent::Settled { .. }))
    };

    assert!(!settled_at(&src.tick(frame(500.0, 32.0))));
    assert!(!settled_at(&src.tick(frame(500.0, 100.0))));
    assert!(settled_at(&src.tick(frame(500.0, 182.0))));
    assert!(!settled_at(&src.tick(frame(500.0, 400.0))));
}

#[test]
fn direction_ignores_jitter_inside_hysteresis() {
    let mut src = ProgressSource::new(unsmoothed(), ProgressSettings::touch());
    src.register(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)))
        .unwrap();
    let id = RegionId::new("hero");
    let owner = src.next_generation();
    src.observe(&id, owner).unwrap();

    let direction_of = |events: Vec<ProgressEvent>| match events.first() {
        Some(ProgressEvent::Changed { direction, .. }) => Some(*direction),
        _ => None,
    };

    src.tick(frame(0.0, 0.0));
    assert_eq!(direction_of(src.tick(frame(100.0, 16.0))), Some(Direction::Forward));
    assert_eq!(direction_of(src.tick(frame(99.5, 32.0))), Some(Direction::Forward));
    assert_eq!(direction_of(src.tick(frame(90.0, 48.0))), Some(Direction::Backward));
}

#[test]
fn registration_errors() {
    let (mut src, id) = source_with(Region::new("hero"));
    assert!(src.register(Region::new("hero")).is_err());
    let owner = src.next_generation();
    assert!(src.observe(&RegionId::new("missing"), owner).is_err());

    src.observe(&id, owner).unwrap();
    assert!(src.unregister(&id).is_some());
    assert_eq!(src.active_subscriptions().count(), 0);
}

#[test]
fn converging_until_smoothing_reaches_the_scroll_position() {
    let (mut src, id) = source_with(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)));
    assert!(!src.is_converging());

    src.tick(frame(0.0, 0.0));
    assert!(!src.is_converging());

    src.tick(frame(500.0, 16.0));
    assert!(src.is_converging());

    let mut now = 16.0;
    while src.is_converging() {
        now += 16.0;
        assert!(now < 16.0 * 200.0, "smoothing never snapped");
        src.tick(frame(500.0, now));
    }
    assert_eq!(src.progress(&id), Some(0.5));
}

#[test]
fn events_only_reach_subscriptions_on_the_moving_region() {
    let mut src = ProgressSource::new(unsmoothed(), ProgressSettings::touch());
    src.register(Region::with_boundary("hero", Boundary::new(0.0, 1000.0)))
        .unwrap();
    src.register(Region::with_boundary("footer", Boundary::new(5000.0, 6000.0)))
        .unwrap();
    let hero = RegionId::new("hero");
    let footer = RegionId::new("footer");
    let owner = src.next_generation();
    let on_hero = src.observe(&hero, owner).unwrap();
    let dropped = src.observe(&hero, owner).unwrap();
    let on_footer = src.observe(&footer, owner).unwrap();
    src.tick(frame(0.0, 0.0));

    assert!(src.unsubscribe(dropped));
    assert!(!src.unsubscribe(dropped));
    let events = src.tick(frame(400.0, 16.0));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].subscription(), on_hero);

    src.unregister(&hero);
    assert!(!src.is_subscribed(on_hero));
    assert!(src.is_subscribed(on_footer));
    let events = src.tick(frame(5500.0, 32.0));
    assert!(events.iter().all(|e| e.subscription() == on_footer));
    assert!(!events.is_empty());
}
