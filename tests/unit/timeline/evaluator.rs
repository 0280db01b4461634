use super::*;
use crate::animation::ease::Ease;

fn w(start: f64, end: f64) -> ProgressWindow {
    ProgressWindow::new(start, end).unwrap()
}

/// A small showcase choreography: title fades in, cards cascade up, an arrow follows a path.
fn showcase() -> Timeline {
    Timeline::builder()
        .stage(Stage::new(["title"], Property::Opacity, w(0.0, 0.2), 0.0, 1.0))
        .stage(
            Stage::new(["card-0"], Property::TranslateY, w(0.1, 0.5), 80.0, 0.0)
                .with_ease(Ease::InOutQuad),
        )
        .stage(
            Stage::new(["card-1"], Property::TranslateY, w(0.3, 0.7), 80.0, 0.0)
                .with_ease(Ease::InOutCubic),
        )
        .stage(Stage::new(
            ["line"],
            Property::StrokeDashoffset,
            w(0.4, 0.9),
            600.0,
            0.0,
        ))
        .motion(
            MotionSegment::new("arrow", "M0 0 L300 0", w(0.5, 1.0))
                .with_ease(Ease::back_out())
                .with_auto_rotate(true),
        )
        .build()
        .unwrap()
}

#[test]
fn evaluate_is_pure_regardless_of_history() {
    let tl = showcase();
    let reference = tl.evaluate(0.42);

    for p in [0.0, 1.0, 0.9, 0.1, 0.42, 0.8, 0.3] {
        let _ = tl.evaluate(p);
    }
    assert_eq!(tl.evaluate(0.42), reference);

    // Walking backwards lands in the same state as walking forwards.
    let forward: Vec<_> = (0..=20).map(|i| tl.evaluate(f64::from(i) / 20.0)).collect();
    let backward: Vec<_> = (0..=20)
        .rev()
        .map(|i| tl.evaluate(f64::from(i) / 20.0))
        .collect();
    for (f, b) in forward.iter().zip(backward.iter().rev()) {
        assert_eq!(f, b);
    }
}

#[test]
fn every_stage_hits_from_and_to_at_its_window_edges() {
    let tl = showcase();
    for stage in tl.stages() {
        let target = stage.targets[0].as_str();
        let at_start = tl.evaluate(stage.window.start);
        let at_end = tl.evaluate(stage.window.end);
        assert_eq!(at_start.get(target, stage.property), Some(stage.from));
        assert_eq!(at_end.get(target, stage.property), Some(stage.to));
    }
}

#[test]
fn non_overshooting_stages_move_monotonically() {
    let tl = showcase();
    let mut prev = f64::INFINITY;
    for i in 0..=200 {
        let p = f64::from(i) / 200.0;
        let v = tl.evaluate(p).get("card-1", Property::TranslateY).unwrap();
        assert!(v <= prev, "translate should only fall: {prev} -> {v} at {p}");
        prev = v;
    }
}

#[test]
fn out_of_range_progress_clamps_to_the_ends() {
    let tl = showcase();
    assert_eq!(tl.evaluate(-0.5).targets, tl.evaluate(0.0).targets);
    assert_eq!(tl.evaluate(1.5).targets, tl.evaluate(1.0).targets);
    assert_eq!(tl.evaluate(f64::NAN).targets, tl.evaluate(1.0).targets);
    assert_eq!(tl.evaluate(f64::NEG_INFINITY).targets, tl.evaluate(1.0).targets);
    assert_eq!(tl.evaluate(f64::INFINITY).targets, tl.evaluate(1.0).targets);
}

#[test]
fn later_declared_stage_wins_inside_the_overlap() {
    let tl = Timeline::builder()
        .stage(Stage::new(["hero"], Property::Scale, w(0.0, 0.6), 0.5, 1.0))
        .stage(Stage::new(["hero"], Property::Scale, w(0.4, 1.0), 2.0, 3.0))
        .build()
        .unwrap();
    assert_eq!(tl.overlaps().len(), 1);

    let later = &tl.stages()[1];
    for i in 0..=20 {
        let p = 0.4 + 0.2 * f64::from(i) / 20.0;
        let v = tl.evaluate(p).get("hero", Property::Scale).unwrap();
        assert_eq!(v, later.value_at(p), "p={p}");
    }

    // Before the overlap the earlier stage still governs.
    assert_eq!(tl.evaluate(0.3).get("hero", Property::Scale), Some(0.75));
}

#[test]
fn sequential_stages_hand_off_at_the_shared_point() {
    let tl = Timeline::builder()
        .stage(Stage::new(["badge"], Property::TranslateX, w(0.0, 0.5), 0.0, 100.0))
        .stage(Stage::new(["badge"], Property::TranslateX, w(0.5, 1.0), 100.0, 40.0))
        .build()
        .unwrap();
    assert!(tl.overlaps().is_empty());
    assert_eq!(tl.evaluate(0.25).get("badge", Property::TranslateX), Some(50.0));
    assert_eq!(tl.evaluate(0.5).get("badge", Property::TranslateX), Some(100.0));
    assert_eq!(tl.evaluate(1.0).get("badge", Property::TranslateX), Some(40.0));
}

#[test]
fn gaps_between_stages_hold_the_most_recent_end_value() {
    let tl = Timeline::builder()
        .stage(Stage::new(["dot"], Property::TranslateY, w(0.6, 0.8), 10.0, 20.0))
        .stage(Stage::new(["dot"], Property::TranslateY, w(0.1, 0.3), 0.0, 10.0))
        .build()
        .unwrap();
    assert_eq!(tl.evaluate(0.0).get("dot", Property::TranslateY), Some(0.0));
    assert_eq!(tl.evaluate(0.45).get("dot", Property::TranslateY), Some(10.0));
    assert_eq!(tl.evaluate(0.9).get("dot", Property::TranslateY), Some(20.0));
}

#[test]
fn outputs_stay_inside_property_domains_under_overshoot() {
    let tl = Timeline::builder()
        .stage(
            Stage::new(["pill"], Property::Opacity, w(0.0, 1.0), 0.0, 1.0)
                .with_ease(Ease::back_out()),
        )
        .build()
        .unwrap();
    for i in 0..=100 {
        let v = tl
            .evaluate(f64::from(i) / 100.0)
            .get("pill", Property::Opacity)
            .unwrap();
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
fn motion_marker_follows_path_and_never_overshoots() {
    let tl = showcase();
    let before = tl.evaluate(0.25);
    assert_eq!(before.get("arrow", Property::TranslateX), Some(0.0));
    assert_eq!(before.get("arrow", Property::PathProgress), Some(0.0));

    for i in 0..=100 {
        let f = tl.evaluate(0.5 + 0.5 * f64::from(i) / 100.0);
        let x = f.get("arrow", Property::TranslateX).unwrap();
        assert!((0.0..=300.0 + 1e-6).contains(&x), "x={x}");
        assert_eq!(f.get("arrow", Property::Rotation), Some(0.0));
    }

    let end = tl.evaluate(1.0);
    assert!((end.get("arrow", Property::TranslateX).unwrap() - 300.0).abs() < 1e-6);
    assert_eq!(end.get("arrow", Property::PathProgress), Some(1.0));
}

#[test]
fn broken_motion_path_is_skipped_without_failing_the_timeline() {
    let tl = Timeline::builder()
        .stage(Stage::new(["title"], Property::Opacity, w(0.0, 0.5), 0.0, 1.0))
        .motion(MotionSegment::new("arrow", "M0 0 X 1 2", w(0.0, 1.0)))
        .build()
        .unwrap();
    assert_eq!(tl.motion_count(), 0);
    assert_eq!(tl.skipped_motions().len(), 1);

    let f = tl.evaluate(0.5);
    assert_eq!(f.get("title", Property::Opacity), Some(1.0));
    assert_eq!(f.get("arrow", Property::TranslateX), None);
}

#[test]
fn evaluate_for_skips_unregistered_targets() {
    let tl = showcase();
    let mut registry = TargetRegistry::new();
    registry.insert("title", 7u32);

    let f = tl.evaluate_for(1.0, &registry);
    assert_eq!(f.targets.len(), 1);
    assert_eq!(f.get("title", Property::Opacity), Some(1.0));
}

#[test]
fn invalid_stage_fails_the_build() {
    let res = Timeline::builder()
        .stage(Stage::new(
            Vec::<TargetId>::new(),
            Property::Opacity,
            ProgressWindow::FULL,
            0.0,
            1.0,
        ))
        .build();
    assert!(res.is_err());
}
