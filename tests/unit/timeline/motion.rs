use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn straight_path_samples_by_arc_length() {
    let s = PathSampler::from_svg("M0 0 L100 0 L100 100").unwrap();
    assert!(close(s.length(), 200.0));

    let mid = s.sample(0.5);
    assert!(close(mid.point.x, 100.0));
    assert!(close(mid.point.y, 0.0));

    let quarter = s.sample(0.75);
    assert!(close(quarter.point.x, 100.0));
    assert!(close(quarter.point.y, 50.0));
    assert!(close(quarter.angle_deg, 90.0));
}

#[test]
fn endpoints_hit_path_ends() {
    let s = PathSampler::from_svg("M10 20 C 40 80, 90 -20, 120 40").unwrap();
    let start = s.sample(0.0).point;
    assert!(close(start.x, 10.0));
    assert!(close(start.y, 20.0));
    let end = s.sample(1.0).point;
    assert!(close(end.x, 120.0));
    assert!(close(end.y, 40.0));
}

#[test]
fn malformed_or_empty_paths_are_path_errors() {
    assert!(matches!(
        PathSampler::from_svg("M0 0 X 10 10"),
        Err(ScrublineError::Path(_))
    ));
    assert!(matches!(
        PathSampler::from_svg("L 10 10"),
        Err(ScrublineError::Path(_))
    ));
    assert!(matches!(
        PathSampler::from_svg("M5 5"),
        Err(ScrublineError::Path(_))
    ));
    assert!(matches!(
        PathSampler::from_svg(""),
        Err(ScrublineError::Path(_))
    ));
}

#[test]
fn path_progress_is_clamped_under_overshoot() {
    let seg = MotionSegment::new(
        "arrow",
        "M0 0 L100 0",
        ProgressWindow::new(0.0, 0.5).unwrap(),
    )
    .with_ease(Ease::back_out());

    for i in 0..=100 {
        let p = f64::from(i) / 100.0;
        let pp = seg.path_progress_at(p);
        assert!((0.0..=1.0).contains(&pp), "p={p} pp={pp}");
    }
    assert_eq!(seg.path_progress_at(0.0), 0.0);
    assert_eq!(seg.path_progress_at(0.5), 1.0);
    assert_eq!(seg.path_progress_at(0.9), 1.0);
}
