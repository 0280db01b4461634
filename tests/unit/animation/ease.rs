use super::*;

fn all() -> [Ease; 10] {
    [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::SmoothStep,
        Ease::back_out(),
        Ease::ElasticOut,
    ]
}

#[test]
fn endpoints_are_stable() {
    for ease in all() {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn inputs_are_clamped() {
    for ease in all() {
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in all().into_iter().filter(|e| !e.overshoots()) {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn back_out_overshoots_past_one() {
    let peak = (1..100)
        .map(|i| Ease::back_out().apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
    assert!(peak < 1.2);
}

#[test]
fn elastic_out_oscillates_around_one() {
    let samples: Vec<f64> = (1..100)
        .map(|i| Ease::ElasticOut.apply(f64::from(i) / 100.0))
        .collect();
    assert!(samples.iter().any(|v| *v > 1.0));
    assert!(samples.iter().any(|v| *v < 1.0));
}

#[test]
fn negative_overshoot_is_rejected() {
    assert!(Ease::BackOut { overshoot: -1.0 }.validate().is_err());
    assert!(Ease::back_out().validate().is_ok());
}
