use super::*;

#[test]
fn window_rejects_inverted_and_out_of_range() {
    assert!(ProgressWindow::new(0.5, 0.5).is_err());
    assert!(ProgressWindow::new(0.6, 0.2).is_err());
    assert!(ProgressWindow::new(-0.1, 0.2).is_err());
    assert!(ProgressWindow::new(0.2, 1.1).is_err());
    assert!(ProgressWindow::new(f64::NAN, 0.2).is_err());
    assert!(ProgressWindow::new(0.0, 1.0).is_ok());
}

#[test]
fn window_local_t_hits_endpoints_exactly() {
    let w = ProgressWindow::new(0.2, 0.7).unwrap();
    assert_eq!(w.local_t(0.2), 0.0);
    assert_eq!(w.local_t(0.7), 1.0);
    assert_eq!(w.local_t(0.0), 0.0);
    assert_eq!(w.local_t(1.0), 1.0);
    assert!((w.local_t(0.45) - 0.5).abs() < 1e-12);
}

#[test]
fn shared_boundary_is_not_an_interior_overlap() {
    let a = ProgressWindow::new(0.0, 0.5).unwrap();
    let b = ProgressWindow::new(0.5, 1.0).unwrap();
    let c = ProgressWindow::new(0.4, 0.9).unwrap();
    assert!(!a.overlaps_interior(b));
    assert!(a.overlaps_interior(c));
    assert!(c.overlaps_interior(b));
}

#[test]
fn ids_serialize_as_plain_strings() {
    let id = TargetId::new("logo-0");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"logo-0\"");
    let de: RegionId = serde_json::from_str("\"showcase\"").unwrap();
    assert_eq!(de.as_str(), "showcase");
}
