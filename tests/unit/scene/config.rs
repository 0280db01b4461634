use super::*;
use crate::responsive::tier::Tier;

const SCENE: &str = r#"{
    "engine": { "breakpoints": { "tablet_min": 700 }, "max_unresolved_layout_passes": 2 },
    "sections": [
        {
            "id": "showcase",
            "boundary": { "start": 1000, "end": 2000 },
            "timelines": [
                { "entries": [
                    { "kind": "stage", "targets": ["title"], "property": "opacity",
                      "window": { "start": 0.0, "end": 0.3 }, "from": 0, "to": 1 },
                    { "kind": "stagger", "slots": { "prefix": "logo", "count": 4 },
                      "property": "scale", "span": { "start": 0.3, "end": 0.9 },
                      "each": 0.3, "from": 0.8, "to": 1.0, "ease": "OutCubic" }
                ] }
            ],
            "reveals": [ { "id": "intro", "targets": ["title", "logo-0"] } ]
        }
    ],
    "demo": [
        { "name": "intro", "duration_ms": 500, "scroll_to": 1000 },
        { "name": "scrub", "duration_ms": 2000, "scroll_to": 2000, "ease": "InOutQuad" }
    ]
}"#;

#[test]
fn scene_parses_with_defaults() {
    let scene = SceneConfig::from_json_str(SCENE).unwrap();
    scene.validate().unwrap();

    assert_eq!(scene.engine.breakpoints.tablet_min, 700.0);
    assert_eq!(scene.engine.breakpoints.desktop_min, 1024.0);
    assert_eq!(scene.engine.pinned_tiers, vec![Tier::Desktop]);
    assert_eq!(scene.sections[0].reveals[0].trigger_fraction, 0.85);

    let demo = scene.demo_sequence().unwrap().unwrap();
    assert_eq!(demo.total_duration_ms(), 2500.0);

    let engine = scene.build().unwrap();
    let section = engine.section("showcase").unwrap();
    assert_eq!(section.timelines()[0].stages().len(), 5);
}

#[test]
fn duplicate_sections_are_rejected() {
    let mut scene = SceneConfig::from_json_str(SCENE).unwrap();
    scene.sections.push(scene.sections[0].clone());
    assert!(matches!(
        scene.validate(),
        Err(ScrublineError::Validation(_))
    ));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json_str("{ \"sections\": [").unwrap_err();
    assert!(matches!(err, ScrublineError::Serde(_)));
}

#[test]
fn missing_file_carries_path_context() {
    let err = SceneConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ScrublineError::Other(_)));
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn broken_stage_fails_validation() {
    let json = SCENE.replace(r#""start": 0.0, "end": 0.3"#, r#""start": 0.5, "end": 0.3"#);
    let scene = SceneConfig::from_json_str(&json).unwrap();
    assert!(scene.validate().is_err());
}
