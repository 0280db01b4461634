use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrublineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrublineError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(ScrublineError::path("x").to_string().contains("path error:"));
    assert!(
        ScrublineError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        ScrublineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrublineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
