use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlameError::format("x")
            .to_string()
            .contains("format error:")
    );
    assert!(
        FlameError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlameError::construction("x")
            .to_string()
            .contains("construction error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlameError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
