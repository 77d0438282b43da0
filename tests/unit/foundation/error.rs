use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MaskblendError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        MaskblendError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MaskblendError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MaskblendError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: MaskblendError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, MaskblendError::Serde(_)));
}
