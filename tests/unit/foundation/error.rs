use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BlurError::invalid_config("x")
            .to_string()
            .contains("invalid config:")
    );
    assert!(
        BlurError::invalid_image("x")
            .to_string()
            .contains("invalid image:")
    );
    assert!(
        BlurError::unsupported_backend("x")
            .to_string()
            .contains("unsupported backend:")
    );
    assert!(
        BlurError::processing("x")
            .to_string()
            .contains("processing failure:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BlurError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_through_question_mark() {
    fn fails() -> BlurResult<()> {
        Err(anyhow::anyhow!("lower level"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, BlurError::Other(_)));
}
