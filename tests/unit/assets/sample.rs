use super::*;

#[test]
fn sample_has_requested_size_and_is_opaque() {
    let img = sample_image(64, 48).unwrap();
    assert_eq!((img.width(), img.height()), (64, 48));
    assert!(img.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn sample_is_deterministic() {
    assert_eq!(
        sample_image(SAMPLE_WIDTH, SAMPLE_HEIGHT).unwrap(),
        sample_image(SAMPLE_WIDTH, SAMPLE_HEIGHT).unwrap()
    );
}

#[test]
fn sample_has_hard_vertical_edges() {
    let img = sample_image(96, 32).unwrap();
    // bar boundary every 24 columns
    assert_ne!(img.pixel(23, 0), img.pixel(24, 0));
}

#[test]
fn zero_sized_sample_is_rejected() {
    assert!(sample_image(0, 10).is_err());
}
