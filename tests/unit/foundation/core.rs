use super::*;

#[test]
fn new_rejects_zero_pixel_count() {
    assert!(matches!(
        PixelBuffer::new(0, 4, Vec::new()),
        Err(BlurError::InvalidImage(_))
    ));
    assert!(matches!(
        PixelBuffer::new(4, 0, Vec::new()),
        Err(BlurError::InvalidImage(_))
    ));
}

#[test]
fn new_rejects_length_mismatch() {
    let err = PixelBuffer::new(2, 2, vec![0u8; 15]).unwrap_err();
    assert!(err.to_string().contains("expected 16 bytes"));
}

#[test]
fn filled_and_accessors_agree() {
    let img = PixelBuffer::filled(3, 2, [1, 2, 3, 4]).unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(img.stride(), 12);
    assert_eq!(img.row(1).len(), 12);
    assert_eq!(img.pixel(2, 1), [1, 2, 3, 4]);
}

#[test]
fn clones_share_storage() {
    let a = PixelBuffer::filled(2, 2, [9, 9, 9, 9]).unwrap();
    let b = a.clone();
    assert!(a.shares_storage_with(&b));

    let c = PixelBuffer::new(2, 2, a.data().to_vec()).unwrap();
    assert_eq!(a, c);
    assert!(!a.shares_storage_with(&c));
}

#[test]
fn into_vec_copies_only_when_shared() {
    let a = PixelBuffer::filled(1, 1, [5, 6, 7, 8]).unwrap();
    let b = a.clone();
    assert_eq!(a.into_vec(), vec![5, 6, 7, 8]);
    assert_eq!(b.into_vec(), vec![5, 6, 7, 8]);
}
