use super::*;
use crate::animation::ease::Ease;
use crate::config::model::BlurType;
use crate::foundation::error::BlurError;

fn cfg() -> BlurConfig {
    BlurConfig {
        enabled: true,
        blur_type: BlurType::Gaussian,
        start_point: 0.0,
        end_point: 1.0,
        max_kernel_size: 9,
        easing: Ease::Linear,
        premultiply_alpha: false,
    }
}

fn stripes(w: u32, h: u32) -> PixelBuffer {
    let mut data = Vec::new();
    for _ in 0..h {
        for x in 0..w {
            let v = if x % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    PixelBuffer::new(w, h, data).unwrap()
}

#[test]
fn disabled_config_is_zero_copy_passthrough() {
    let src = stripes(6, 6);
    let mut c = cfg();
    c.enabled = false;
    let out = blur(&src, &c).unwrap();
    assert!(out.shares_storage_with(&src));

    let mut c = cfg();
    c.blur_type = BlurType::None;
    let out = blur(&src, &c).unwrap();
    assert!(out.shares_storage_with(&src));
}

#[test]
fn disabled_config_skips_validation() {
    let src = stripes(4, 4);
    let mut c = cfg();
    c.enabled = false;
    c.max_kernel_size = 500;
    assert_eq!(blur(&src, &c).unwrap(), src);
}

#[test]
fn invalid_config_fails_before_processing() {
    let src = stripes(4, 4);
    let mut c = cfg();
    c.max_kernel_size = 500;
    let err = blur(&src, &c).unwrap_err();
    assert!(matches!(err, BlurError::InvalidConfig(_)));
}

#[test]
fn explicit_backend_matches_default() {
    let src = stripes(12, 10);
    let mut serial = CpuBackend::serial();
    let a = blur_with_backend(&src, &cfg(), &mut serial).unwrap();
    let b = blur(&src, &cfg()).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, src);
}

#[test]
fn raw_entry_validates_dimensions() {
    let err = blur_rgba8(&[], 0, 0, &cfg()).unwrap_err();
    assert!(matches!(err, BlurError::InvalidImage(_)));

    let err = blur_rgba8(&[0u8; 12], 2, 2, &cfg()).unwrap_err();
    assert!(matches!(err, BlurError::InvalidImage(_)));

    let src = stripes(5, 3);
    let out = blur_rgba8(src.data(), 5, 3, &cfg()).unwrap();
    assert_eq!(out.len(), src.data().len());
}
