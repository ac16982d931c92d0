use super::*;

#[test]
fn garbage_bytes_are_invalid_image() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, BlurError::InvalidImage(_)));
}

#[test]
fn png_bytes_decode_to_the_same_pixels() {
    let img = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
    let png = encode_png(&img).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    assert_eq!(decode_image(&png).unwrap(), img);
}

#[test]
fn save_then_load_from_disk() {
    let dir = std::env::temp_dir().join(format!("progblur_decode_{}", std::process::id()));
    let path = dir.join("nested").join("img.png");
    let img = PixelBuffer::filled(3, 3, [10, 20, 30, 255]).unwrap();
    save_png(&path, &img).unwrap();
    assert_eq!(load_image(&path).unwrap(), img);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_keeps_the_path_in_the_error() {
    let err = load_image("no/such/image.png").unwrap_err();
    assert!(matches!(err, BlurError::Other(_)));
    assert!(format!("{err:#}").contains("no/such/image.png"));
}
