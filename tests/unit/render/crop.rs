use super::*;

#[test]
fn wide_photo_is_trimmed_equally_left_and_right() {
    // 2:1 target (1080 x 540), 3:1 source.
    let rect = cover_crop(3000, 1000, 1080, 540);
    assert_eq!(rect.y, 0.0);
    assert_eq!(rect.height, 1000.0);
    assert!((rect.width - 2000.0).abs() < 1e-9);
    let left = rect.x;
    let right = 3000.0 - (rect.x + rect.width);
    assert!((left - right).abs() < 1e-9);
    assert!((left - 500.0).abs() < 1e-9);
}

#[test]
fn tall_photo_is_trimmed_equally_top_and_bottom() {
    let rect = cover_crop(1000, 1000, 1080, 540);
    assert_eq!(rect.x, 0.0);
    assert_eq!(rect.width, 1000.0);
    assert!((rect.height - 500.0).abs() < 1e-9);
    assert!((rect.y - 250.0).abs() < 1e-9);
}

#[test]
fn matching_aspect_is_not_cropped() {
    let rect = cover_crop(2160, 1080, 1080, 540);
    assert_eq!(
        rect,
        CropRect {
            x: 0.0,
            y: 0.0,
            width: 2160.0,
            height: 1080.0
        }
    );
}

#[test]
fn pixel_crop_is_symmetric_within_one_pixel() {
    let (x, y, w, h) = cover_crop_px(1001, 300, 200, 100);
    assert_eq!((y, h), (0, 300));
    assert_eq!(w, 600);
    let right = 1001 - (x + w);
    assert!(x.abs_diff(right) <= 1);
}

#[test]
fn crop_to_cover_keeps_center_and_exact_size() {
    // Left third red, middle third green, right third blue.
    let img = image::RgbaImage::from_fn(300, 100, |x, _| match x / 100 {
        0 => image::Rgba([255, 0, 0, 255]),
        1 => image::Rgba([0, 255, 0, 255]),
        _ => image::Rgba([0, 0, 255, 255]),
    });
    let prepared = PreparedImage::from_straight(img);

    let out = crop_to_cover(&prepared, 40, 40).unwrap();
    assert_eq!((out.width(), out.height()), (40, 40));
    for px in out.pixels.pixels() {
        assert_eq!(px.0, [0, 255, 0, 255]);
    }
}

#[test]
fn resize_exact_hits_requested_size() {
    let prepared = PreparedImage::from_straight(image::RgbaImage::new(10, 30));
    let out = resize_exact(&prepared, 90, 90).unwrap();
    assert_eq!((out.width(), out.height()), (90, 90));
    assert!(resize_exact(&prepared, 0, 90).is_err());
}
