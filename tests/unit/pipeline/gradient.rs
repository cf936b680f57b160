use std::io::Cursor;

use super::*;

fn png(w: u32, h: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        w,
        h,
        image::Rgba([10, 20, 30, 255]),
    ))
    .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
    .unwrap();
    buf
}

fn write_template_assets(root: &std::path::Path, skip: &str) {
    std::fs::create_dir_all(root.join("assets")).unwrap();
    for (name, w, h) in [
        ("background.png", 108, 135),
        ("gradient.png", 108, 40),
        ("logo.png", 30, 30),
    ] {
        if name != skip {
            std::fs::write(root.join("assets").join(name), png(w, h)).unwrap();
        }
    }
}

fn render(root: &std::path::Path, photo: Option<&[u8]>) -> CardResult<RenderedCard> {
    render_gradient_card(
        &GradientCardSpec::default(),
        &AssetLoader::new(root),
        &FontBook::default(),
        photo,
        "%%%Title%%%\nbody",
        "Photo: someone",
    )
}

#[test]
fn missing_background_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write_template_assets(dir.path(), "background.png");
    let err = render(dir.path(), Some(png(4, 4).as_slice())).unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)), "{err}");
    assert!(err.to_string().contains("background.png"));
}

#[test]
fn missing_logo_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    write_template_assets(dir.path(), "logo.png");
    let err = render(dir.path(), Some(png(4, 4).as_slice())).unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)), "{err}");
}

#[test]
fn missing_photo_is_image_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    write_template_assets(dir.path(), "");
    let err = render(dir.path(), None).unwrap_err();
    assert!(matches!(err, CardError::ImageDecode(_)), "{err}");
}

#[test]
fn corrupt_photo_is_image_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    write_template_assets(dir.path(), "");
    let err = render(dir.path(), Some(&b"definitely not an image"[..])).unwrap_err();
    assert!(matches!(err, CardError::ImageDecode(_)), "{err}");
}

#[test]
fn unloaded_fonts_fail_after_images_are_checked() {
    let dir = tempfile::tempdir().unwrap();
    write_template_assets(dir.path(), "");
    let err = render(dir.path(), Some(png(40, 10).as_slice())).unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)), "{err}");
    assert!(err.to_string().contains("font"));
}

#[test]
fn caption_line_breaks_become_single_spaces() {
    assert_eq!(caption_line("Photo: Ann\nEdit: Bob"), "Photo: Ann Edit: Bob");
    assert_eq!(caption_line("a\r\nb\rc"), "a b c");
    assert_eq!(caption_line("no breaks"), "no breaks");
    assert!(!caption_line("x\n\ny\n").contains('\n'));
}
