use std::io::Cursor;

use super::*;

#[test]
fn normalize_rel_path_cleans_and_rejects() {
    assert_eq!(
        normalize_rel_path("./assets//logo.png").unwrap(),
        "assets/logo.png"
    );
    assert_eq!(
        normalize_rel_path("fonts\\gothampro_bold.ttf").unwrap(),
        "fonts/gothampro_bold.ttf"
    );
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../secret.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn missing_asset_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let loader = AssetLoader::new(dir.path());
    let err = loader.load_image("assets/background.png").unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)), "{err}");
    assert!(err.to_string().contains("background.png"));
}

#[test]
fn corrupt_asset_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("logo.png"), b"not a png").unwrap();
    let err = AssetLoader::new(dir.path())
        .load_image("logo.png")
        .unwrap_err();
    assert!(matches!(err, CardError::AssetLoad(_)), "{err}");
}

#[test]
fn load_image_decodes_from_root() {
    let dir = tempfile::tempdir().unwrap();
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::create_dir_all(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets/gradient.png"), buf).unwrap();

    let loaded = AssetLoader::new(dir.path())
        .load_image("assets/gradient.png")
        .unwrap();
    assert_eq!((loaded.width(), loaded.height()), (3, 2));
}

#[test]
fn traversal_is_rejected_before_io() {
    let loader = AssetLoader::new("/nonexistent-root");
    assert!(matches!(
        loader.read_bytes("../x.png"),
        Err(CardError::Validation(_))
    ));
}
