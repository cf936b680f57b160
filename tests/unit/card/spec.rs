use super::*;

#[test]
fn defaults_match_the_classic_card_layout() {
    let g = GradientCardSpec::default();
    assert_eq!(g.text_origin, Point::new(65.0, 480.0));
    assert_eq!(g.max_text_width(1080), 1080.0 - 130.0);
    assert_eq!(g.logo_placement.size_px, 90);
    assert_eq!(g.logo_placement.margin_px, 35);
    assert_eq!(g.styles.line_heights().title, 45.0);
    assert_eq!(g.styles.line_heights().plain, 30.0);
    assert_eq!(g.caption.opacity, 0.2);
    g.validate().unwrap();

    let t = TitleCardSpec::default();
    assert_eq!(t.max_text_width(1080), 950.0);
    assert_eq!(t.accent_color.to_hex(), "#FFA82B");
    assert_eq!(t.font.line_height_px, 48.0);
    t.validate().unwrap();
}

#[test]
fn font_sources_cover_every_style_and_caption() {
    let cfg = StudioConfig::default();
    let sources = cfg.font_sources();
    for font in [
        "fonts/gothampro_black.ttf",
        "fonts/gothampro_bold.ttf",
        "fonts/gothampro_light.ttf",
        "fonts/gothampro_lightitalic.ttf",
    ] {
        assert!(sources.contains(&font), "missing {font}");
    }
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: StudioConfig = serde_json::from_str(
        r##"{ "title": { "accent_color": "#00FF00", "paragraph_gap": 0 } }"##,
    )
    .unwrap();
    assert_eq!(cfg.title.accent_color, Rgba8::opaque(0, 0xff, 0));
    assert_eq!(cfg.title.paragraph_gap, 0.0);
    assert_eq!(cfg.title.background, "assets/bgFull.png");
    assert_eq!(cfg.gradient, GradientCardSpec::default());
}

#[test]
fn validation_rejects_bad_values() {
    let mut g = GradientCardSpec::default();
    g.styles.bold.size_px = 0.0;
    assert!(matches!(g.validate(), Err(CardError::Validation(_))));

    let mut g = GradientCardSpec::default();
    g.caption.opacity = 1.5;
    assert!(g.validate().is_err());

    let mut g = GradientCardSpec::default();
    g.logo = "../logo.png".to_string();
    assert!(g.validate().is_err());

    let mut t = TitleCardSpec::default();
    t.paragraph_gap = -1.0;
    assert!(t.validate().is_err());
}

#[test]
fn from_path_resolves_root_next_to_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studio.json");
    std::fs::write(&path, r#"{ "assets_root": "media" }"#).unwrap();

    let cfg = StudioConfig::from_path(&path).unwrap();
    assert_eq!(cfg.assets_root, dir.path().join("media"));
}

#[test]
fn from_path_reports_bad_json_as_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studio.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        StudioConfig::from_path(&path),
        Err(CardError::Validation(_))
    ));
}
