use super::*;

const WHITE: Rgba8 = Rgba8::WHITE;
const ACCENT: Rgba8 = Rgba8::opaque(0xff, 0xa8, 0x2b);

#[test]
fn lines_after_first_blank_are_accented() {
    let colors = paragraph_colors(&["Top", "", "Bottom1", "Bottom2"], WHITE, ACCENT);
    assert_eq!(colors, vec![WHITE, WHITE, ACCENT, ACCENT]);
}

#[test]
fn no_blank_line_keeps_everything_default() {
    let colors = paragraph_colors(&["One", "Two", "Three"], WHITE, ACCENT);
    assert_eq!(colors, vec![WHITE; 3]);
}

#[test]
fn leading_blank_line_switches_immediately() {
    let colors = paragraph_colors(&["", "A", "B"], WHITE, ACCENT);
    assert_eq!(colors, vec![WHITE, ACCENT, ACCENT]);
}

#[test]
fn switch_is_one_shot() {
    let colors = paragraph_colors(&["A", "", "B", "", "C"], WHITE, ACCENT);
    assert_eq!(colors, vec![WHITE, WHITE, ACCENT, ACCENT, ACCENT]);
}

#[test]
fn whitespace_only_line_is_not_blank() {
    let colors = paragraph_colors(&["A", " ", "B"], WHITE, ACCENT);
    assert_eq!(colors, vec![WHITE; 3]);
}

#[test]
fn missing_background_is_asset_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_title_card(
        &TitleCardSpec::default(),
        &AssetLoader::new(dir.path()),
        &FontBook::default(),
        "Top\n\nBottom",
    )
    .unwrap_err();
    assert!(matches!(err, crate::CardError::AssetLoad(_)), "{err}");
    assert!(err.to_string().contains("bgFull.png"));
}
