use super::*;

fn styles(line: &LogicalLine) -> Vec<(String, StyleLevel)> {
    line.runs()
        .iter()
        .map(|r| (r.content().to_string(), r.style()))
        .collect()
}

#[test]
fn title_markup_is_one_title_run() {
    let line = parse_line("%%%A%%%");
    assert_eq!(styles(&line), vec![("A".to_string(), StyleLevel::Title)]);
}

#[test]
fn title_runs_are_uppercased_only_for_display() {
    let line = parse_line("%%%a%%%");
    let run = &line.runs()[0];
    assert_eq!(run.content(), "a");
    assert_eq!(run.display_text(), "A");
    assert_eq!(
        TextRun::new("ёлка", StyleLevel::Title).display_text(),
        "ЁЛКА"
    );
    assert_eq!(TextRun::new("a", StyleLevel::Bold).display_text(), "a");
}

#[test]
fn mixed_line_keeps_source_order() {
    let line = parse_line("%%99 Feb at 8:00%% %(Great place)% tail");
    assert_eq!(
        styles(&line),
        vec![
            ("99 Feb at 8:00".to_string(), StyleLevel::Bold),
            (" ".to_string(), StyleLevel::Plain),
            ("(Great place)".to_string(), StyleLevel::Italic),
            (" tail".to_string(), StyleLevel::Plain),
        ]
    );
}

#[test]
fn unterminated_bold_is_literal_plain() {
    let line = parse_line("%%Bonus");
    assert_eq!(
        styles(&line),
        vec![("%%Bonus".to_string(), StyleLevel::Plain)]
    );
}

#[test]
fn single_percent_pairs_lazily_with_next_one() {
    let line = parse_line("50% off %deal%");
    assert_eq!(
        styles(&line),
        vec![
            ("50".to_string(), StyleLevel::Plain),
            (" off ".to_string(), StyleLevel::Italic),
            ("deal%".to_string(), StyleLevel::Plain),
        ]
    );
}

#[test]
fn empty_runs_between_delimiters_are_kept() {
    let line = parse_line("%%%%%%");
    assert_eq!(styles(&line), vec![(String::new(), StyleLevel::Title)]);
    assert!(line.is_blank());

    let line = parse_line("a%%%%b");
    assert_eq!(
        styles(&line),
        vec![
            ("a".to_string(), StyleLevel::Plain),
            (String::new(), StyleLevel::Bold),
            ("b".to_string(), StyleLevel::Plain),
        ]
    );
}

#[test]
fn contents_concatenate_to_line_without_delimiters() {
    let cases = [
        ("%%%Title%%%", "Title"),
        ("plain only", "plain only"),
        ("%%b%% and %i% and %%%t%%%", "b and i and t"),
        ("x %%y%% z", "x y z"),
        ("", ""),
    ];
    for (src, expected) in cases {
        assert_eq!(parse_line(src).plain_text(), expected, "source: {src:?}");
    }
}

#[test]
fn template_preserves_blank_lines_and_strips_cr() {
    let lines = parse_template("%%%Head%%%\r\n\r\nbody\n");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].runs()[0].style(), StyleLevel::Title);
    assert!(lines[1].is_blank());
    assert_eq!(lines[2].plain_text(), "body");
    assert!(lines[3].is_blank());
}

#[test]
fn delimiters_never_cross_lines() {
    let lines = parse_template("%%open\nclose%%");
    assert_eq!(lines[0].plain_text(), "%%open");
    assert_eq!(lines[1].plain_text(), "close%%");
    assert!(
        lines
            .iter()
            .flat_map(|l| l.runs())
            .all(|r| r.style() == StyleLevel::Plain)
    );
}

#[test]
fn opener_is_never_shortened_to_find_a_closer() {
    let line = parse_line("%%%a%%");
    assert_eq!(
        styles(&line),
        vec![("%%%a%%".to_string(), StyleLevel::Plain)]
    );

    let line = parse_line("%%%a%%%%");
    assert_eq!(
        styles(&line),
        vec![
            ("a".to_string(), StyleLevel::Title),
            ("%".to_string(), StyleLevel::Plain),
        ]
    );
}
