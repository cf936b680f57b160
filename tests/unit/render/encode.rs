use super::*;

fn frame(width: u32, height: u32, premul: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: premul.repeat((width * height) as usize),
    }
}

#[test]
fn png_round_trips_dimensions_and_unpremultiplies() {
    let png = encode_png(&frame(3, 2, [64, 0, 0, 128])).unwrap();
    assert_eq!(&png[1..4], b"PNG");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    let p = decoded.get_pixel(0, 0).0;
    assert_eq!(p[3], 128);
    assert!((126..=129).contains(&p[0]), "r = {}", p[0]);
}

#[test]
fn mismatched_buffer_is_encode_error() {
    let mut bad = frame(2, 2, [0, 0, 0, 255]);
    bad.data.pop();
    let err = encode_png(&bad).unwrap_err();
    assert!(matches!(err, CardError::Encode(_)));
}

#[test]
fn atomic_write_creates_dirs_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out/card.png");
    write_png_atomic(&out, b"not really a png").unwrap();

    assert_eq!(std::fs::read(&out).unwrap(), b"not really a png");
    let names: Vec<_> = std::fs::read_dir(out.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("card.png")]);
}

#[test]
fn card_paths_are_named_by_timestamp_and_sequence() {
    let path = next_card_path(Path::new("out"));
    let name = path.file_name().unwrap().to_str().unwrap();
    let stem = name
        .strip_prefix("card_")
        .and_then(|s| s.strip_suffix(".png"))
        .unwrap();
    let (millis, seq) = stem.split_once('_').unwrap();
    assert!(millis.parse::<u128>().is_ok());
    assert!(seq.parse::<u64>().is_ok());
    assert_eq!(path.parent(), Some(Path::new("out")));
}

#[test]
fn back_to_back_card_paths_differ() {
    let dir = Path::new("cards");
    let paths: Vec<_> = (0..64).map(|_| next_card_path(dir)).collect();
    let unique: std::collections::BTreeSet<_> = paths.iter().collect();
    assert_eq!(unique.len(), paths.len());
}

#[test]
fn concurrent_writes_to_fresh_paths_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let written: Vec<PathBuf> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let dir = dir.path();
                scope.spawn(move || {
                    let path = next_card_path(dir);
                    write_png_atomic(&path, &[i; 16]).unwrap();
                    path
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 8);
    for path in written {
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 16);
    }
}
