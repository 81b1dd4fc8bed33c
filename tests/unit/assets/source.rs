use image::Rgba;

use super::*;
use crate::params::parser::{ParamKey, Resample};

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_source").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str) {
    RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]))
        .save(dir.join(name))
        .unwrap();
}

fn small_geometry(tile_count: u32) -> GridGeometry {
    let mut g = GridGeometry {
        tile_count,
        ..GridGeometry::default()
    };
    g.bonus_groups[0].first_index = 0;
    g.bonus_groups[1].first_index = 4;
    g
}

#[test]
fn scans_sorts_and_parses() {
    let dir = fresh_dir("scans_sorts_and_parses");
    for i in 0..8 {
        write_png(&dir, &format!("{i}-tile.png"));
    }
    std::fs::rename(dir.join("5-tile.png"), dir.join("5-tile__resample_NEAREST.png")).unwrap();
    std::fs::write(dir.join("README.txt"), "not an image").unwrap();
    std::fs::write(dir.join(".hidden.png"), "junk").unwrap();

    let sources = scan_source_dir(&dir, &small_geometry(8)).unwrap();
    assert_eq!(sources.len(), 8);
    let indices: Vec<u32> = sources.iter().map(|s| s.index).collect();
    assert_eq!(indices, (0..8).collect::<Vec<_>>());

    let five = &sources[5];
    assert_eq!(five.file_name, "5-tile__resample_NEAREST.png");
    assert_eq!(five.params.get(ParamKey::Resample), Some("NEAREST"));
    assert_eq!(five.tile_params.resample, Resample::Nearest);
    assert_eq!(sources[0].tile_params.resample, Resample::Lanczos);

    assert_eq!(five.decode().unwrap().dimensions(), (3, 2));
}

#[test]
fn wrong_count_is_input_count_error() {
    let dir = fresh_dir("wrong_count");
    for i in 0..7 {
        write_png(&dir, &format!("{i}-tile.png"));
    }
    let err = scan_source_dir(&dir, &small_geometry(8)).unwrap_err();
    match err {
        TilesetError::InputCount(msg) => assert!(msg.contains("7 images"), "{msg}"),
        other => panic!("expected input count error, got {other:?}"),
    }
}

#[test]
fn bad_parameter_fails_the_scan() {
    let dir = fresh_dir("bad_parameter");
    for i in 0..7 {
        write_png(&dir, &format!("{i}-tile.png"));
    }
    write_png(&dir, "7-tile__flip_vertical.png");
    let err = scan_source_dir(&dir, &small_geometry(8)).unwrap_err();
    assert!(matches!(err, TilesetError::Config(_)), "{err:?}");
}

#[test]
fn missing_directory_is_io_error() {
    let err = scan_source_dir(Path::new("target/unit_source/nope"), &small_geometry(8))
        .unwrap_err();
    assert!(matches!(err, TilesetError::Io(_)));
}

#[test]
fn undecodable_file_is_io_error() {
    let dir = fresh_dir("undecodable");
    for i in 0..7 {
        write_png(&dir, &format!("{i}-tile.png"));
    }
    std::fs::write(dir.join("7-broken.png"), "definitely not a png").unwrap();
    let sources = scan_source_dir(&dir, &small_geometry(8)).unwrap();
    let err = sources[7].decode().unwrap_err();
    match err {
        TilesetError::Io(e) => assert!(format!("{e:#}").contains("7-broken.png")),
        other => panic!("expected io error, got {other:?}"),
    }
}
