use image::Rgba;

use super::*;
use crate::layout::grid::place;

fn solid_pair(g: &GridGeometry, normal: [u8; 4], selected: [u8; 4]) -> TilePair {
    TilePair {
        normal: RgbaImage::from_pixel(g.tile_width, g.tile_height, Rgba(normal)),
        selected: RgbaImage::from_pixel(g.tile_width, g.tile_height, Rgba(selected)),
    }
}

#[test]
fn place_writes_only_the_tiles_cells() {
    let g = GridGeometry::default();
    let t = Template::builtin(&g);
    let mut c = Compositor::new(&g, &t);

    let p = place(3, &g).unwrap();
    c.place(&p, &solid_pair(&g, [255, 0, 0, 255], [0, 0, 255, 255]))
        .unwrap();
    let canvas = c.finish();

    assert_eq!(canvas.dimensions(), t.tileset.dimensions());
    assert_eq!(canvas.get_pixel(3 * 96, 0).0, [255, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(4 * 96 - 1, 131).0, [255, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(3 * 96, 132).0, [0, 0, 255, 255]);
    assert_eq!(canvas.get_pixel(4 * 96, 0), t.tileset.get_pixel(4 * 96, 0));
    assert_eq!(canvas.get_pixel(3 * 96 - 1, 0), t.tileset.get_pixel(3 * 96 - 1, 0));
}

#[test]
fn transparent_tiles_are_composited() {
    let g = GridGeometry::default();
    let t = Template::builtin(&g);
    let mut c = Compositor::new(&g, &t);

    let p = place(0, &g).unwrap();
    c.place(&p, &solid_pair(&g, [9, 9, 9, 0], [9, 9, 9, 0]))
        .unwrap();
    assert_eq!(c.finish(), t.tileset);
}

#[test]
fn cell_outside_canvas_is_layout_error() {
    let g = GridGeometry::default();
    let mut t = Template::builtin(&g);
    t.tileset = RgbaImage::new(96 * 2, 264);
    let mut c = Compositor::new(&g, &t);

    let p = place(5, &g).unwrap();
    let err = c
        .place(&p, &solid_pair(&g, [0, 0, 0, 255], [0, 0, 0, 255]))
        .unwrap_err();
    assert!(matches!(err, TilesetError::Layout(_)));
}

#[test]
fn atomic_write_leaves_no_temp_file() {
    let dir = PathBuf::from("target").join("unit_compose").join("atomic_ok");
    let _ = std::fs::remove_dir_all(&dir);
    let out = dir.join("nested").join("tiles.png");

    let canvas = RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255]));
    write_png_atomic(&canvas, &out).unwrap();

    assert!(out.exists());
    assert!(!dir.join("nested").join("tiles.png.tmp").exists());
    let back = image::open(&out).unwrap().to_rgba8();
    assert_eq!(back, canvas);
}

#[test]
fn failed_write_leaves_nothing_behind() {
    let dir = PathBuf::from("target").join("unit_compose").join("atomic_fail");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    // The destination is an existing non-empty directory, so the final rename fails.
    let out = dir.join("occupied");
    std::fs::create_dir_all(out.join("child")).unwrap();

    let canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
    let err = write_png_atomic(&canvas, &out).unwrap_err();
    assert!(matches!(err, TilesetError::Io(_)));
    assert!(!dir.join("occupied.tmp").exists());
    assert!(out.is_dir());
}

#[test]
fn output_without_file_name_is_rejected() {
    let canvas = RgbaImage::new(1, 1);
    assert!(write_png_atomic(&canvas, Path::new("/")).is_err());
}
