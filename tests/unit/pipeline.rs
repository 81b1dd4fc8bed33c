use std::path::PathBuf;

use image::Rgba;

use super::*;

fn small_context() -> TilesetContext {
    let mut g = GridGeometry {
        tile_count: 10,
        columns: 4,
        ..GridGeometry::default()
    };
    g.bonus_groups[0].first_index = 2;
    g.bonus_groups[1].first_index = 6;
    TilesetContext::builtin(g).unwrap()
}

fn source_dir(name: &str, count: u32) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_pipeline").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    for i in 0..count {
        let img = RgbaImage::from_fn(20 + i, 30, |x, y| {
            Rgba([(x * 11) as u8, (y * 7) as u8, (i * 20) as u8, 255])
        });
        img.save(dir.join(format!("{i}-img.png"))).unwrap();
    }
    dir
}

#[test]
fn canvas_matches_geometry() {
    let ctx = small_context();
    let dir = source_dir("canvas_matches_geometry", 10);
    let canvas = build_tileset(&dir, &ctx, &TileThreading::default()).unwrap();
    assert_eq!(canvas.dimensions(), (4 * 96, 3 * 2 * 132));
}

#[test]
fn parallel_matches_sequential() {
    let ctx = small_context();
    let dir = source_dir("parallel_matches_sequential", 10);
    let seq = build_tileset(&dir, &ctx, &TileThreading::default()).unwrap();
    let par = build_tileset(
        &dir,
        &ctx,
        &TileThreading {
            parallel: true,
            threads: Some(3),
        },
    )
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn bonus_tiles_get_frames() {
    let ctx = small_context();
    let dir = source_dir("bonus_tiles_get_frames", 10);
    let sources = scan_source_dir(&dir, &ctx.geometry).unwrap();

    let plain = prepare_tile(&sources[1], &ctx).unwrap();
    assert!(plain.placement.bonus.is_none());

    let bonus = prepare_tile(&sources[6], &ctx).unwrap();
    assert_eq!(bonus.placement.bonus, Some(crate::tile::frame::BonusGroupId(1)));
    let green = ctx.geometry.bonus_groups[1].color.to_rgba();
    assert_eq!(*bonus.tile.normal.get_pixel(50, 6), green);
    assert_ne!(*plain.tile.normal.get_pixel(50, 6), green);
}

#[test]
fn zero_threads_is_rejected() {
    let ctx = small_context();
    let dir = source_dir("zero_threads", 10);
    let err = build_tileset(
        &dir,
        &ctx,
        &TileThreading {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(matches!(err, TilesetError::Config(_)));
}

#[test]
fn context_rejects_mismatched_template() {
    let g = GridGeometry::default();
    let mut t = Template::builtin(&g);
    t.blank_selected = RgbaImage::new(1, 1);
    assert!(TilesetContext::new(g, t).is_err());
}

#[test]
fn oversized_geometry_is_rejected_before_drawing() {
    let g = GridGeometry {
        columns: 50_000_000,
        ..GridGeometry::default()
    };
    let err = TilesetContext::builtin(g).unwrap_err();
    assert!(matches!(err, TilesetError::Config(_)), "{err:?}");
}
