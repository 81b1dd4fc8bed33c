use image::{Rgba, RgbaImage};

use super::*;

fn plain_pair() -> TilePair {
    TilePair {
        normal: RgbaImage::from_pixel(96, 132, Rgba([0, 0, 0, 255])),
        selected: RgbaImage::from_pixel(96, 132, Rgba([0, 0, 0, 255])),
    }
}

#[test]
fn frame_uses_group_colours() {
    let g = GridGeometry::default();

    let mut pair = plain_pair();
    apply_bonus_frame(&mut pair, BonusGroupId(0), &g).unwrap();
    // Middle of the top edge of the (14, 6)-(93, 114) box.
    assert_eq!(pair.normal.get_pixel(50, 6).0, [0xd8, 0x19, 0xea, 0xff]);
    assert_eq!(pair.selected.get_pixel(50, 6).0, [0xf5, 0x8b, 0xff, 0xff]);

    let mut pair = plain_pair();
    apply_bonus_frame(&mut pair, BonusGroupId(1), &g).unwrap();
    assert_eq!(pair.normal.get_pixel(50, 6).0, [0x1d, 0xbf, 0x4e, 0xff]);
    assert_eq!(pair.selected.get_pixel(50, 6).0, [0x77, 0xe9, 0x98, 0xff]);
}

#[test]
fn frame_is_inset_and_hollow() {
    let g = GridGeometry::default();
    let mut pair = plain_pair();
    apply_bonus_frame(&mut pair, BonusGroupId(0), &g).unwrap();

    let black = [0, 0, 0, 255];
    assert_eq!(pair.normal.get_pixel(50, 5).0, black);
    assert_eq!(pair.normal.get_pixel(50, 10).0, [0xd8, 0x19, 0xea, 0xff]);
    assert_eq!(pair.normal.get_pixel(50, 11).0, black);
    assert_eq!(pair.normal.get_pixel(50, 60).0, black);
    assert_eq!(pair.normal.get_pixel(14, 60).0, [0xd8, 0x19, 0xea, 0xff]);
    assert_eq!(pair.normal.get_pixel(13, 60).0, black);
    assert_eq!(pair.normal.get_pixel(93, 60).0, [0xd8, 0x19, 0xea, 0xff]);
    assert_eq!(pair.normal.get_pixel(94, 60).0, black);
    // Rounded corner.
    assert_eq!(pair.normal.get_pixel(14, 6).0, black);
}

#[test]
fn both_groups_share_the_same_shape() {
    let g = GridGeometry::default();
    let mut a = plain_pair();
    let mut b = plain_pair();
    apply_bonus_frame(&mut a, BonusGroupId(0), &g).unwrap();
    apply_bonus_frame(&mut b, BonusGroupId(1), &g).unwrap();

    let black = Rgba([0, 0, 0, 255]);
    let mask = |img: &RgbaImage| img.pixels().map(|p| *p != black).collect::<Vec<_>>();
    assert_eq!(mask(&a.normal), mask(&b.normal));
    assert_eq!(mask(&a.selected), mask(&b.selected));
}

#[test]
fn undefined_group_is_a_layout_error() {
    let g = GridGeometry::default();
    let mut pair = plain_pair();
    let before = pair.clone();
    let err = apply_bonus_frame(&mut pair, BonusGroupId(2), &g).unwrap_err();
    assert!(matches!(err, TilesetError::Layout(_)), "{err:?}");
    assert_eq!(pair, before);
}
