use super::*;
use vello_cpu::kurbo::Shape as _;

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter()
        .zip(b)
        .all(|(&x, y)| (i16::from(x) - i16::from(y)).abs() <= 1)
}

#[test]
fn rounded_rect_fills_center_and_clears_corners() {
    let bmp = rounded_rect(40, 20, 10.0, Rgb::from_packed(0x243447)).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (40, 20));
    assert!(close(bmp.pixel(20, 10).unwrap(), [0x24, 0x34, 0x47, 255]));
    assert_eq!(bmp.pixel(0, 0).map(|px| px[3]), Some(0));
    assert_eq!(bmp.pixel(39, 19).map(|px| px[3]), Some(0));
}

#[test]
fn circle_mask_is_opaque_inside_only() {
    let mask = circle_mask(50, 50).unwrap();
    assert_eq!(mask.pixel(25, 25).map(|px| px[3]), Some(255));
    assert_eq!(mask.pixel(1, 1).map(|px| px[3]), Some(0));
    assert_eq!(mask.pixel(48, 1).map(|px| px[3]), Some(0));
}

#[test]
fn zero_sized_shapes_are_empty() {
    assert!(rounded_rect(0, 10, 5.0, Rgb::BLACK).unwrap().is_empty());
}

#[test]
fn oversized_rasters_are_rejected() {
    assert!(matches!(
        rounded_rect(70_000, 1, 0.0, Rgb::BLACK),
        Err(QuoteError::Render(_))
    ));
}

#[test]
fn bands_stitch_without_seams() {
    let draw = |ctx: &mut vello_cpu::RenderContext, band: Affine| {
        ctx.set_transform(band);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(2.0, 3.0, 8.0, 20.0));
    };
    let banded = rasterize_in_bands(10, 25, 4, draw).unwrap();
    let whole = rasterize_in_bands(10, 25, 25, draw).unwrap();

    assert_eq!(banded, whole);
    assert_eq!(banded.pixel(5, 2).map(|px| px[3]), Some(0));
    for y in 3..20 {
        assert_eq!(banded.pixel(5, y), Some([255, 0, 0, 255]), "row {y}");
    }
    assert_eq!(banded.pixel(5, 20).map(|px| px[3]), Some(0));
    assert_eq!(banded.pixel(0, 10).map(|px| px[3]), Some(0));
}

#[test]
fn curved_edges_match_across_bands() {
    let draw = |ctx: &mut vello_cpu::RenderContext, band: Affine| {
        ctx.set_transform(band);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        let shape = vello_cpu::kurbo::Circle::new((15.0, 15.0), 12.0);
        ctx.fill_path(&shape.to_path(PATH_TOLERANCE));
    };
    let banded = rasterize_in_bands(30, 30, 7, draw).unwrap();
    let whole = rasterize_in_bands(30, 30, 30, draw).unwrap();
    for y in 0..30 {
        for x in 0..30 {
            assert!(
                close(banded.pixel(x, y).unwrap(), whole.pixel(x, y).unwrap()),
                "({x}, {y})"
            );
        }
    }
}

#[test]
fn rasters_taller_than_u16_are_drawn() {
    let tall = u32::from(u16::MAX) + 4_465;
    let bmp = rounded_rect(4, tall, 0.0, Rgb::from_packed(0x243447)).unwrap();
    assert_eq!((bmp.width(), bmp.height()), (4, tall));
    assert!(close(bmp.pixel(2, 0).unwrap(), [0x24, 0x34, 0x47, 255]));
    assert!(close(bmp.pixel(2, BAND_ROWS).unwrap(), [0x24, 0x34, 0x47, 255]));
    assert!(close(bmp.pixel(2, tall - 1).unwrap(), [0x24, 0x34, 0x47, 255]));
}
