use super::*;

const RED: PremulRgba8 = [255, 0, 0, 255];
const HALF_BLUE: PremulRgba8 = [0, 0, 128, 128];

#[test]
fn over_handles_opaque_and_transparent_sources() {
    assert_eq!(over(RED, [0, 0, 0, 0]), RED);
    assert_eq!(over([0, 0, 0, 0], RED), RED);
    assert_eq!(over(RED, HALF_BLUE), [127, 0, 128, 255]);
}

#[test]
fn draw_over_clips_negative_and_overflowing_offsets() {
    let mut dst = Bitmap::new(4, 3);
    let src = Bitmap::filled(3, 2, RED);

    dst.draw_over(&src, -1, 2);
    assert_eq!(dst.pixel(0, 2), Some(RED));
    assert_eq!(dst.pixel(1, 2), Some(RED));
    assert_eq!(dst.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(dst.pixel(0, 1), Some([0, 0, 0, 0]));

    dst.draw_over(&src, 10, 10);
    dst.draw_over(&src, -3, 0);
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn mask_multiplies_by_coverage() {
    let mut bmp = Bitmap::filled(2, 1, RED);
    let mut mask = Bitmap::new(2, 1);
    mask.draw_over(&Bitmap::filled(1, 1, [255, 255, 255, 255]), 0, 0);
    bmp.mask_with(&mask).unwrap();
    assert_eq!(bmp.pixel(0, 0), Some(RED));
    assert_eq!(bmp.pixel(1, 0), Some([0, 0, 0, 0]));

    assert!(bmp.mask_with(&Bitmap::new(3, 3)).is_err());
}

#[test]
fn byte_length_is_validated() {
    assert!(Bitmap::from_premul_rgba8(2, 2, vec![0; 15]).is_err());
    let bmp = Bitmap::from_premul_rgba8(2, 2, vec![0; 16]).unwrap();
    assert!(bmp.is_blank());
    assert!(!bmp.is_empty());
}

#[test]
fn fit_within_keeps_aspect() {
    assert_eq!(fit_within(500, 500, 100, 100), (100, 100));
    assert_eq!(fit_within(400, 200, 100, 100), (100, 50));
    assert_eq!(fit_within(200, 400, 100, 100), (50, 100));
    assert_eq!(fit_within(0, 10, 100, 100), (0, 0));
}

#[test]
fn resize_solid_color_stays_solid() {
    let bmp = Bitmap::filled(8, 4, RED);
    let small = bmp.scaled_to_fit(4, 4).unwrap();
    assert_eq!((small.width(), small.height()), (4, 2));
    assert!(small.data().chunks_exact(4).all(|px| {
        px.iter()
            .zip(RED)
            .all(|(&a, b)| (i16::from(a) - i16::from(b)).abs() <= 1)
    }));
}

#[test]
fn rgba_export_unpremultiplies() {
    let bmp = Bitmap::filled(1, 1, HALF_BLUE);
    let img = bmp.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 128]);
}

#[test]
fn write_rows_replaces_a_horizontal_strip() {
    let mut dst = Bitmap::filled(3, 4, [1, 1, 1, 1]);
    let strip = Bitmap::filled(3, 2, [9, 9, 9, 255]);
    dst.write_rows(1, &strip).unwrap();
    assert_eq!(dst.pixel(1, 0), Some([1, 1, 1, 1]));
    assert_eq!(dst.pixel(1, 1), Some([9, 9, 9, 255]));
    assert_eq!(dst.pixel(1, 2), Some([9, 9, 9, 255]));
    assert_eq!(dst.pixel(1, 3), Some([1, 1, 1, 1]));

    assert!(dst.write_rows(3, &strip).is_err());
    assert!(dst.write_rows(0, &Bitmap::new(2, 1)).is_err());
}
