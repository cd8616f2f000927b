use super::*;
use crate::test_support::png_bytes;

#[test]
fn decode_image_png_keeps_straight_alpha() {
    let buf = png_bytes(1, 1, [100, 50, 200, 128]);

    let raster = decode_image(&buf).unwrap();
    assert_eq!(raster.width, 1);
    assert_eq!(raster.height, 1);
    assert_eq!(raster.data, vec![100, 50, 200, 128]);
}

#[test]
fn decode_image_rejects_corrupt_bytes() {
    let err = decode_image(b"\x89PNG\r\n\x1a\nnot really").unwrap_err();
    assert!(matches!(err, PrimitiveError::Decode(_)));
}

#[test]
fn raster_from_rgb_image_adds_opaque_alpha() {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        2,
        1,
        image::Rgb([9, 8, 7]),
    ));
    let raster = raster_from_image(&img).unwrap();
    assert_eq!(raster.data, vec![9, 8, 7, 255, 9, 8, 7, 255]);
}

#[test]
fn raster_from_empty_image_is_decode_error() {
    let img = image::DynamicImage::new_rgba8(0, 0);
    let err = raster_from_image(&img).unwrap_err();
    assert!(matches!(err, PrimitiveError::Decode(_)));
}
