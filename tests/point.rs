use wgpu_pcstream::{Point, glam::*, packed_rgba8_colors};

#[test]
fn test_point_color_from_f32_should_scale_to_rgba8() {
    let color = Point::color_from_f32(Vec4::new(0.0, 1.0, 0.2, 1.0));

    assert_eq!(color.x, 0);
    assert_eq!(color.y, 255);
    assert_eq!(color.w, 255);
    assert!((50..=51).contains(&color.z));
}

#[test]
fn test_point_color_from_f32_should_clamp_out_of_range_channels() {
    let color = Point::color_from_f32(Vec4::new(-0.5, 2.0, 0.0, 1.5));

    assert_eq!(color, U8Vec4::new(0, 255, 0, 255));
}

#[test]
fn test_packed_rgba8_colors_should_decode_four_bytes_per_color() {
    let bytes = [1u8, 2, 3, 4, 5, 6, 7, 8];

    let colors = packed_rgba8_colors(&bytes).collect::<Vec<_>>();

    assert_eq!(colors, [U8Vec4::new(1, 2, 3, 4), U8Vec4::new(5, 6, 7, 8)]);
}

#[test]
fn test_packed_rgba8_colors_should_drop_trailing_partial_color() {
    let bytes = [1u8, 2, 3, 4, 5, 6];

    let colors = packed_rgba8_colors(&bytes).collect::<Vec<_>>();

    assert_eq!(colors, [U8Vec4::new(1, 2, 3, 4)]);
}
