use wgpu_pcstream::{Point, glam::*};

pub fn point_with_seed(seed: u32) -> Point {
    let base = seed as f32;

    let pos = Vec3::new(base + 1.0, base + 2.0, base + 3.0);

    let color = U8Vec4::new(
        ((base + 10.0) % 256.0) as u8,
        ((base + 20.0) % 256.0) as u8,
        ((base + 30.0) % 256.0) as u8,
        ((base + 40.0) % 256.0) as u8,
    );

    Point::new(pos, color)
}

pub fn points_with_seed(count: usize) -> Vec<Point> {
    (0..count as u32).map(point_with_seed).collect()
}

pub fn positions_with_seed(count: usize) -> Vec<Vec3> {
    points_with_seed(count).iter().map(|p| p.pos).collect()
}

pub fn rgba_f32_colors_with_seed(count: usize) -> Vec<Vec4> {
    points_with_seed(count)
        .iter()
        .map(|p| p.color.as_vec4() / 255.0)
        .collect()
}

pub fn packed_colors_with_seed(count: usize) -> Vec<u8> {
    points_with_seed(count)
        .iter()
        .flat_map(|p| p.color.to_array())
        .collect()
}
