use glam::*;

/// One triangle of the proxy mesh.
///
/// The footprint never reflects the rendered splat position; the vertex
/// shader repositions each triangle from the texel matching its slot index.
/// Fields are plain [`Vec3`] so a slice of triangles doubles as a flat
/// vertex buffer, see
/// [`ProxyVertexBuffer::VERTEX_LAYOUT`](crate::ProxyVertexBuffer::VERTEX_LAYOUT).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProxyTriangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

/// Build the proxy triangle stack for `point_count` point slots.
///
/// Each slot is an equilateral triangle of side length 1 around the local
/// origin, apex toward +Y, normal facing +Z, offset along Z by `index / 10`
/// so consecutive slots never overlap degenerately. A zero count yields an
/// empty stack and callers keep any previously bound geometry.
pub fn build_triangle_stack(point_count: usize) -> Vec<ProxyTriangle> {
    let side = 1.0f32;
    let sqrt3 = 3.0f32.sqrt();
    // radius of the inscribed circle
    let r = sqrt3 / 6.0 * side;

    (0..point_count)
        .map(|i| {
            let z = i as f32 / 10.0;

            ProxyTriangle {
                a: Vec3::new(0.0, side / sqrt3, z),
                b: Vec3::new(side / 2.0, -r, z),
                c: Vec3::new(-side / 2.0, -r, z),
            }
        })
        .collect()
}
