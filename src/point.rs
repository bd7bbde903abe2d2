use glam::*;

/// A point of the cloud.
///
/// This is the CPU-side intermediate representation consumed by
/// [`PointTexels`](crate::PointTexels): a position in the owning object's
/// local space paired with an RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub pos: Vec3,
    pub color: U8Vec4,
}

impl Point {
    /// Create a new point from an RGBA8 color.
    pub const fn new(pos: Vec3, color: U8Vec4) -> Self {
        Self { pos, color }
    }

    /// Create a new point from a float RGBA color in the \[0, 1\] range.
    pub fn from_rgba_f32(pos: Vec3, color: Vec4) -> Self {
        Self {
            pos,
            color: Self::color_from_f32(color),
        }
    }

    /// Convert a float RGBA color in the \[0, 1\] range to RGBA8.
    ///
    /// Out of range channels are clamped.
    pub fn color_from_f32(color: Vec4) -> U8Vec4 {
        (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).as_u8vec4()
    }
}

/// Iterate RGBA8 colors out of a packed byte stream, 4 bytes per color.
///
/// A trailing partial color is dropped.
pub fn packed_rgba8_colors(bytes: &[u8]) -> impl Iterator<Item = U8Vec4> + '_ {
    bytes
        .chunks_exact(4)
        .map(|c| U8Vec4::new(c[0], c[1], c[2], c[3]))
}

/// An axis-aligned bounding box, the spatial extent of a streamed cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a new bounding box.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Get the center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
