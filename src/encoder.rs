use glam::*;

use crate::{AppendSnapshotError, EncodePointsError, Point};

/// The maximum side length of the encoded square textures.
pub const MAX_TEXTURE_RESOLUTION: u32 = 2048;

/// The maximum number of points a fully sized texture can hold.
pub const MAX_POINT_COUNT: usize = (MAX_TEXTURE_RESOLUTION * MAX_TEXTURE_RESOLUTION) as usize;

/// Get the side length of the smallest square texel grid holding
/// `point_count` texels.
pub fn texture_resolution_for(point_count: usize) -> u32 {
    (point_count as f64).sqrt().ceil() as u32
}

/// A spatial offset applied to every point of a snapshot at encode time.
///
/// The translation must already be in the cloud's local space, see
/// [`PointCloudStreamer::add_snapshot`](crate::PointCloudStreamer::add_snapshot).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotOffset {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl SnapshotOffset {
    /// The offset leaving points unchanged.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Create a new snapshot offset.
    pub const fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Apply the offset to a position.
    pub fn apply(&self, pos: Vec3) -> Vec3 {
        self.rotation * pos + self.translation
    }
}

impl Default for SnapshotOffset {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The square texel-grid encoding of a point cloud.
///
/// Positions are stored as [`Vec4`] texels (xyz + 1.0) and colors as RGBA8
/// [`U8Vec4`] texels, row-major, one texel per point. The texel at linear
/// index `i` always holds point `i` of the current logical ordering; texels
/// past the point count are zeroed.
///
/// Two write modes exist: [`PointTexels::set_points`] replaces the whole
/// encoding and sizes the grids to the incoming count, while
/// [`PointTexels::append_snapshot`] accumulates batches into grids sized to
/// the capacity ceiling up front, so appending never re-indexes earlier
/// points.
#[derive(Debug, Clone)]
pub struct PointTexels {
    positions: Vec<Vec4>,
    colors: Vec<U8Vec4>,
    point_count: usize,
    resolution: u32,
    max_resolution: u32,
}

impl PointTexels {
    /// Create an empty encoding bounded by [`MAX_TEXTURE_RESOLUTION`].
    pub fn new() -> Self {
        Self::with_max_resolution(MAX_TEXTURE_RESOLUTION)
    }

    /// Create an empty encoding with a custom resolution ceiling.
    ///
    /// Use this when the device's `max_texture_dimension_2d` is below
    /// [`MAX_TEXTURE_RESOLUTION`].
    pub fn with_max_resolution(max_resolution: u32) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            point_count: 0,
            resolution: 0,
            max_resolution,
        }
    }

    /// Get the resolution ceiling.
    pub fn max_resolution(&self) -> u32 {
        self.max_resolution
    }

    /// Get the maximum number of points the encoding can hold.
    pub fn capacity(&self) -> usize {
        self.max_resolution as usize * self.max_resolution as usize
    }

    /// Get the number of encoded points.
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Check if no points are encoded.
    pub fn is_empty(&self) -> bool {
        self.point_count == 0
    }

    /// Get the current side length of the texel grids.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Get the position texel grid.
    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    /// Get the color texel grid.
    pub fn colors(&self) -> &[U8Vec4] {
        &self.colors
    }

    /// Get mutable views of the live (non-padding) texel range, in lock-step.
    pub fn live_ranges_mut(&mut self) -> (&mut [Vec4], &mut [U8Vec4]) {
        (
            &mut self.positions[..self.point_count],
            &mut self.colors[..self.point_count],
        )
    }

    /// Replace the entire encoding with `points`.
    ///
    /// On success the grids are resized to the smallest square holding
    /// `points.len()` texels and the logical count equals `points.len()`.
    /// On error nothing is mutated.
    pub fn set_points(&mut self, points: &[Point]) -> Result<(), EncodePointsError> {
        if points.is_empty() {
            return Err(EncodePointsError::EmptyPoints);
        }
        if points.len() > self.capacity() {
            return Err(EncodePointsError::CapacityExceeded {
                point_count: points.len(),
                capacity: self.capacity(),
            });
        }

        let resolution = texture_resolution_for(points.len());
        let texel_count = resolution as usize * resolution as usize;
        self.positions.clear();
        self.positions.resize(texel_count, Vec4::ZERO);
        self.colors.clear();
        self.colors.resize(texel_count, U8Vec4::ZERO);

        for (pos_texel, color_texel, point) in
            itertools::izip!(&mut self.positions, &mut self.colors, points)
        {
            *pos_texel = point.pos.extend(1.0);
            *color_texel = point.color;
        }

        self.point_count = points.len();
        self.resolution = resolution;

        Ok(())
    }

    /// Append `points` as one snapshot at the next free texel indices,
    /// applying `offset` to every position.
    ///
    /// The grids are sized to the resolution ceiling on first use so that
    /// later appends never resize, and therefore never re-index, the
    /// encoding. On error nothing is mutated; in particular a snapshot
    /// overflowing the capacity is rejected whole rather than truncated.
    pub fn append_snapshot(
        &mut self,
        points: &[Point],
        offset: SnapshotOffset,
    ) -> Result<(), AppendSnapshotError> {
        if points.is_empty() {
            return Err(AppendSnapshotError::EmptyPoints);
        }
        if self.point_count + points.len() > self.capacity() {
            return Err(AppendSnapshotError::CapacityExceeded {
                point_count: self.point_count,
                appended: points.len(),
                capacity: self.capacity(),
            });
        }

        let texel_count = self.capacity();
        if self.positions.len() != texel_count {
            // grow only, keeping any previously encoded points in place
            self.positions.resize(texel_count, Vec4::ZERO);
            self.colors.resize(texel_count, U8Vec4::ZERO);
            self.resolution = self.max_resolution;
        }

        for (i, point) in points.iter().enumerate() {
            let texel = self.point_count + i;
            self.positions[texel] = offset.apply(point.pos).extend(1.0);
            self.colors[texel] = point.color;
        }
        self.point_count += points.len();

        Ok(())
    }
}

impl Default for PointTexels {
    fn default() -> Self {
        Self::new()
    }
}
