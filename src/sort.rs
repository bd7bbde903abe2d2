use glam::*;
use itertools::Itertools;

use crate::DepthSortError;

/// The maximum number of points [`sort_by_depth`] accepts.
///
/// Sorting cost must stay bounded regardless of total cloud size; clouds
/// beyond the limit render unsorted.
pub const MAX_SORT_POINT_COUNT: usize = 100_000;

/// Reorder `positions` and `colors` in lock-step, back to front relative to
/// `cam_pos`.
///
/// Both slices must cover the live point range only, see
/// [`PointTexels::live_ranges_mut`](crate::PointTexels::live_ranges_mut).
/// After a successful sort the camera distances are non-increasing along the
/// slices and every color still sits at the same index as its position.
/// When the point count exceeds [`MAX_SORT_POINT_COUNT`] the call fails
/// without touching either slice.
pub fn sort_by_depth(
    positions: &mut [Vec4],
    colors: &mut [U8Vec4],
    cam_pos: Vec3,
) -> Result<(), DepthSortError> {
    debug_assert_eq!(positions.len(), colors.len());

    if positions.len() > MAX_SORT_POINT_COUNT {
        return Err(DepthSortError::PointCountExceedsLimit {
            point_count: positions.len(),
            limit: MAX_SORT_POINT_COUNT,
        });
    }

    let sorted = positions
        .iter()
        .zip(colors.iter())
        .map(|(&pos, &color)| (cam_pos.distance_squared(pos.truncate()), pos, color))
        .sorted_unstable_by(|a, b| b.0.total_cmp(&a.0))
        .collect::<Vec<_>>();

    for (i, (_, pos, color)) in sorted.into_iter().enumerate() {
        positions[i] = pos;
        colors[i] = color;
    }

    Ok(())
}
