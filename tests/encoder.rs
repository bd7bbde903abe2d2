use assert_matches::assert_matches;
use wgpu_pcstream::{
    AppendSnapshotError, EncodePointsError, MAX_TEXTURE_RESOLUTION, PointTexels, SnapshotOffset,
    glam::*, texture_resolution_for,
};

use crate::common::given;

#[test]
fn test_texture_resolution_for_should_return_smallest_square_side() {
    assert_eq!(texture_resolution_for(0), 0);
    assert_eq!(texture_resolution_for(1), 1);
    assert_eq!(texture_resolution_for(2), 2);
    assert_eq!(texture_resolution_for(4), 2);
    assert_eq!(texture_resolution_for(5), 3);
    assert_eq!(texture_resolution_for(9), 3);
    assert_eq!(texture_resolution_for(10), 4);
}

#[test]
fn test_point_texels_new_should_be_empty() {
    let texels = PointTexels::new();

    assert!(texels.is_empty());
    assert_eq!(texels.point_count(), 0);
    assert_eq!(texels.resolution(), 0);
    assert_eq!(texels.max_resolution(), MAX_TEXTURE_RESOLUTION);
}

#[test]
fn test_point_texels_set_points_should_encode_points_in_order() {
    let mut texels = PointTexels::new();
    let points = given::points_with_seed(5);

    texels.set_points(&points).expect("set_points");

    assert_eq!(texels.point_count(), 5);
    assert_eq!(texels.resolution(), 3);
    assert_eq!(texels.positions().len(), 9);
    assert_eq!(texels.colors().len(), 9);
    for (i, point) in points.iter().enumerate() {
        assert_eq!(texels.positions()[i], point.pos.extend(1.0));
        assert_eq!(texels.colors()[i], point.color);
    }
}

#[test]
fn test_point_texels_set_points_should_zero_padding_texels() {
    let mut texels = PointTexels::new();
    let points = given::points_with_seed(5);

    texels.set_points(&points).expect("set_points");

    assert!(texels.positions()[5..].iter().all(|&t| t == Vec4::ZERO));
    assert!(texels.colors()[5..].iter().all(|&t| t == U8Vec4::ZERO));
}

#[test]
fn test_point_texels_set_points_with_same_count_should_replace_in_place() {
    let mut texels = PointTexels::new();
    let points = given::points_with_seed(5);
    let new_points = (5..10).map(given::point_with_seed).collect::<Vec<_>>();

    texels.set_points(&points).expect("set_points");
    texels.set_points(&new_points).expect("set_points");

    assert_eq!(texels.point_count(), 5);
    assert_eq!(texels.resolution(), 3);
    for (i, point) in new_points.iter().enumerate() {
        assert_eq!(texels.positions()[i], point.pos.extend(1.0));
        assert_eq!(texels.colors()[i], point.color);
    }
}

#[test]
fn test_point_texels_set_points_when_empty_should_return_error_without_mutation() {
    let mut texels = PointTexels::new();
    let points = given::points_with_seed(3);
    texels.set_points(&points).expect("set_points");

    let result = texels.set_points(&[]);

    assert_matches!(result, Err(EncodePointsError::EmptyPoints));
    assert_eq!(texels.point_count(), 3);
    assert_eq!(texels.resolution(), 2);
}

#[test]
fn test_point_texels_set_points_when_over_capacity_should_return_error_without_mutation() {
    let mut texels = PointTexels::with_max_resolution(2);
    let points = given::points_with_seed(5);

    let result = texels.set_points(&points);

    assert_matches!(
        result,
        Err(EncodePointsError::CapacityExceeded {
            point_count: 5,
            capacity: 4,
        })
    );
    assert!(texels.is_empty());
    assert!(texels.positions().is_empty());
}

#[test]
fn test_point_texels_append_snapshot_should_size_grids_to_capacity_once() {
    let mut texels = PointTexels::with_max_resolution(4);
    let points = given::points_with_seed(3);

    texels
        .append_snapshot(&points, SnapshotOffset::IDENTITY)
        .expect("append_snapshot");

    assert_eq!(texels.resolution(), 4);
    assert_eq!(texels.positions().len(), 16);
    assert_eq!(texels.colors().len(), 16);
}

#[test]
fn test_point_texels_append_snapshot_should_append_in_call_order() {
    let mut texels = PointTexels::with_max_resolution(4);
    let first = given::points_with_seed(3);
    let second = (3..5).map(given::point_with_seed).collect::<Vec<_>>();

    texels
        .append_snapshot(&first, SnapshotOffset::IDENTITY)
        .expect("append_snapshot");
    texels
        .append_snapshot(&second, SnapshotOffset::IDENTITY)
        .expect("append_snapshot");

    assert_eq!(texels.point_count(), 5);
    for (i, point) in first.iter().chain(second.iter()).enumerate() {
        assert_eq!(texels.positions()[i], point.pos.extend(1.0));
        assert_eq!(texels.colors()[i], point.color);
    }
}

#[test]
fn test_point_texels_append_snapshot_should_apply_offset() {
    let mut texels = PointTexels::with_max_resolution(4);
    let points = [wgpu_pcstream::Point::new(
        Vec3::new(1.0, 0.0, 0.0),
        U8Vec4::new(255, 0, 0, 255),
    )];
    let offset = SnapshotOffset::new(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
    );

    texels
        .append_snapshot(&points, offset)
        .expect("append_snapshot");

    let encoded = texels.positions()[0];
    assert!((encoded - Vec4::new(10.0, 1.0, 0.0, 1.0)).abs().max_element() < 1e-6);
}

#[test]
fn test_point_texels_append_snapshot_when_over_capacity_should_return_error_without_mutation() {
    let mut texels = PointTexels::with_max_resolution(2);
    let first = given::points_with_seed(3);
    let second = (3..5).map(given::point_with_seed).collect::<Vec<_>>();
    texels
        .append_snapshot(&first, SnapshotOffset::IDENTITY)
        .expect("append_snapshot");
    let positions_before = texels.positions().to_vec();
    let colors_before = texels.colors().to_vec();

    let result = texels.append_snapshot(&second, SnapshotOffset::IDENTITY);

    assert_matches!(
        result,
        Err(AppendSnapshotError::CapacityExceeded {
            point_count: 3,
            appended: 2,
            capacity: 4,
        })
    );
    assert_eq!(texels.point_count(), 3);
    assert_eq!(texels.positions(), positions_before.as_slice());
    assert_eq!(texels.colors(), colors_before.as_slice());
}

#[test]
fn test_point_texels_append_snapshot_when_empty_should_return_error() {
    let mut texels = PointTexels::with_max_resolution(4);

    let result = texels.append_snapshot(&[], SnapshotOffset::IDENTITY);

    assert_matches!(result, Err(AppendSnapshotError::EmptyPoints));
    assert!(texels.is_empty());
}

#[test]
fn test_point_texels_append_snapshot_after_set_points_should_keep_existing_points() {
    let mut texels = PointTexels::with_max_resolution(4);
    let points = given::points_with_seed(2);
    let appended = [given::point_with_seed(9)];
    texels.set_points(&points).expect("set_points");

    texels
        .append_snapshot(&appended, SnapshotOffset::IDENTITY)
        .expect("append_snapshot");

    assert_eq!(texels.point_count(), 3);
    assert_eq!(texels.resolution(), 4);
    assert_eq!(texels.positions()[0], points[0].pos.extend(1.0));
    assert_eq!(texels.positions()[1], points[1].pos.extend(1.0));
    assert_eq!(texels.positions()[2], appended[0].pos.extend(1.0));
}

#[test]
fn test_point_texels_live_ranges_mut_should_cover_live_range_only() {
    let mut texels = PointTexels::new();
    let points = given::points_with_seed(5);
    texels.set_points(&points).expect("set_points");

    let (positions, colors) = texels.live_ranges_mut();

    assert_eq!(positions.len(), 5);
    assert_eq!(colors.len(), 5);
}
