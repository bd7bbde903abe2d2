use thiserror::Error;

/// The error type for [`PointTexels::set_points`](crate::PointTexels::set_points).
#[derive(Debug, Error)]
pub enum EncodePointsError {
    #[error("empty point data")]
    EmptyPoints,
    #[error("point count exceeds texture capacity: {point_count} > {capacity}")]
    CapacityExceeded { point_count: usize, capacity: usize },
}

/// The error type for [`PointTexels::append_snapshot`](crate::PointTexels::append_snapshot).
#[derive(Debug, Error)]
pub enum AppendSnapshotError {
    #[error("empty snapshot point data")]
    EmptyPoints,
    #[error(
        "snapshot exceeds texture capacity: {point_count} + {appended} > {capacity}"
    )]
    CapacityExceeded {
        point_count: usize,
        appended: usize,
        capacity: usize,
    },
}

/// The error type for [`sort_by_depth`](crate::sort_by_depth).
#[derive(Debug, Error)]
pub enum DepthSortError {
    #[error("point count exceeds the sortable limit: {point_count} > {limit}")]
    PointCountExceedsLimit { point_count: usize, limit: usize },
}

/// The error type for [`PointTexture`](crate::PointTexture) update functions.
#[derive(Debug, Error)]
pub enum TextureUpdateError {
    #[error("texel count mismatch: {count} != {expected_count}")]
    TexelCountMismatch { count: usize, expected_count: usize },
}

/// The error type for [`PointTexture::copy_to`](crate::PointTexture::copy_to).
#[derive(Debug, Error)]
pub enum CopyTextureError {
    #[error(
        "texture size mismatch: {width}x{height} != {expected_width}x{expected_height}"
    )]
    SizeMismatched {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("texture format mismatch: {format:?} != {expected_format:?}")]
    FormatMismatched {
        format: wgpu::TextureFormat,
        expected_format: wgpu::TextureFormat,
    },
}

/// The error type for downloading GPU data back to the CPU.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("{0}")]
    OneShotRecv(#[from] oneshot::RecvError),
    #[error("{0}")]
    Async(#[from] wgpu::BufferAsyncError),
    #[error("{0}")]
    Poll(#[from] wgpu::PollError),
}

/// The error type for [`ProxyVertexBuffer`](crate::ProxyVertexBuffer)'s [`TryFrom`]
/// implementation for [`wgpu::Buffer`].
#[derive(Debug, Error)]
pub enum ProxyVertexBufferTryFromBufferError {
    #[error(
        "buffer size and triangle size mismatch: {buffer_size} % {triangle_size} != 0"
    )]
    BufferSizeNotMultiple {
        buffer_size: wgpu::BufferAddress,
        triangle_size: wgpu::BufferAddress,
    },
}
