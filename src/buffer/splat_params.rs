use glam::*;
use wgpu::util::DeviceExt;

use crate::BufferWrapper;

/// The splat parameters uniform buffer.
#[derive(Debug, Clone)]
pub struct SplatParamsBuffer(wgpu::Buffer);

impl SplatParamsBuffer {
    /// Create a new splat parameters buffer.
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Splat Params Buffer"),
            contents: bytemuck::bytes_of(&SplatParamsPod::default()),
            usage: Self::DEFAULT_USAGES,
        });

        Self(buffer)
    }

    /// Update the splat parameters buffer.
    pub fn update(&self, queue: &wgpu::Queue, params: &SplatParamsPod) {
        queue.write_buffer(&self.0, 0, bytemuck::bytes_of(params));
    }
}

impl BufferWrapper for SplatParamsBuffer {
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::UNIFORM.bits() | wgpu::BufferUsages::COPY_DST.bits(),
    );

    fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

impl From<SplatParamsBuffer> for wgpu::Buffer {
    fn from(wrapper: SplatParamsBuffer) -> Self {
        wrapper.0
    }
}

/// The POD representation of the splat shader parameters.
///
/// The axes are the normalized world-space basis of the owning object's
/// transform; `scale` combines the object scale with the uniform cloud
/// scaling, so the splat shader can size splats without the proxy mesh
/// inheriting any scale. Scalars ride in the padding lanes of the vectors
/// to keep the uniform block tight.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SplatParamsPod {
    pub x_axis: Vec3,
    pub falloff_expo: f32,
    pub y_axis: Vec3,
    pub splat_size: f32,
    pub z_axis: Vec3,
    pub distance_scaling: f32,
    pub scale: Vec3,
    pub distance_falloff: f32,
    /// Bool flag, 0 or 1.
    pub override_color: u32,
    pub _padding: [u32; 3],
}

impl SplatParamsPod {
    /// Create new splat parameters.
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        x_axis: Vec3,
        y_axis: Vec3,
        z_axis: Vec3,
        scale: Vec3,
        falloff_expo: f32,
        splat_size: f32,
        distance_scaling: f32,
        distance_falloff: f32,
        override_color: bool,
    ) -> Self {
        Self {
            x_axis,
            falloff_expo,
            y_axis,
            splat_size,
            z_axis,
            distance_scaling,
            scale,
            distance_falloff,
            override_color: override_color as u32,
            _padding: [0; 3],
        }
    }
}

impl Default for SplatParamsPod {
    fn default() -> Self {
        Self::new(
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            Vec3::ONE,
            1.0,
            1.0,
            1.0,
            0.0,
            false,
        )
    }
}
