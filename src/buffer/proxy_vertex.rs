use glam::*;
use wgpu::util::DeviceExt;

use crate::{BufferWrapper, ProxyTriangle, ProxyVertexBufferTryFromBufferError};

/// The proxy mesh vertex buffer.
///
/// Holds the flat triangle stack built by
/// [`build_triangle_stack`](crate::build_triangle_stack). The stack is
/// recreated whole when the slot count changes, never patched in place.
#[derive(Debug, Clone)]
pub struct ProxyVertexBuffer(wgpu::Buffer);

impl ProxyVertexBuffer {
    /// The vertex layout: one `Float32x3` position attribute.
    pub const VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vec3>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        }],
    };

    /// Create a new proxy mesh vertex buffer.
    pub fn new(device: &wgpu::Device, triangles: &[ProxyTriangle]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Proxy Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(triangles),
            usage: Self::DEFAULT_USAGES,
        });

        Self(buffer)
    }

    /// Get the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.0.size() as usize / std::mem::size_of::<ProxyTriangle>()
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> u32 {
        (self.triangle_count() * 3) as u32
    }
}

impl BufferWrapper for ProxyVertexBuffer {
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::VERTEX.bits() | wgpu::BufferUsages::COPY_DST.bits(),
    );

    fn buffer(&self) -> &wgpu::Buffer {
        &self.0
    }
}

impl From<ProxyVertexBuffer> for wgpu::Buffer {
    fn from(wrapper: ProxyVertexBuffer) -> Self {
        wrapper.0
    }
}

impl TryFrom<wgpu::Buffer> for ProxyVertexBuffer {
    type Error = ProxyVertexBufferTryFromBufferError;

    fn try_from(buffer: wgpu::Buffer) -> Result<Self, Self::Error> {
        if buffer.size() % std::mem::size_of::<ProxyTriangle>() as wgpu::BufferAddress != 0 {
            return Err(ProxyVertexBufferTryFromBufferError::BufferSizeNotMultiple {
                buffer_size: buffer.size(),
                triangle_size: std::mem::size_of::<ProxyTriangle>() as wgpu::BufferAddress,
            });
        }

        Ok(Self(buffer))
    }
}
