use glam::*;

use crate::{
    ColorTexture, PointCloudRenderer, PointTexture, PositionTexture, ProxyTriangle,
    ProxyVertexBuffer, SplatParamsBuffer, SplatParamsPod, TexelPod,
};

/// A [`PointCloudRenderer`] keeping the streamed cloud in wgpu resources.
///
/// The proxy mesh lives in a [`ProxyVertexBuffer`], the encodings in the two
/// [`PointTexture`]s, and the splat parameters in a [`SplatParamsBuffer`];
/// bind them to a splat pipeline through the accessors. Textures and mesh
/// are recreated wholesale when their size changes.
#[derive(Debug)]
pub struct WgpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    proxy_vertices: Option<ProxyVertexBuffer>,
    position_texture: Option<PositionTexture>,
    color_texture: Option<ColorTexture>,
    splat_params: SplatParamsBuffer,
}

impl WgpuRenderer {
    /// Create a new renderer on `device` and `queue`.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        let splat_params = SplatParamsBuffer::new(&device);

        Self {
            device,
            queue,
            proxy_vertices: None,
            position_texture: None,
            color_texture: None,
            splat_params,
        }
    }

    /// Get the proxy mesh vertex buffer, once geometry was built.
    pub fn proxy_vertices(&self) -> Option<&ProxyVertexBuffer> {
        self.proxy_vertices.as_ref()
    }

    /// Get the position texture, once data was streamed.
    pub fn position_texture(&self) -> Option<&PositionTexture> {
        self.position_texture.as_ref()
    }

    /// Get the color texture, once data was streamed.
    pub fn color_texture(&self) -> Option<&ColorTexture> {
        self.color_texture.as_ref()
    }

    /// Get the splat parameters buffer.
    pub fn splat_params(&self) -> &SplatParamsBuffer {
        &self.splat_params
    }

    fn write_texels<T: TexelPod>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        texture: &mut Option<PointTexture<T>>,
        texels: &[T],
        resolution: u32,
    ) {
        if texture
            .as_ref()
            .is_none_or(|t| t.resolution() != resolution)
        {
            *texture = Some(PointTexture::new(device, resolution));
        }

        if let Some(texture) = texture {
            if let Err(e) = texture.update(queue, texels) {
                log::error!("failed to write {}: {e}", T::LABEL);
            }
        }
    }

    fn copy_to_target<T: TexelPod>(
        &self,
        texture: Option<&PointTexture<T>>,
        target: &wgpu::Texture,
    ) {
        let Some(texture) = texture else {
            log::error!("no encoded data to copy to the target texture");
            return;
        };

        if let Err(e) = texture.copy_to(&self.device, &self.queue, target) {
            log::error!("failed to copy {} to the target texture: {e}", T::LABEL);
        }
    }
}

impl PointCloudRenderer for WgpuRenderer {
    type TextureTarget = wgpu::Texture;

    fn rebuild_proxy_mesh(&mut self, triangles: &[ProxyTriangle]) {
        log::debug!("Rebuilding proxy mesh with {} triangles", triangles.len());
        self.proxy_vertices = Some(ProxyVertexBuffer::new(&self.device, triangles));
    }

    fn write_position_texels(&mut self, texels: &[Vec4], resolution: u32) {
        Self::write_texels(
            &self.device,
            &self.queue,
            &mut self.position_texture,
            texels,
            resolution,
        );
    }

    fn write_color_texels(&mut self, texels: &[U8Vec4], resolution: u32) {
        Self::write_texels(
            &self.device,
            &self.queue,
            &mut self.color_texture,
            texels,
            resolution,
        );
    }

    fn push_splat_params(&mut self, params: &SplatParamsPod) {
        self.splat_params.update(&self.queue, params);
    }

    fn copy_positions_to_target(&mut self, target: &wgpu::Texture) {
        self.copy_to_target(self.position_texture.as_ref(), target);
    }

    fn copy_colors_to_target(&mut self, target: &wgpu::Texture) {
        self.copy_to_target(self.color_texture.as_ref(), target);
    }
}
