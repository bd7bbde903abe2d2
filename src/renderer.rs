use glam::*;

use crate::{ProxyTriangle, SplatParamsPod};

/// The render-facing adapter of a streamed point cloud.
///
/// Implementations own the backend resources for one cloud: the proxy mesh,
/// the two encoded point textures, and the splat parameters. The controller
/// drives them; see [`WgpuRenderer`](crate::WgpuRenderer) for the wgpu
/// implementation.
///
/// Proxy mesh contract: implementations bind the mesh to the owning
/// transform themselves, must not inherit the transform's scale (the
/// combined scale arrives through [`SplatParamsPod::scale`] so splat sizing
/// stays uniform), and must not distance-cull the mesh.
pub trait PointCloudRenderer {
    /// An external texture a caller can export encoded data into.
    type TextureTarget;

    /// Replace the proxy mesh with `triangles`.
    ///
    /// The previous mesh is discarded whole; the stack is never patched in
    /// place.
    fn rebuild_proxy_mesh(&mut self, triangles: &[ProxyTriangle]);

    /// Write the position texel grid of side `resolution`.
    fn write_position_texels(&mut self, texels: &[Vec4], resolution: u32);

    /// Write the color texel grid of side `resolution`.
    fn write_color_texels(&mut self, texels: &[U8Vec4], resolution: u32);

    /// Push the per-frame splat parameters.
    fn push_splat_params(&mut self, params: &SplatParamsPod);

    /// Export the current position data into `target`.
    fn copy_positions_to_target(&mut self, target: &Self::TextureTarget);

    /// Export the current color data into `target`.
    fn copy_colors_to_target(&mut self, target: &Self::TextureTarget);
}
