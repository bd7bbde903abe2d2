use wgpu_pcstream::{PointCloudRenderer, ProxyTriangle, SplatParamsPod, glam::*};

/// A render adapter recording every call for assertions.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub proxy_rebuilds: Vec<Vec<ProxyTriangle>>,
    pub position_writes: Vec<(Vec<Vec4>, u32)>,
    pub color_writes: Vec<(Vec<U8Vec4>, u32)>,
    pub pushed_params: Vec<SplatParamsPod>,
    pub position_target_copies: Vec<&'static str>,
    pub color_target_copies: Vec<&'static str>,
}

impl PointCloudRenderer for RecordingRenderer {
    type TextureTarget = &'static str;

    fn rebuild_proxy_mesh(&mut self, triangles: &[ProxyTriangle]) {
        self.proxy_rebuilds.push(triangles.to_vec());
    }

    fn write_position_texels(&mut self, texels: &[Vec4], resolution: u32) {
        self.position_writes.push((texels.to_vec(), resolution));
    }

    fn write_color_texels(&mut self, texels: &[U8Vec4], resolution: u32) {
        self.color_writes.push((texels.to_vec(), resolution));
    }

    fn push_splat_params(&mut self, params: &SplatParamsPod) {
        self.pushed_params.push(*params);
    }

    fn copy_positions_to_target(&mut self, target: &&'static str) {
        self.position_target_copies.push(*target);
    }

    fn copy_colors_to_target(&mut self, target: &&'static str) {
        self.color_target_copies.push(*target);
    }
}
