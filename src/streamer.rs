use glam::*;

use crate::{
    Aabb, MAX_TEXTURE_RESOLUTION, Point, PointCloudRenderer, PointTexels, SnapshotOffset,
    SplatParamsPod, build_triangle_stack, packed_rgba8_colors, sort_by_depth,
};

/// The delay before a scheduled color export fires, leaving the backend time
/// to complete the preceding position write.
pub const COLOR_SAVE_DELAY_SECONDS: f32 = 0.1;

/// The color paired with positions that arrived without one.
pub const FALLBACK_COLOR: U8Vec4 = U8Vec4::new(255, 255, 255, 255);

/// The world transform of the object owning a streamed cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl ObjectTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a new transform.
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Get the local to world affine transform.
    pub fn affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything the host supplies for one frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// The active viewpoint in world space.
    pub camera_position: Vec3,
    /// The owning object's world transform.
    pub transform: ObjectTransform,
}

/// The user-tunable splat controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicProperties {
    /// Uniform scaling applied to the whole cloud on top of the object scale.
    pub cloud_scaling: f32,
    /// Splat falloff exponent.
    pub falloff: f32,
    /// Splat size.
    pub splat_size: f32,
    /// Distance based splat scaling.
    pub distance_scaling: f32,
    /// Distance based splat falloff.
    pub distance_falloff: f32,
    /// Whether the shader overrides the encoded colors.
    pub override_color: bool,
}

impl Default for DynamicProperties {
    fn default() -> Self {
        Self {
            cloud_scaling: 1.0,
            falloff: 1.0,
            splat_size: 1.0,
            distance_scaling: 1.0,
            distance_falloff: 0.0,
            override_color: false,
        }
    }
}

/// A color export waiting for its delay to elapse.
#[derive(Debug)]
struct PendingColorSave<T> {
    target: T,
    remaining_seconds: f32,
}

/// The point cloud streaming controller.
///
/// Owns the texel encoding, keeps the proxy mesh slot count in sync with the
/// point count, tracks the viewpoint in cloud-local space, and pushes the
/// splat parameters to the injected [`PointCloudRenderer`] every frame.
///
/// Lifecycle: creating the streamer attaches it to its renderer, calling
/// [`PointCloudStreamer::update`] once per frame ticks it, and dropping it
/// detaches it, cancelling any scheduled color export with it.
pub struct PointCloudStreamer<R: PointCloudRenderer> {
    renderer: R,
    texels: PointTexels,
    proxy_slot_count: usize,
    extent: Option<Aabb>,
    properties: DynamicProperties,
    transform: ObjectTransform,
    camera_position_local: Vec3,
    pending_color_save: Option<PendingColorSave<R::TextureTarget>>,
}

impl<R: PointCloudRenderer> PointCloudStreamer<R> {
    /// Create a new streamer bounded by [`MAX_TEXTURE_RESOLUTION`].
    pub fn new(renderer: R) -> Self {
        Self::with_max_resolution(renderer, MAX_TEXTURE_RESOLUTION)
    }

    /// Create a new streamer with a custom texture resolution ceiling.
    ///
    /// Use this when the device's `max_texture_dimension_2d` is below
    /// [`MAX_TEXTURE_RESOLUTION`].
    pub fn with_max_resolution(renderer: R, max_resolution: u32) -> Self {
        Self {
            renderer,
            texels: PointTexels::with_max_resolution(max_resolution),
            proxy_slot_count: 0,
            extent: None,
            properties: DynamicProperties::default(),
            transform: ObjectTransform::IDENTITY,
            camera_position_local: Vec3::ZERO,
            pending_color_save: None,
        }
    }

    /// Get the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Get the renderer mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Get the texel encoding.
    pub fn texels(&self) -> &PointTexels {
        &self.texels
    }

    /// Get the number of streamed points.
    pub fn point_count(&self) -> usize {
        self.texels.point_count()
    }

    /// Get the spatial extent, if one was set.
    pub fn extent(&self) -> Option<Aabb> {
        self.extent
    }

    /// Get the user-tunable splat controls.
    pub fn dynamic_properties(&self) -> DynamicProperties {
        self.properties
    }

    /// Get the viewpoint in cloud-local space, as of the last tick.
    pub fn camera_position_local(&self) -> Vec3 {
        self.camera_position_local
    }

    /// Replace the streamed cloud with float RGBA colored points.
    ///
    /// A length mismatch between `positions` and `colors` is only warned
    /// about and `positions` wins; empty input aborts without mutating any
    /// state.
    pub fn set_input(&mut self, positions: &[Vec3], colors: &[Vec4]) {
        if positions.len() != colors.len() {
            log::warn!(
                "point position count {} does not match point color count {}",
                positions.len(),
                colors.len()
            );
        }
        if positions.is_empty() || colors.is_empty() {
            log::error!("empty point position and/or color data");
            return;
        }

        let points =
            Self::collect_points(positions, colors.iter().map(|&c| Point::color_from_f32(c)));
        self.replace_points(&points);
    }

    /// Replace the streamed cloud with packed RGBA8 colored points, 4 bytes
    /// per point.
    ///
    /// Mismatch and empty input handling follow [`PointCloudStreamer::set_input`].
    pub fn set_input_packed(&mut self, positions: &[Vec3], colors: &[u8]) {
        if positions.len() * 4 != colors.len() {
            log::warn!(
                "point position count {} does not match packed color byte count {}",
                positions.len(),
                colors.len()
            );
        }
        if positions.is_empty() || colors.is_empty() {
            log::error!("empty point position and/or color data");
            return;
        }

        let points = Self::collect_points(positions, packed_rgba8_colors(colors));
        self.replace_points(&points);
    }

    /// Append one capture to the streamed cloud.
    ///
    /// `offset_translation` is in world space; it is transformed into the
    /// cloud's local space through the inverse of the owning object's world
    /// transform before the write, since the encoding stores local-space
    /// data. `colors` are packed RGBA8, 4 bytes per point.
    ///
    /// Snapshots accumulate in call order and are never evicted; a snapshot
    /// that would overflow the texture capacity is rejected whole.
    pub fn add_snapshot(
        &mut self,
        positions: &[Vec3],
        colors: &[u8],
        offset_translation: Vec3,
        offset_rotation: Quat,
    ) {
        if positions.len() * 4 != colors.len() {
            log::warn!(
                "point position count {} does not match packed color byte count {}",
                positions.len(),
                colors.len()
            );
        }
        if positions.is_empty() || colors.is_empty() {
            log::error!("empty point position and/or color data");
            return;
        }

        // every texel slot must stay addressable across future appends, so
        // the proxy mesh covers the full capacity from the first snapshot on
        self.sync_proxy_mesh(self.texels.capacity());

        let translation = self
            .transform
            .affine()
            .inverse()
            .transform_point3(offset_translation);
        let offset = SnapshotOffset::new(translation, offset_rotation);

        let points = Self::collect_points(positions, packed_rgba8_colors(colors));
        if let Err(e) = self.texels.append_snapshot(&points, offset) {
            log::error!("failed to append snapshot: {e}");
            return;
        }

        self.upload_texels();
    }

    /// Set the spatial extent of the cloud.
    pub fn set_extent(&mut self, extent: Aabb) {
        self.extent = Some(extent);
    }

    /// Set the user-tunable splat controls.
    ///
    /// Consumed by the unconditional per-frame parameter push.
    pub fn set_dynamic_properties(
        &mut self,
        cloud_scaling: f32,
        falloff: f32,
        splat_size: f32,
        distance_scaling: f32,
        distance_falloff: f32,
        override_color: bool,
    ) {
        self.properties = DynamicProperties {
            cloud_scaling,
            falloff,
            splat_size,
            distance_scaling,
            distance_falloff,
            override_color,
        };
    }

    /// Sort the streamed points back to front relative to the tracked
    /// viewpoint and re-upload the encoding.
    ///
    /// On demand only; call it once after the input is finalized when depth
    /// ordering matters for the content. Returns `false`, leaving the
    /// encoding untouched, when the point count exceeds
    /// [`MAX_SORT_POINT_COUNT`](crate::MAX_SORT_POINT_COUNT).
    pub fn sort_point_cloud_for_depth(&mut self) -> bool {
        let cam_pos = self.camera_position_local;
        let (positions, colors) = self.texels.live_ranges_mut();

        match sort_by_depth(positions, colors, cam_pos) {
            Ok(()) => {
                self.upload_texels();
                true
            }
            Err(e) => {
                log::error!("could not sort the point cloud: {e}");
                false
            }
        }
    }

    /// Export the encoded data into external textures.
    ///
    /// The position export happens immediately; the color export is
    /// scheduled [`COLOR_SAVE_DELAY_SECONDS`] ahead and fired by
    /// [`PointCloudStreamer::update`], replacing any export still pending.
    pub fn save_data_to_texture(
        &mut self,
        position_target: &R::TextureTarget,
        color_target: R::TextureTarget,
    ) {
        self.renderer.copy_positions_to_target(position_target);
        self.pending_color_save = Some(PendingColorSave {
            target: color_target,
            remaining_seconds: COLOR_SAVE_DELAY_SECONDS,
        });
    }

    /// Cancel a scheduled color export before it fires.
    pub fn cancel_pending_save(&mut self) {
        self.pending_color_save = None;
    }

    /// Tick the streamer; call once per frame.
    ///
    /// Advances the scheduled color export, tracks the viewpoint in
    /// cloud-local space for subsequent sorts, and pushes the splat
    /// parameters. The parameter push is unconditional since the host
    /// transform may move every frame.
    pub fn update(&mut self, delta_time: f32, frame: &FrameInput) {
        self.transform = frame.transform;

        self.tick_pending_save(delta_time);
        self.track_camera(frame.camera_position);
        self.push_splat_params();
    }

    fn collect_points(positions: &[Vec3], colors: impl Iterator<Item = U8Vec4>) -> Vec<Point> {
        positions
            .iter()
            .zip(colors.chain(std::iter::repeat(FALLBACK_COLOR)))
            .map(|(&pos, color)| Point::new(pos, color))
            .collect()
    }

    fn replace_points(&mut self, points: &[Point]) {
        if let Err(e) = self.texels.set_points(points) {
            log::error!("failed to encode point data: {e}");
            return;
        }

        self.sync_proxy_mesh(points.len());
        self.upload_texels();
    }

    /// Rebuild the proxy mesh only when the requested slot count differs
    /// from the built one, so same-count re-encodes skip the mesh entirely.
    fn sync_proxy_mesh(&mut self, slot_count: usize) {
        if slot_count == 0 || slot_count == self.proxy_slot_count {
            return;
        }

        let triangles = build_triangle_stack(slot_count);
        self.renderer.rebuild_proxy_mesh(&triangles);
        self.proxy_slot_count = slot_count;
    }

    fn upload_texels(&mut self) {
        self.renderer
            .write_position_texels(self.texels.positions(), self.texels.resolution());
        self.renderer
            .write_color_texels(self.texels.colors(), self.texels.resolution());
    }

    fn tick_pending_save(&mut self, delta_time: f32) {
        let due = match &mut self.pending_color_save {
            Some(pending) => {
                pending.remaining_seconds -= delta_time;
                pending.remaining_seconds <= 0.0
            }
            None => false,
        };

        if due {
            if let Some(pending) = self.pending_color_save.take() {
                self.renderer.copy_colors_to_target(&pending.target);
            }
        }
    }

    fn track_camera(&mut self, camera_position: Vec3) {
        // cloud scaling participates in the transform so sorting happens in
        // the same space the shader renders in
        let to_world = self.transform.affine()
            * Affine3A::from_scale(Vec3::splat(self.properties.cloud_scaling));
        self.camera_position_local = to_world.inverse().transform_point3(camera_position);
    }

    fn push_splat_params(&mut self) {
        let basis = self.transform.affine().matrix3;
        let params = SplatParamsPod::new(
            basis.x_axis.normalize_or_zero().into(),
            basis.y_axis.normalize_or_zero().into(),
            basis.z_axis.normalize_or_zero().into(),
            self.transform.scale * self.properties.cloud_scaling,
            self.properties.falloff,
            self.properties.splat_size,
            self.properties.distance_scaling,
            self.properties.distance_falloff,
            self.properties.override_color,
        );

        self.renderer.push_splat_params(&params);
    }
}
