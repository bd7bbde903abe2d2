use glam::*;

use crate::{CopyTextureError, DownloadError, TextureUpdateError};

/// A texel format of the encoded point textures.
pub trait TexelPod: bytemuck::NoUninit + bytemuck::AnyBitPattern + Send + Sync {
    /// The texture format holding this texel.
    const FORMAT: wgpu::TextureFormat;

    /// The debug label of textures holding this texel.
    const LABEL: &'static str;
}

impl TexelPod for Vec4 {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba32Float;
    const LABEL: &'static str = "Position Texture";
}

impl TexelPod for U8Vec4 {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    const LABEL: &'static str = "Color Texture";
}

/// The encoded point position texture, one [`Vec4`] texel (xyz + 1.0) per
/// point.
pub type PositionTexture = PointTexture<Vec4>;

/// The encoded point color texture, one RGBA8 texel per point.
pub type ColorTexture = PointTexture<U8Vec4>;

/// A square texture holding one texel per point, row-major.
///
/// The point at linear index `i` lives at texel `(i % side, i / side)`; the
/// proxy mesh vertex shader fetches it by slot index. Replaced wholesale on
/// resize, rewritten in place at the same size.
#[derive(Debug)]
pub struct PointTexture<T: TexelPod> {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    _texel: std::marker::PhantomData<T>,
}

impl<T: TexelPod> PointTexture<T> {
    /// Create a new point texture of side `resolution`.
    pub fn new(device: &wgpu::Device, resolution: u32) -> Self {
        log::debug!("Creating {} at {resolution}x{resolution}", T::LABEL);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(T::LABEL),
            size: wgpu::Extent3d {
                width: resolution,
                height: resolution,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: T::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            _texel: std::marker::PhantomData,
        }
    }

    /// Get the side length.
    pub fn resolution(&self) -> u32 {
        self.texture.width()
    }

    /// Get the texture.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Get the texture view.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Upload a full texel grid.
    ///
    /// `texels` must cover the texture exactly.
    pub fn update(&self, queue: &wgpu::Queue, texels: &[T]) -> Result<(), TextureUpdateError> {
        let expected_count = (self.resolution() * self.resolution()) as usize;
        if texels.len() != expected_count {
            return Err(TextureUpdateError::TexelCountMismatch {
                count: texels.len(),
                expected_count,
            });
        }

        queue.write_texture(
            self.texture.as_image_copy(),
            bytemuck::cast_slice(texels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.resolution() * std::mem::size_of::<T>() as u32),
                rows_per_image: Some(self.resolution()),
            },
            self.texture.size(),
        );

        Ok(())
    }

    /// Copy the texture into `target`.
    ///
    /// `target` must share the texture's size and format and carry
    /// [`wgpu::TextureUsages::COPY_DST`].
    pub fn copy_to(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::Texture,
    ) -> Result<(), CopyTextureError> {
        if target.size() != self.texture.size() {
            return Err(CopyTextureError::SizeMismatched {
                width: target.width(),
                height: target.height(),
                expected_width: self.texture.width(),
                expected_height: self.texture.height(),
            });
        }
        if target.format() != T::FORMAT {
            return Err(CopyTextureError::FormatMismatched {
                format: target.format(),
                expected_format: T::FORMAT,
            });
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Point Texture Copy Encoder"),
        });
        encoder.copy_texture_to_texture(
            self.texture.as_image_copy(),
            target.as_image_copy(),
            self.texture.size(),
        );
        queue.submit(Some(encoder.finish()));

        Ok(())
    }

    /// Download the texel grid back to the CPU.
    pub async fn download(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<T>, DownloadError> {
        let resolution = self.resolution();
        let unpadded_bytes_per_row = resolution * std::mem::size_of::<T>() as u32;
        let padded_bytes_per_row =
            unpadded_bytes_per_row.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let download_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Texel Download Buffer"),
            size: padded_bytes_per_row as wgpu::BufferAddress * resolution as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Texel Download Encoder"),
        });
        encoder.copy_texture_to_buffer(
            self.texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &download_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(resolution),
                },
            },
            self.texture.size(),
        );
        queue.submit(Some(encoder.finish()));

        let (tx, rx) = oneshot::channel();
        download_buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                let _ = tx.send(result);
            });
        device.poll(wgpu::PollType::wait_indefinitely())?;
        rx.await??;

        let texels = {
            let mapped = download_buffer.slice(..).get_mapped_range();
            mapped
                .chunks_exact(padded_bytes_per_row as usize)
                .flat_map(|row| {
                    row[..unpadded_bytes_per_row as usize]
                        .chunks_exact(std::mem::size_of::<T>())
                        .map(bytemuck::pod_read_unaligned::<T>)
                })
                .collect::<Vec<_>>()
        };
        download_buffer.unmap();

        Ok(texels)
    }
}
