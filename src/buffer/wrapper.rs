use crate::DownloadError;

/// A wrapper around [`wgpu::Buffer`].
pub trait BufferWrapper {
    /// The default [`wgpu::BufferUsages`] of the buffer.
    const DEFAULT_USAGES: wgpu::BufferUsages = wgpu::BufferUsages::from_bits_retain(
        wgpu::BufferUsages::STORAGE.bits() | wgpu::BufferUsages::COPY_DST.bits(),
    );

    /// Get the buffer.
    fn buffer(&self) -> &wgpu::Buffer;
}

impl BufferWrapper for wgpu::Buffer {
    fn buffer(&self) -> &wgpu::Buffer {
        self
    }
}

/// A buffer wrapper whose content can be downloaded back to the CPU.
///
/// The buffer must carry [`wgpu::BufferUsages::COPY_SRC`].
#[allow(async_fn_in_trait)]
pub trait DownloadableBufferWrapper: BufferWrapper {
    /// Download the buffer data into a [`Vec`] of `T`.
    async fn download<T: bytemuck::AnyBitPattern>(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Vec<T>, DownloadError> {
        let download_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Download Buffer"),
            size: self.buffer().size(),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Download Encoder"),
        });
        encoder.copy_buffer_to_buffer(self.buffer(), 0, &download_buffer, 0, self.buffer().size());
        queue.submit(Some(encoder.finish()));

        let (tx, rx) = oneshot::channel();
        download_buffer
            .slice(..)
            .map_async(wgpu::MapMode::Read, move |result| {
                let _ = tx.send(result);
            });
        device.poll(wgpu::PollType::wait_indefinitely())?;
        rx.await??;

        let data = {
            let mapped = download_buffer.slice(..).get_mapped_range();
            mapped
                .chunks_exact(std::mem::size_of::<T>())
                .map(bytemuck::pod_read_unaligned)
                .collect::<Vec<_>>()
        };
        download_buffer.unmap();

        Ok(data)
    }
}

impl<B: BufferWrapper> DownloadableBufferWrapper for B {}
