#![doc = include_str!("../README.md")]

mod buffer;
mod encoder;
mod error;
mod point;
mod proxy;
mod renderer;
mod sort;
mod streamer;
mod wgpu_renderer;

pub use buffer::*;
pub use encoder::*;
pub use error::*;
pub use point::*;
pub use proxy::*;
pub use renderer::*;
pub use sort::*;
pub use streamer::*;
pub use wgpu_renderer::*;

pub use glam;
