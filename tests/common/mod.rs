pub mod given;
pub mod renderer;

pub use renderer::RecordingRenderer;
