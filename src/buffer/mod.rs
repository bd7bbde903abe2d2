mod proxy_vertex;
mod splat_params;
mod texture;
mod wrapper;

pub use proxy_vertex::*;
pub use splat_params::*;
pub use texture::*;
pub use wrapper::*;
