//! Render boundary
//!
//! Turns a simulation snapshot into draw commands. Frontends rasterize the
//! draw list themselves; the terminal frontend in `platform` does exactly
//! that. `shapes` and `vertex` are library-only exports that turn the same
//! draw list into a `bytemuck` triangle list for GPU frontends; the binary
//! does not use them.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{DrawCmd, DrawList, build_scene, text_width};
pub use shapes::build_vertices;
pub use vertex::Vertex;
