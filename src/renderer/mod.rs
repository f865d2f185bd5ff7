//! CPU-side rendering
//!
//! Produces triangle lists in playfield pixels; uploading and drawing them
//! is left to the host.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::build_scene;
pub use vertex::{Vertex, as_bytes, colors};
