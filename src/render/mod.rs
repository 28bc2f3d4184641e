pub mod compositor;
pub mod mesh;
pub mod projection;
pub mod scene;

pub use compositor::*;
pub use mesh::*;
pub use projection::*;
pub use scene::*;
