pub mod blimp;
pub mod camera;
pub mod canvas;
pub mod context;
pub mod light;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod quad_mesh;
pub mod state;
