pub mod color;
pub mod framebuffer;
pub mod geometry;
pub mod grid;
pub mod math;
pub mod pipeline;
pub mod rasterizer;
