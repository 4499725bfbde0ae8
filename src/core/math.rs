pub mod interpolation;
pub mod stack;
pub mod transform;
