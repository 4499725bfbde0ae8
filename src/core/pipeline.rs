use crate::core::geometry::Vertex;
use crate::scene::material::Material;
use nalgebra::{Vector3, Vector4};
use std::ops::{Add, Mul};

/// Per-vertex data that can be blended across a triangle.
///
/// `Add` and `Mul<f32>` are all barycentric interpolation needs; `Send + Sync`
/// lets fragments be shaded from rayon workers.
pub trait Interpolatable:
    Copy + Clone + Add<Output = Self> + Mul<f32, Output = Self> + Send + Sync
{
}

impl<T> Interpolatable for T where
    T: Copy + Clone + Add<Output = T> + Mul<f32, Output = T> + Send + Sync
{
}

/// The programmable stages of the pipeline.
pub trait Shader: Send + Sync {
    type Varying: Interpolatable;

    /// Object-space vertex -> homogeneous clip position plus the varying to
    /// interpolate for its fragments.
    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying);

    /// Linear RGB colour of one fragment.
    fn fragment(&self, varying: Self::Varying, material: &Material) -> Vector3<f32>;
}
