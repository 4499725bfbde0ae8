use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

/// A fixed perspective camera. Matrices are computed once on construction.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y_deg: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_deg: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov_y_deg,
            aspect_ratio,
            near,
            far,
            view_matrix: TransformFactory::view(&position, &target, &up),
            projection_matrix: TransformFactory::perspective(aspect_ratio, fov_y_deg, near, far),
        }
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }

    /// Projection * view.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix * self.view_matrix
    }

    /// Converts a point given in this camera's eye space into world space.
    pub fn eye_to_world(&self, eye: &Point3<f32>) -> Point3<f32> {
        self.view_matrix
            .try_inverse()
            .map(|inv| inv.transform_point(eye))
            .unwrap_or(*eye)
    }
}
