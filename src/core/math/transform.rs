use nalgebra::{Matrix3, Matrix4, Point2, Point3, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Builds the 4x4 matrices the scene is assembled from.
/// Right-handed, column vectors, same conventions as the classic GL matrix calls.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Rotation of `angle_deg` degrees about `axis` (Rodrigues' formula).
    /// The axis need not be unit length; a zero axis yields the identity.
    pub fn rotation(axis: &Vector3<f32>, angle_deg: f32) -> Matrix4<f32> {
        let Some(axis_unit) = axis.try_normalize(f32::EPSILON) else {
            return Matrix4::identity();
        };
        let (x, y, z) = (axis_unit.x, axis_unit.y, axis_unit.z);
        let (s, c) = angle_deg.to_radians().sin_cos();
        let t = 1.0 - c;

        Matrix4::new(
            t * x * x + c,     t * x * y - z * s, t * x * z + y * s, 0.0,
            t * x * y + z * s, t * y * y + c,     t * y * z - x * s, 0.0,
            t * x * z - y * s, t * y * z + x * s, t * z * z + c,     0.0,
            0.0,               0.0,               0.0,               1.0,
        )
    }

    pub fn translation(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, offset.x,
            0.0, 1.0, 0.0, offset.y,
            0.0, 0.0, 1.0, offset.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    pub fn scaling(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Look-at view matrix; the camera looks down its local -Z.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        rotation * Self::translation(&-eye.coords)
    }

    /// Perspective projection onto the [-1, 1] NDC cube (gluPerspective layout).
    pub fn perspective(aspect_ratio: f32, fov_y_deg: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_deg.to_radians() / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }
}

/// Matrix that carries object-space normals into world space: the inverse
/// transpose of the model matrix's linear part. Falls back to the linear part
/// itself when it is singular.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
    let linear: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
    linear
        .try_inverse()
        .map(|inv| inv.transpose())
        .unwrap_or(linear)
}

//=================================
// Core Transformation Functions
//=================================

/// Clip space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// Viewport transform. Screen +Y points down.
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}
