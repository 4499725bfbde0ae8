use crate::core::geometry::Vertex;
use crate::core::math::transform::normal_matrix;
use crate::core::pipeline::Shader;
use crate::scene::light::Light;
use crate::scene::material::Material;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
use std::ops::{Add, Mul};

/// Data that needs to be interpolated across the triangle surface.
#[derive(Clone, Copy, Debug)]
pub struct PhongVarying {
    /// Normal vector in World Space. Not unit length after interpolation.
    pub normal: Vector3<f32>,
    /// Position in World Space, kept as a vector so it can be blended.
    pub world_pos: Vector3<f32>,
}

impl Add for PhongVarying {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            normal: self.normal + other.normal,
            world_pos: self.world_pos + other.world_pos,
        }
    }
}

impl Mul<f32> for PhongVarying {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            normal: self.normal * scalar,
            world_pos: self.world_pos * scalar,
        }
    }
}

/// Per-pixel fixed-function lighting: a global ambient term plus, per light,
/// ambient + Lambert diffuse + Blinn-Phong specular, scaled by attenuation.
pub struct PhongShader<'a> {
    // Matrices
    pub model_matrix: Matrix4<f32>,
    pub normal_matrix: Matrix3<f32>,
    pub mvp: Matrix4<f32>,

    // Lighting
    pub lights: &'a [Light],
    pub global_ambient: Vector3<f32>,

    // Camera
    pub camera_pos: Point3<f32>,
}

impl<'a> PhongShader<'a> {
    pub fn new(
        model: Matrix4<f32>,
        view_projection: &Matrix4<f32>,
        camera_pos: Point3<f32>,
        lights: &'a [Light],
        global_ambient: Vector3<f32>,
    ) -> Self {
        Self {
            model_matrix: model,
            // Inverse transpose keeps normals perpendicular under non-uniform scaling.
            normal_matrix: normal_matrix(&model),
            mvp: view_projection * model,
            lights,
            global_ambient,
            camera_pos,
        }
    }

    /// Colour of a surface point with unit normal `normal`.
    pub fn shade(&self, world_pos: &Point3<f32>, normal: &Vector3<f32>, material: &Material) -> Vector3<f32> {
        let view_dir = (self.camera_pos - world_pos)
            .try_normalize(1e-6)
            .unwrap_or(*normal);

        let mut color = self.global_ambient.component_mul(&material.ambient);
        for light in self.lights {
            let colors = light.colors();
            let light_dir = light.direction_to_light(world_pos);

            let ambient = colors.ambient.component_mul(&material.ambient);

            let n_dot_l = normal.dot(&light_dir);
            let diffuse = colors.diffuse.component_mul(&material.diffuse) * n_dot_l.max(0.0);

            // No highlight on surfaces facing away from the light.
            let specular = if n_dot_l > 0.0 {
                let half = (light_dir + view_dir).try_normalize(1e-6).unwrap_or(*normal);
                let spec = normal.dot(&half).max(0.0).powf(material.shininess);
                colors.specular.component_mul(&material.specular) * spec
            } else {
                Vector3::zeros()
            };

            color += (ambient + diffuse + specular) * light.attenuation_at(world_pos);
        }

        color.map(|c| c.clamp(0.0, 1.0))
    }
}

impl Shader for PhongShader<'_> {
    type Varying = PhongVarying;

    fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, Self::Varying) {
        let world_pos = self.model_matrix.transform_point(&vertex.position);
        let world_normal = self.normal_matrix * vertex.normal;
        let clip_pos = self.mvp * vertex.position.to_homogeneous();

        (
            clip_pos,
            PhongVarying {
                normal: world_normal,
                world_pos: world_pos.coords,
            },
        )
    }

    fn fragment(&self, varying: Self::Varying, material: &Material) -> Vector3<f32> {
        // Renormalize after scaling and interpolation.
        let normal = varying.normal.try_normalize(1e-8).unwrap_or_else(Vector3::y);
        self.shade(&Point3::from(varying.world_pos), &normal, material)
    }
}
