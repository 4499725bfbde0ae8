use nalgebra::Vector3;

/// Fixed-function style surface description: ambient, diffuse and specular
/// reflectance plus a specular exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Default for Material {
    /// The GL default front material.
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(0.8, 0.8, 0.8),
            specular: Vector3::zeros(),
            shininess: 0.0,
        }
    }
}

impl Material {
    pub fn new(
        ambient: Vector3<f32>,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Light blue envelope and cabin.
    pub fn blimp_body() -> Self {
        let blue = Vector3::new(0.5, 0.7, 1.0);
        Self::new(blue, blue, blue, 64.0)
    }

    /// Dark, slightly glossy propellers and stabilizer bar.
    pub fn propeller() -> Self {
        Self::new(
            Vector3::zeros(),
            Vector3::new(0.1, 0.1, 0.1),
            Vector3::new(0.5, 0.5, 0.5),
            32.0,
        )
    }
}
