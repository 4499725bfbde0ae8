use nalgebra::{Point3, Vector3};

/// Per-light colour terms, as in the fixed-function lighting model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightColors {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Default for LightColors {
    fn default() -> Self {
        Self {
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(1.0, 1.0, 1.0),
            specular: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

/// A light source in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Infinitely far away; `direction` is the direction the light travels.
    Directional {
        direction: Vector3<f32>,
        colors: LightColors,
    },
    /// Positional light radiating in all directions.
    Point {
        position: Point3<f32>,
        colors: LightColors,
        /// (constant, linear, quadratic)
        attenuation: (f32, f32, f32),
    },
}

impl Light {
    pub fn new_directional(direction: Vector3<f32>, colors: LightColors) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            colors,
        }
    }

    /// Point light without distance falloff (the GL default attenuation).
    pub fn new_point(position: Point3<f32>, colors: LightColors) -> Self {
        Self::Point {
            position,
            colors,
            attenuation: (1.0, 0.0, 0.0),
        }
    }

    pub fn colors(&self) -> &LightColors {
        match self {
            Light::Directional { colors, .. } | Light::Point { colors, .. } => colors,
        }
    }

    /// Unit vector from `surface_point` towards the light.
    pub fn direction_to_light(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        match self {
            Light::Directional { direction, .. } => -direction,
            Light::Point { position, .. } => (position - surface_point).normalize(),
        }
    }

    /// Distance attenuation factor at `surface_point`; 1 for directional lights.
    pub fn attenuation_at(&self, surface_point: &Point3<f32>) -> f32 {
        match self {
            Light::Directional { .. } => 1.0,
            Light::Point {
                position,
                attenuation: (c, l, q),
                ..
            } => {
                let d = (position - surface_point).norm();
                1.0 / (c + l * d + q * d * d).max(1e-6)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_light_direction_points_at_light() {
        let light = Light::new_point(Point3::new(0.0, 10.0, 0.0), LightColors::default());
        let dir = light.direction_to_light(&Point3::origin());
        assert_relative_eq!(dir, Vector3::y(), epsilon = 1e-6);
        assert_relative_eq!(light.attenuation_at(&Point3::origin()), 1.0);
    }

    #[test]
    fn directional_light_is_reversed_travel_direction() {
        let light = Light::new_directional(Vector3::new(0.0, -2.0, 0.0), LightColors::default());
        let dir = light.direction_to_light(&Point3::new(5.0, 0.0, 5.0));
        assert_relative_eq!(dir, Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn quadratic_attenuation_falls_off_with_distance() {
        let light = Light::Point {
            position: Point3::new(0.0, 0.0, 2.0),
            colors: LightColors::default(),
            attenuation: (1.0, 0.0, 1.0),
        };
        assert_relative_eq!(light.attenuation_at(&Point3::origin()), 0.2, epsilon = 1e-6);
    }
}
