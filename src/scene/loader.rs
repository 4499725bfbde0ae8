use crate::error::Result;
use crate::io::config::{Config, LightConfig};
use crate::scene::blimp::{BlimpComposer, BlimpDimensions};
use crate::scene::camera::Camera;
use crate::scene::context::{PrimitiveMeshes, RenderContext};
use crate::scene::light::{Light, LightColors};
use crate::scene::material::Material;
use crate::scene::quad_mesh::QuadMesh;
use crate::scene::state::{BlimpState, ControlSteps};
use log::{info, warn};
use nalgebra::{Point3, Vector3};

fn light_from_config(l: &LightConfig) -> Option<Light> {
    let colors = LightColors {
        ambient: Vector3::from(l.ambient),
        diffuse: Vector3::from(l.diffuse),
        specular: Vector3::from(l.specular),
    };

    match l.r#type.as_str() {
        "directional" => {
            let Some(dir) = l.direction.map(Vector3::from) else {
                warn!("Directional light without a direction ignored.");
                return None;
            };
            if dir.norm_squared() < 1e-12 {
                warn!("Directional light with zero direction ignored.");
                return None;
            }
            Some(Light::new_directional(dir, colors))
        }
        "point" => {
            let Some(position) = l.position else {
                warn!("Point light without a position ignored.");
                return None;
            };
            let mut light = Light::new_point(Point3::from(position), colors);
            if let Light::Point {
                ref mut attenuation,
                ..
            } = light
                && let Some(a) = l.attenuation
            {
                *attenuation = (a[0], a[1], a[2]);
            }
            Some(light)
        }
        other => {
            warn!("Unknown light type '{}' ignored.", other);
            None
        }
    }
}

/// Builds the light list, skipping entries that are incomplete or of an unknown type.
pub fn build_lights_from_config(config: &Config) -> Vec<Light> {
    config.lights.iter().filter_map(light_from_config).collect()
}

pub fn build_ground_from_config(config: &Config) -> Result<QuadMesh> {
    let g = &config.ground;
    let material = Material::new(
        Vector3::from(g.ambient),
        Vector3::from(g.diffuse),
        Vector3::from(g.specular),
        g.shininess,
    );
    QuadMesh::build(
        Point3::from(g.origin),
        g.span_u,
        g.span_v,
        Vector3::from(g.dir_u),
        Vector3::from(g.dir_v),
        g.subdivisions,
        material,
    )
}

/// Builds every resource a frame needs. Fails only on degenerate ground parameters.
pub fn init_scene_resources(config: &Config) -> Result<RenderContext> {
    // 1. Camera
    let aspect_ratio = config.render.width as f32 / config.render.height.max(1) as f32;
    let camera = Camera::new_perspective(
        Point3::from(config.camera.position),
        Point3::from(config.camera.target),
        Vector3::from(config.camera.up),
        config.camera.fov,
        aspect_ratio,
        config.camera.near,
        config.camera.far,
    );

    // 2. Lights
    let lights = build_lights_from_config(config);

    // 3. Geometry
    let ground = build_ground_from_config(config)?;
    let meshes = PrimitiveMeshes::new(config.blimp.slices, config.blimp.stacks);

    // 4. Blimp
    let b = &config.blimp;
    let composer = BlimpComposer::new(BlimpDimensions {
        width: b.body_width,
        length: b.body_length,
        depth: b.body_depth,
    });
    let initial_state = BlimpState {
        x: b.x,
        z: b.z,
        heading: b.heading,
        height: b.height,
        propeller_angle: 0.0,
    };
    let c = &config.controls;
    let control_steps = ControlSteps {
        move_step: c.move_step,
        turn_step: c.turn_step,
        climb_step: c.climb_step,
        propeller_step: c.propeller_step,
    };

    info!(
        "Scene initialized: {} lights, {}x{} ground ({} quads).",
        lights.len(),
        ground.subdivisions(),
        ground.subdivisions(),
        ground.face_count()
    );

    Ok(RenderContext {
        camera,
        lights,
        global_ambient: Vector3::from(config.render.ambient_light),
        clear_color: Vector3::from(config.render.clear_color),
        meshes,
        ground,
        ground_offset: Vector3::from(config.ground.offset),
        composer,
        initial_state,
        control_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SceneError;

    #[test]
    fn default_config_builds_the_classic_scene() {
        let context = init_scene_resources(&Config::default()).unwrap();
        assert_eq!(context.lights.len(), 2);
        assert_eq!(context.ground.face_count(), 256);
        assert_eq!(context.initial_state, BlimpState::default());
        assert_eq!(context.control_steps, ControlSteps::default());
        assert_eq!(context.composer.dims, BlimpDimensions::default());
        assert_eq!(context.meshes.sphere.triangle_count(), 760);
    }

    #[test]
    fn incomplete_and_unknown_lights_are_skipped() {
        let config = Config::from_toml(
            r#"
            [[lights]]
            type = "point"

            [[lights]]
            type = "spot"
            position = [0.0, 1.0, 0.0]

            [[lights]]
            type = "point"
            position = [0.0, 5.0, 0.0]
            attenuation = [1.0, 0.0, 0.5]
            "#,
        )
        .unwrap();
        let lights = build_lights_from_config(&config);
        assert_eq!(lights.len(), 1);
        assert!(matches!(
            &lights[0],
            Light::Point { attenuation, .. } if *attenuation == (1.0, 0.0, 0.5)
        ));
    }

    #[test]
    fn degenerate_ground_fails_start_up() {
        let mut config = Config::default();
        config.ground.subdivisions = 0;
        assert!(matches!(
            init_scene_resources(&config),
            Err(SceneError::InvalidMesh(_))
        ));
    }
}
