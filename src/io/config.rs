use crate::error::{Result, SceneError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default = "default_lights")]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub ground: GroundConfig,
    #[serde(default)]
    pub blimp: BlimpConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            lights: default_lights(),
            ground: GroundConfig::default(),
            blimp: BlimpConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SceneError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    // --- Window & Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_samples")]
    pub samples: usize,

    // --- Shading ---
    #[serde(default = "default_clear_color")]
    pub clear_color: [f32; 3],
    #[serde(default = "default_ambient")]
    pub ambient_light: [f32; 3],

    // --- Pipeline & Debug ---
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default)]
    pub wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            output: default_output(),
            samples: default_samples(),
            clear_color: default_clear_color(),
            ambient_light: default_ambient(),
            cull_mode: default_cull_mode(),
            wireframe: false,
        }
    }
}

// Defaults matching scene.toml
fn default_width() -> usize {
    650
}
fn default_height() -> usize {
    500
}
fn default_title() -> String {
    "3D Hierarchical Example".to_string()
}
fn default_output() -> String {
    "blimp.png".to_string()
}
fn default_samples() -> usize {
    1
}
fn default_clear_color() -> [f32; 3] {
    [0.4, 0.4, 0.4]
}
fn default_ambient() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}
fn default_cull_mode() -> String {
    "back".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            up: default_up(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 6.0, 40.0]
}
fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    0.2
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightConfig {
    pub r#type: String, // "point", "directional"
    pub position: Option<[f32; 3]>,
    pub direction: Option<[f32; 3]>,
    #[serde(default = "default_light_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_white")]
    pub diffuse: [f32; 3],
    #[serde(default = "default_white")]
    pub specular: [f32; 3],
    /// (constant, linear, quadratic); no falloff when absent.
    pub attenuation: Option<[f32; 3]>,
}

impl LightConfig {
    fn point(position: [f32; 3]) -> Self {
        Self {
            r#type: "point".to_string(),
            position: Some(position),
            direction: None,
            ambient: default_light_ambient(),
            diffuse: default_white(),
            specular: default_white(),
            attenuation: None,
        }
    }
}

/// Two white lights above and in front of the scene, left and right of the camera.
fn default_lights() -> Vec<LightConfig> {
    vec![
        LightConfig::point([-4.0, 15.1, 46.7]),
        LightConfig::point([4.0, 15.1, 46.7]),
    ]
}
fn default_light_ambient() -> [f32; 3] {
    [0.2, 0.2, 0.2]
}
fn default_white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundConfig {
    // --- Geometry ---
    #[serde(default = "default_ground_origin")]
    pub origin: [f32; 3],
    #[serde(default = "default_dir_u")]
    pub dir_u: [f32; 3],
    #[serde(default = "default_dir_v")]
    pub dir_v: [f32; 3],
    #[serde(default = "default_ground_span")]
    pub span_u: f32,
    #[serde(default = "default_ground_span")]
    pub span_v: f32,
    #[serde(default = "default_subdivisions")]
    pub subdivisions: usize,
    /// World placement of the whole mesh.
    #[serde(default = "default_ground_offset")]
    pub offset: [f32; 3],

    // --- Material ---
    #[serde(default = "default_ground_ambient")]
    pub ambient: [f32; 3],
    #[serde(default = "default_ground_diffuse")]
    pub diffuse: [f32; 3],
    #[serde(default = "default_ground_specular")]
    pub specular: [f32; 3],
    #[serde(default = "default_ground_shininess")]
    pub shininess: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            origin: default_ground_origin(),
            dir_u: default_dir_u(),
            dir_v: default_dir_v(),
            span_u: default_ground_span(),
            span_v: default_ground_span(),
            subdivisions: default_subdivisions(),
            offset: default_ground_offset(),
            ambient: default_ground_ambient(),
            diffuse: default_ground_diffuse(),
            specular: default_ground_specular(),
            shininess: default_ground_shininess(),
        }
    }
}

fn default_ground_origin() -> [f32; 3] {
    [-16.0, 0.0, 16.0]
}
fn default_dir_u() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}
fn default_dir_v() -> [f32; 3] {
    [0.0, 0.0, -1.0]
}
fn default_ground_span() -> f32 {
    32.0
}
fn default_subdivisions() -> usize {
    16
}
fn default_ground_offset() -> [f32; 3] {
    [0.0, -20.0, 0.0]
}
fn default_ground_ambient() -> [f32; 3] {
    [0.0, 0.05, 0.0]
}
fn default_ground_diffuse() -> [f32; 3] {
    [0.4, 0.8, 0.4]
}
fn default_ground_specular() -> [f32; 3] {
    [0.04, 0.04, 0.04]
}
fn default_ground_shininess() -> f32 {
    0.2
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlimpConfig {
    // --- Envelope (everything else is positioned from these) ---
    #[serde(default = "default_body_width")]
    pub body_width: f32,
    #[serde(default = "default_body_length")]
    pub body_length: f32,
    #[serde(default = "default_body_depth")]
    pub body_depth: f32,

    // --- Initial pose ---
    #[serde(default = "default_heading")]
    pub heading: f32,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default)]
    pub height: f32,

    // --- Tessellation of the curved parts ---
    #[serde(default = "default_slices")]
    pub slices: u32,
    #[serde(default = "default_stacks")]
    pub stacks: u32,
}

impl Default for BlimpConfig {
    fn default() -> Self {
        Self {
            body_width: default_body_width(),
            body_length: default_body_length(),
            body_depth: default_body_depth(),
            heading: default_heading(),
            x: 0.0,
            z: 0.0,
            height: 0.0,
            slices: default_slices(),
            stacks: default_stacks(),
        }
    }
}

fn default_body_width() -> f32 {
    6.0
}
fn default_body_length() -> f32 {
    6.0
}
fn default_body_depth() -> f32 {
    18.0
}
fn default_heading() -> f32 {
    90.0
}
fn default_slices() -> u32 {
    20
}
fn default_stacks() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlsConfig {
    #[serde(default = "default_move_step")]
    pub move_step: f32,
    #[serde(default = "default_turn_step")]
    pub turn_step: f32,
    #[serde(default = "default_climb_step")]
    pub climb_step: f32,
    #[serde(default = "default_propeller_step")]
    pub propeller_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_step: default_move_step(),
            turn_step: default_turn_step(),
            climb_step: default_climb_step(),
            propeller_step: default_propeller_step(),
        }
    }
}

fn default_move_step() -> f32 {
    1.0
}
fn default_turn_step() -> f32 {
    2.0
}
fn default_climb_step() -> f32 {
    1.0
}
fn default_propeller_step() -> f32 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.render.width, 650);
        assert_eq!(config.render.height, 500);
        assert_eq!(config.render.title, "3D Hierarchical Example");
        assert_eq!(config.camera.position, [0.0, 6.0, 40.0]);
        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.ground.subdivisions, 16);
        assert_eq!(config.ground.offset, [0.0, -20.0, 0.0]);
        assert_eq!(config.blimp.heading, 90.0);
        assert_eq!(config.controls.turn_step, 2.0);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::from_toml(
            r#"
            [render]
            samples = 2
            cull_mode = "none"

            [ground]
            subdivisions = 4

            [[lights]]
            type = "directional"
            direction = [0.0, -1.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.render.samples, 2);
        assert_eq!(config.render.width, 650);
        assert_eq!(config.render.cull_mode, "none");
        assert_eq!(config.ground.subdivisions, 4);
        assert_eq!(config.ground.span_u, 32.0);
        assert_eq!(config.lights.len(), 1);
        assert_eq!(config.lights[0].diffuse, [1.0, 1.0, 1.0]);
        assert!(config.lights[0].position.is_none());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::from_toml("[render\nwidth = 1").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, SceneError::ConfigRead { .. }));
    }
}
