use crate::scene::blimp::BlimpComposer;
use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::quad_mesh::QuadMesh;
use crate::scene::state::{BlimpState, ControlSteps};
use nalgebra::Vector3;

/// Tessellated unit shapes the canvas primitives are drawn with.
#[derive(Debug, Clone)]
pub struct PrimitiveMeshes {
    pub cylinder: Mesh,
    pub sphere: Mesh,
    pub cube: Mesh,
}

impl PrimitiveMeshes {
    pub fn new(slices: u32, stacks: u32) -> Self {
        Self {
            // The envelope keeps half the stacks along its axis.
            cylinder: Mesh::cylinder(slices, (stacks / 2).max(1)),
            sphere: Mesh::sphere(slices, stacks),
            cube: Mesh::cube(),
        }
    }
}

/// Holds all scene resources required for rendering. Built once, read-only afterwards.
pub struct RenderContext {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub global_ambient: Vector3<f32>,
    pub clear_color: Vector3<f32>,

    pub meshes: PrimitiveMeshes,
    pub ground: QuadMesh,
    pub ground_offset: Vector3<f32>,

    pub composer: BlimpComposer,
    pub initial_state: BlimpState,
    pub control_steps: ControlSteps,
}
