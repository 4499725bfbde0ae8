//! Immediate-mode drawing surface.
//!
//! Scene code describes a frame as a sequence of `set_material` and `draw`
//! calls; a [`Canvas`] decides what to do with them. [`DrawList`] records the
//! calls so a frame can be inspected, compared, or handed to the renderer.

use crate::core::geometry::Vertex;
use crate::scene::material::Material;
use nalgebra::Matrix4;

/// Shapes the scene is built from. All are defined in their own object space
/// and placed by the transform passed alongside them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Open unit cylinder along +Z, radius 1, height 1.
    Cylinder,
    /// Sphere centred at the origin.
    Sphere { radius: f32 },
    /// Cube centred at the origin.
    Cube { size: f32 },
    /// One quadrilateral, corners in counter-clockwise order.
    Quad([Vertex; 4]),
}

pub trait Canvas {
    /// Material used by every following `draw` until the next call.
    fn set_material(&mut self, material: &Material);

    /// Draws `primitive` with the model matrix `transform`.
    fn draw(&mut self, primitive: Primitive, transform: &Matrix4<f32>);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub material: Material,
    pub transform: Matrix4<f32>,
}

/// Canvas that records one frame's commands in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    material: Material,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drops the recorded commands but keeps the allocation for the next frame.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.material = Material::default();
    }
}

impl Canvas for DrawList {
    fn set_material(&mut self, material: &Material) {
        self.material = *material;
    }

    fn draw(&mut self, primitive: Primitive, transform: &Matrix4<f32>) {
        self.commands.push(DrawCommand {
            primitive,
            material: self.material,
            transform: *transform,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_capture_the_active_material() {
        let mut list = DrawList::new();
        list.draw(Primitive::Cube { size: 1.0 }, &Matrix4::identity());
        list.set_material(&Material::blimp_body());
        list.draw(Primitive::Sphere { radius: 2.0 }, &Matrix4::identity());

        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[0].material, Material::default());
        assert_eq!(list.commands()[1].material, Material::blimp_body());

        list.clear();
        assert!(list.is_empty());
    }
}
