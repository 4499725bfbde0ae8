//! Hierarchical blimp model.
//!
//! The blimp is drawn as a tree of transform scopes: a root frame placed by
//! [`BlimpState`], then body, cabin and propeller sub-frames below it. Each
//! part only knows its offset from its parent, so moving or turning the root
//! carries every part along.

use crate::core::math::stack::TransformStack;
use crate::scene::canvas::{Canvas, Primitive};
use crate::scene::material::Material;
use crate::scene::state::BlimpState;

/// Envelope size. The cabin is sized from these; fins and propellers keep fixed offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlimpDimensions {
    pub width: f32,
    pub length: f32,
    pub depth: f32,
}

impl Default for BlimpDimensions {
    fn default() -> Self {
        Self {
            width: 6.0,
            length: 6.0,
            depth: 18.0,
        }
    }
}

impl BlimpDimensions {
    pub fn cabin_length(&self) -> f32 {
        0.4 * self.width
    }
}

/// Which propeller unit a blade belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Unit at `x = +12`.
    Left,
    /// Unit at `x = -12`.
    Right,
}

impl Side {
    fn offset_x(self) -> f32 {
        match self {
            Side::Left => 12.0,
            Side::Right => -12.0,
        }
    }
}

/// Degrees of blade rotation about the forward axis. The two units spin in opposite directions.
pub fn blade_angle(propeller_angle: f32, side: Side) -> f32 {
    match side {
        Side::Left => propeller_angle * 12.0,
        Side::Right => -propeller_angle * 12.0,
    }
}

/// Emits the blimp into a canvas. Holds only immutable parameters; the pose comes in per call.
#[derive(Debug, Clone)]
pub struct BlimpComposer {
    pub dims: BlimpDimensions,
    pub body_material: Material,
    pub propeller_material: Material,
}

impl Default for BlimpComposer {
    fn default() -> Self {
        Self::new(BlimpDimensions::default())
    }
}

impl BlimpComposer {
    pub fn new(dims: BlimpDimensions) -> Self {
        Self {
            dims,
            body_material: Material::blimp_body(),
            propeller_material: Material::propeller(),
        }
    }

    /// Draws the whole blimp for `state` under the current frame of `stack`.
    /// The stack is left as it was found.
    pub fn draw_model(&self, state: &BlimpState, stack: &mut TransformStack, canvas: &mut impl Canvas) {
        let mut root = stack.push();
        root.translate(state.x, state.height, state.z)
            .rotate(state.heading, 0.0, -1.0, 0.0);

        self.draw_body(&mut root, canvas);
        self.draw_cabin(&mut root, canvas);
        self.draw_propellers(state.propeller_angle, &mut root, canvas);
    }

    pub fn draw_body(&self, stack: &mut TransformStack, canvas: &mut impl Canvas) {
        let BlimpDimensions { width, length, depth } = self.dims;
        canvas.set_material(&self.body_material);

        {
            let mut center = stack.push();
            center.scale(width, length, depth);
            canvas.draw(Primitive::Cylinder, center.current());
        }
        {
            let mut front = stack.push();
            front.translate(0.0, 0.0, length * 3.0)
                .scale(width, length, depth * 0.6);
            canvas.draw(Primitive::Sphere { radius: 1.0 }, front.current());
        }
        {
            let mut back = stack.push();
            back.scale(width, length, depth * 0.6);
            canvas.draw(Primitive::Sphere { radius: 1.0 }, back.current());
        }
        {
            let mut horizontal_fin = stack.push();
            horizontal_fin.translate(0.0, -2.0, -4.0).scale(16.0, 0.3, 6.0);
            canvas.draw(Primitive::Cube { size: 1.0 }, horizontal_fin.current());
        }
        {
            let mut vertical_fin = stack.push();
            vertical_fin
                .rotate(15.0, 1.0, 0.0, 0.0)
                .translate(0.0, 0.5, -5.0)
                .scale(0.3, 10.0, 8.0);
            canvas.draw(Primitive::Cube { size: 1.0 }, vertical_fin.current());
        }
    }

    pub fn draw_cabin(&self, stack: &mut TransformStack, canvas: &mut impl Canvas) {
        let BlimpDimensions { width, length, .. } = self.dims;
        canvas.set_material(&self.body_material);

        let mut cabin = stack.push();
        // Seat on the body first, then the cabin's own offset and size.
        cabin
            .translate(0.0, 0.5 * length + 0.5 * self.dims.cabin_length(), 0.0)
            .translate(0.0, -10.0, 5.0)
            .scale(width, 0.6 * width, 1.2 * width);
        canvas.draw(Primitive::Cube { size: 1.0 }, cabin.current());
    }

    pub fn draw_propellers(
        &self,
        propeller_angle: f32,
        stack: &mut TransformStack,
        canvas: &mut impl Canvas,
    ) {
        canvas.set_material(&self.propeller_material);

        {
            let mut stabilizer = stack.push();
            stabilizer.translate(0.0, 0.0, 12.0).scale(20.0, 0.6, 3.5);
            canvas.draw(Primitive::Cube { size: 1.0 }, stabilizer.current());
        }

        let mut assembly = stack.push();
        assembly.scale(0.8, 0.8, 2.5);
        for side in [Side::Left, Side::Right] {
            Self::draw_propeller_unit(blade_angle(propeller_angle, side), side, &mut assembly, canvas);
        }
    }

    fn draw_propeller_unit(
        blade_angle: f32,
        side: Side,
        stack: &mut TransformStack,
        canvas: &mut impl Canvas,
    ) {
        let mut unit = stack.push();
        unit.translate(side.offset_x(), 0.0, 4.3);
        canvas.draw(Primitive::Sphere { radius: 2.0 }, unit.current());

        let mut hub = unit.push();
        hub.rotate(blade_angle, 0.0, 0.0, 1.0);
        for extra in [0.0, 90.0] {
            let mut blade = hub.push();
            blade
                .rotate(extra, 0.0, 0.0, 1.0)
                .translate(0.0, 0.0, 1.8)
                .scale(8.0, 1.0, 0.1);
            canvas.draw(Primitive::Cube { size: 1.0 }, blade.current());
        }
    }
}
