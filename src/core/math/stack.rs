//! Scoped model-transform stack.
//!
//! Each [`TransformStack::push`] returns a [`TransformScope`] guard that
//! dereferences to the stack and pops its frame when dropped, so a child frame
//! can never outlive the block that opened it, early returns included.

use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Vector3};
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Matrix4<f32>>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// A stack holding only the identity root frame.
    pub fn new() -> Self {
        Self::with_root(Matrix4::identity())
    }

    pub fn with_root(root: Matrix4<f32>) -> Self {
        Self { frames: vec![root] }
    }

    /// The current (top) matrix.
    pub fn current(&self) -> &Matrix4<f32> {
        // The root frame is never popped, so the stack is never empty.
        &self.frames[self.frames.len() - 1]
    }

    /// Number of frames, the root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Opens a child frame that starts as a copy of the current one.
    pub fn push(&mut self) -> TransformScope<'_> {
        let top = *self.current();
        self.frames.push(top);
        TransformScope { stack: self }
    }

    /// Post-multiplies the current matrix (the next transform applies first to geometry).
    pub fn apply(&mut self, m: &Matrix4<f32>) -> &mut Self {
        let last = self.frames.len() - 1;
        self.frames[last] *= m;
        self
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply(&TransformFactory::translation(&Vector3::new(x, y, z)))
    }

    /// Rotation of `angle_deg` degrees about `(x, y, z)`.
    pub fn rotate(&mut self, angle_deg: f32, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply(&TransformFactory::rotation(&Vector3::new(x, y, z), angle_deg))
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply(&TransformFactory::scaling(&Vector3::new(x, y, z)))
    }
}

/// Guard for one pushed frame.
pub struct TransformScope<'a> {
    stack: &'a mut TransformStack,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        if self.stack.frames.len() > 1 {
            self.stack.frames.pop();
        }
    }
}
