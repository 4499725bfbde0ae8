//! Procedural ground mesh: a planar grid of quads with one material.

use crate::core::geometry::Vertex;
use crate::core::grid::Grid;
use crate::core::math::stack::TransformStack;
use crate::error::{Result, SceneError};
use crate::scene::canvas::{Canvas, Primitive};
use crate::scene::material::Material;
use log::{debug, warn};
use nalgebra::{Point3, Vector3};

/// One grid cell: corner indices `(i,j), (i+1,j), (i+1,j+1), (i,j+1)` and its normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadFace {
    pub corners: [(usize, usize); 4],
    pub normal: Vector3<f32>,
}

/// A flat `n x n` quad grid spanned by two direction vectors from an origin.
#[derive(Debug, Clone)]
pub struct QuadMesh {
    vertices: Grid<Vertex>,
    subdivisions: usize,
    normal: Vector3<f32>,
    material: Material,
}

impl QuadMesh {
    /// Lays out `(subdivisions + 1)^2` vertices where
    /// `vertex(i, j) = origin + i * (span_u / n) * dir_u + j * (span_v / n) * dir_v`.
    ///
    /// The direction vectors are normalised. Zero subdivisions, non-positive
    /// spans and zero or parallel directions are rejected. Non-perpendicular
    /// directions give a parallelogram grid and are only logged.
    pub fn build(
        origin: Point3<f32>,
        span_u: f32,
        span_v: f32,
        dir_u: Vector3<f32>,
        dir_v: Vector3<f32>,
        subdivisions: usize,
        material: Material,
    ) -> Result<Self> {
        if subdivisions == 0 {
            return Err(SceneError::InvalidMesh(
                "subdivisions must be at least 1".to_string(),
            ));
        }
        if !(span_u.is_finite() && span_v.is_finite() && span_u > 0.0 && span_v > 0.0) {
            return Err(SceneError::InvalidMesh(format!(
                "spans must be positive and finite, got {} x {}",
                span_u, span_v
            )));
        }

        let unit = |v: Vector3<f32>, name: &str| {
            v.try_normalize(1e-6).ok_or_else(|| {
                SceneError::InvalidMesh(format!("{} must be a non-zero vector, got {:?}", name, v))
            })
        };
        let dir_u = unit(dir_u, "dir_u")?;
        let dir_v = unit(dir_v, "dir_v")?;

        // Counter-clockwise corner order seen from this side.
        let normal = dir_u.cross(&dir_v).try_normalize(1e-6).ok_or_else(|| {
            SceneError::InvalidMesh("dir_u and dir_v must not be parallel".to_string())
        })?;
        if dir_u.dot(&dir_v).abs() > 1e-4 {
            warn!(
                "Quad mesh directions are not perpendicular (dot = {:.4}); the grid will be skewed.",
                dir_u.dot(&dir_v)
            );
        }

        let step_u = dir_u * (span_u / subdivisions as f32);
        let step_v = dir_v * (span_v / subdivisions as f32);
        let side = subdivisions + 1;
        let vertices = Grid::from_fn(side, side, |i, j| {
            Vertex::new(origin + step_u * i as f32 + step_v * j as f32, normal)
        })?;

        debug!(
            "Built {}x{} quad mesh ({} vertices), normal {:?}",
            subdivisions,
            subdivisions,
            vertices.len(),
            normal
        );

        Ok(Self {
            vertices,
            subdivisions,
            normal,
            material,
        })
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.subdivisions * self.subdivisions
    }

    /// The shared up-vector of the grid.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn vertex(&self, i: usize, j: usize) -> Option<&Vertex> {
        self.vertices.get(i, j)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// The `n^2` cells, `i` varying fastest.
    pub fn faces(&self) -> impl Iterator<Item = QuadFace> + '_ {
        let n = self.subdivisions;
        (0..n).flat_map(move |j| {
            (0..n).map(move |i| QuadFace {
                corners: [(i, j), (i + 1, j), (i + 1, j + 1), (i, j + 1)],
                normal: self.normal,
            })
        })
    }

    /// Sets the mesh material and emits one quad per cell in the current frame of `stack`.
    pub fn draw(&self, stack: &TransformStack, canvas: &mut impl Canvas) {
        canvas.set_material(&self.material);
        let transform = *stack.current();

        for face in self.faces() {
            let mut corners = [Vertex::new(Point3::origin(), self.normal); 4];
            for (slot, &(i, j)) in corners.iter_mut().zip(&face.corners) {
                // Face corners come from `faces()`, which stays inside the grid.
                if let Some(v) = self.vertices.get(i, j) {
                    *slot = *v;
                }
            }
            canvas.draw(Primitive::Quad(corners), &transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::canvas::DrawList;
    use approx::assert_relative_eq;

    fn ground(n: usize) -> QuadMesh {
        QuadMesh::build(
            Point3::new(-16.0, 0.0, 16.0),
            32.0,
            32.0,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            n,
            Material::default(),
        )
        .unwrap()
    }

    #[test]
    fn vertex_and_face_counts_follow_subdivisions() {
        for n in [1, 2, 5, 16] {
            let mesh = ground(n);
            assert_eq!(mesh.vertex_count(), (n + 1) * (n + 1));
            assert_eq!(mesh.face_count(), n * n);
            assert_eq!(mesh.faces().count(), n * n);
        }
    }

    #[test]
    fn normals_are_unit_and_shared() {
        let mesh = ground(4);
        for v in mesh.vertices() {
            assert_relative_eq!(v.normal.norm(), 1.0, epsilon = 1e-6);
            assert_eq!(v.normal, mesh.normal());
        }
        assert_relative_eq!(mesh.normal(), Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn corners_match_origin_and_far_corner() {
        let mesh = ground(16);
        assert_relative_eq!(mesh.vertex(0, 0).unwrap().position, Point3::new(-16.0, 0.0, 16.0));
        assert_relative_eq!(
            mesh.vertex(16, 16).unwrap().position,
            Point3::new(16.0, 0.0, -16.0),
            epsilon = 1e-4
        );
        assert_relative_eq!(
            mesh.vertex(1, 0).unwrap().position,
            Point3::new(-14.0, 0.0, 16.0),
            epsilon = 1e-5
        );
        assert!(mesh.vertex(17, 0).is_none());
    }

    #[test]
    fn quads_wind_counter_clockwise_around_normal() {
        let mesh = ground(3);
        let mut list = DrawList::new();
        mesh.draw(&TransformStack::new(), &mut list);
        assert_eq!(list.len(), 9);

        for cmd in list.commands() {
            let Primitive::Quad(c) = cmd.primitive else {
                panic!("expected quads, got {:?}", cmd.primitive);
            };
            let face = (c[1].position - c[0].position).cross(&(c[2].position - c[0].position));
            assert!(face.dot(&mesh.normal()) > 0.0);
            assert_eq!(cmd.material, *mesh.material());
        }
    }

    #[test]
    fn non_unit_directions_are_normalised() {
        let mesh = QuadMesh::build(
            Point3::origin(),
            2.0,
            2.0,
            Vector3::new(5.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
            2,
            Material::default(),
        )
        .unwrap();
        assert_relative_eq!(mesh.vertex(2, 2).unwrap().position, Point3::new(2.0, 2.0, 0.0));
        assert_relative_eq!(mesh.normal(), Vector3::z());
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let x = Vector3::x();
        let z = Vector3::z();
        let m = Material::default();
        let o = Point3::origin();
        assert!(QuadMesh::build(o, 1.0, 1.0, x, z, 0, m).is_err());
        assert!(QuadMesh::build(o, 1.0, 1.0, x, x * 2.0, 4, m).is_err());
        assert!(QuadMesh::build(o, 1.0, 1.0, Vector3::zeros(), z, 4, m).is_err());
        assert!(QuadMesh::build(o, -1.0, 1.0, x, z, 4, m).is_err());
    }

    #[test]
    fn drawing_does_not_touch_the_stack() {
        let mesh = ground(2);
        let mut stack = TransformStack::new();
        let mut list = DrawList::new();
        {
            let mut scope = stack.push();
            scope.translate(0.0, -20.0, 0.0);
            mesh.draw(&scope, &mut list);
        }
        assert_eq!(stack.depth(), 1);
        assert_relative_eq!(list.commands()[0].transform[(1, 3)], -20.0);
    }
}
