use crate::core::geometry::Vertex;
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// Indexed triangle list. Triangles wind counter-clockwise seen from outside.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates the triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> {
        self.indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Open cylinder of radius 1 along +Z from `z = 0` to `z = 1`, without caps
    /// (the shape `gluCylinder(q, 1, 1, 1, slices, stacks)` produces).
    pub fn cylinder(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(1);
        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

        for stack in 0..=stacks {
            let z = stack as f32 / stacks as f32;
            for slice in 0..=slices {
                let theta = 2.0 * PI * slice as f32 / slices as f32;
                let (s, c) = theta.sin_cos();
                vertices.push(Vertex::new(Point3::new(c, s, z), Vector3::new(c, s, 0.0)));
            }
        }

        let row = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let bl = stack * row + slice;
                let br = bl + 1;
                let tl = bl + row;
                let tr = tl + 1;
                indices.extend_from_slice(&[bl, br, tr, bl, tr, tl]);
            }
        }

        Self::new(vertices, indices)
    }

    /// Latitude/longitude sphere of radius 1 centred at the origin.
    pub fn sphere(slices: u32, stacks: u32) -> Self {
        let slices = slices.max(3);
        let stacks = stacks.max(2);
        let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
        let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);

        for stack in 0..=stacks {
            let phi = PI * stack as f32 / stacks as f32;
            let (ring_radius, y) = phi.sin_cos();
            for slice in 0..=slices {
                let theta = 2.0 * PI * slice as f32 / slices as f32;
                let (s, c) = theta.sin_cos();
                let normal = Vector3::new(ring_radius * c, y, ring_radius * s);
                vertices.push(Vertex::new(Point3::from(normal), normal));
            }
        }

        let row = slices + 1;
        for stack in 0..stacks {
            for slice in 0..slices {
                let current = stack * row + slice;
                let below = current + row;
                // Pole rows collapse one triangle of each quad to a point; skip it.
                if stack != 0 {
                    indices.extend_from_slice(&[current, current + 1, below]);
                }
                if stack != stacks - 1 {
                    indices.extend_from_slice(&[current + 1, below + 1, below]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Axis-aligned cube with edge length 1 centred at the origin, one normal per face.
    pub fn cube() -> Self {
        const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            // (normal, u, v) with u x v = normal
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in FACES {
            let n = Vector3::from(normal);
            let u = Vector3::from(u);
            let v = Vector3::from(v);
            let base = vertices.len() as u32;
            for (du, dv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
                let p = n * 0.5 + u * du + v * dv;
                vertices.push(Vertex::new(Point3::from(p), n));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self::new(vertices, indices)
    }
}
