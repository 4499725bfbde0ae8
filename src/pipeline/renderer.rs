use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Vertex;
use crate::core::pipeline::Shader;
use crate::core::rasterizer::Rasterizer;
use crate::scene::material::Material;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub rasterizer: Rasterizer,
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    /// Creates a new renderer.
    /// sample_count: 1 for no AA, 2 for 2x2 SSAA, etc.
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        Self {
            rasterizer: Rasterizer::new(),
            framebuffer: FrameBuffer::new(width, height, sample_count),
        }
    }

    /// Clears colour to `color` and depth to the far value.
    pub fn clear(&mut self, color: Vector3<f32>) {
        self.framebuffer.clear(color, f32::INFINITY);
    }

    /// Draws an indexed triangle mesh using the provided shader and material.
    pub fn draw_mesh<S: Shader>(&mut self, mesh: &Mesh, shader: &S, material: &Material) {
        for [v0, v1, v2] in mesh.triangles() {
            self.draw_triangle(shader, [v0, v1, v2], material);
        }
    }

    /// Draws one planar quad, corners counter-clockwise, as the fan (0,1,2), (0,2,3).
    pub fn draw_quad<S: Shader>(&mut self, corners: &[Vertex; 4], shader: &S, material: &Material) {
        self.draw_triangle(shader, [&corners[0], &corners[1], &corners[2]], material);
        self.draw_triangle(shader, [&corners[0], &corners[2], &corners[3]], material);
    }

    fn draw_triangle<S: Shader>(&mut self, shader: &S, vertices: [&Vertex; 3], material: &Material) {
        let (pos0, var0) = shader.vertex(vertices[0]);
        let (pos1, var1) = shader.vertex(vertices[1]);
        let (pos2, var2) = shader.vertex(vertices[2]);

        self.rasterizer.rasterize_triangle(
            &mut self.framebuffer,
            shader,
            &[pos0, pos1, pos2],
            &[var0, var1, var2],
            material,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector4};

    struct Passthrough;

    impl Shader for Passthrough {
        type Varying = f32;

        fn vertex(&self, vertex: &Vertex) -> (Vector4<f32>, f32) {
            (vertex.position.to_homogeneous(), 0.0)
        }

        fn fragment(&self, _varying: f32, material: &Material) -> Vector3<f32> {
            material.diffuse
        }
    }

    #[test]
    fn quad_covers_both_triangles() {
        let n = Vector3::z();
        let corners = [
            Vertex::new(Point3::new(-1.0, -1.0, 0.0), n),
            Vertex::new(Point3::new(1.0, -1.0, 0.0), n),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), n),
            Vertex::new(Point3::new(-1.0, 1.0, 0.0), n),
        ];
        let mut renderer = Renderer::new(4, 4, 1);
        renderer.clear(Vector3::zeros());
        renderer.draw_quad(&corners, &Passthrough, &Material::default());

        let diffuse = Material::default().diffuse;
        for (x, y) in [(0, 0), (3, 0), (0, 3), (3, 3)] {
            assert_eq!(renderer.framebuffer.get_pixel(x, y), Some(diffuse));
        }
    }

    #[test]
    fn mesh_draw_respects_depth() {
        let mut renderer = Renderer::new(4, 4, 1);
        renderer.clear(Vector3::zeros());
        let cube = Mesh::cube();
        renderer.draw_mesh(&cube, &Passthrough, &Material::blimp_body());
        // Cube spans [-0.5, 0.5]: centre pixels are covered, corners are not.
        assert_eq!(renderer.framebuffer.get_pixel(1, 1), Some(Material::blimp_body().diffuse));
        assert_eq!(renderer.framebuffer.get_pixel(0, 0), Some(Vector3::zeros()));
        assert!(renderer.framebuffer.depth_at(1, 1).is_some_and(|d| d.is_finite()));
    }
}
