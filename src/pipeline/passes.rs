use crate::core::color::pack_rgb;
use crate::core::framebuffer::FrameBuffer;
use crate::core::math::stack::TransformStack;
use crate::core::math::transform::TransformFactory;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shaders::phong::PhongShader;
use crate::scene::canvas::{DrawList, Primitive};
use crate::scene::context::RenderContext;
use crate::scene::state::BlimpState;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Records one frame: the blimp for `state`, then the ground at its offset.
/// `list` is cleared first so its allocation can be reused across frames.
pub fn compose_frame(state: &BlimpState, context: &RenderContext, list: &mut DrawList) {
    list.clear();
    let mut stack = TransformStack::new();

    context.composer.draw_model(state, &mut stack, list);

    let mut ground = stack.push();
    let offset = context.ground_offset;
    ground.translate(offset.x, offset.y, offset.z);
    context.ground.draw(&ground, list);
}

/// Rasterizes a recorded frame into the renderer's framebuffer.
pub fn render_frame(list: &DrawList, context: &RenderContext, renderer: &mut Renderer) {
    renderer.clear(context.clear_color);

    let view_projection = context.camera.view_projection();
    let meshes = &context.meshes;

    for cmd in list.commands() {
        let model = match cmd.primitive {
            Primitive::Sphere { radius } => {
                cmd.transform * TransformFactory::scaling(&Vector3::new(radius, radius, radius))
            }
            Primitive::Cube { size } => {
                cmd.transform * TransformFactory::scaling(&Vector3::new(size, size, size))
            }
            Primitive::Cylinder | Primitive::Quad(_) => cmd.transform,
        };

        let shader = PhongShader::new(
            model,
            &view_projection,
            context.camera.position,
            &context.lights,
            context.global_ambient,
        );

        match &cmd.primitive {
            Primitive::Cylinder => renderer.draw_mesh(&meshes.cylinder, &shader, &cmd.material),
            Primitive::Sphere { .. } => renderer.draw_mesh(&meshes.sphere, &shader, &cmd.material),
            Primitive::Cube { .. } => renderer.draw_mesh(&meshes.cube, &shader, &cmd.material),
            Primitive::Quad(corners) => renderer.draw_quad(corners, &shader, &cmd.material),
        }
    }
}

/// Resolves the framebuffer into packed 0RGB pixels, one row per task.
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32]) {
    buffer
        .par_chunks_mut(framebuffer.width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = framebuffer.get_pixel(x, y).map_or(0, pack_rgb);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Config;
    use crate::scene::loader::init_scene_resources;

    #[test]
    fn frame_is_blimp_then_ground() {
        let mut config = Config::default();
        config.ground.subdivisions = 4;
        let context = init_scene_resources(&config).unwrap();

        let mut list = DrawList::new();
        compose_frame(&context.initial_state, &context, &mut list);
        assert_eq!(list.len(), 13 + 16);
        assert!(
            list.commands()[13..]
                .iter()
                .all(|c| matches!(c.primitive, Primitive::Quad(_)) && c.transform[(1, 3)] == -20.0)
        );

        // Reusing the list yields the same frame.
        let first = list.clone();
        compose_frame(&context.initial_state, &context, &mut list);
        assert_eq!(first, list);
    }

    #[test]
    fn packed_buffer_matches_clear_color() {
        let mut fb = FrameBuffer::new(3, 2, 2);
        fb.clear(Vector3::new(0.4, 0.4, 0.4), f32::INFINITY);
        let mut buffer = vec![0u32; 6];
        post_process_to_buffer(&fb, &mut buffer);
        assert!(buffer.iter().all(|&p| p == pack_rgb(Vector3::new(0.4, 0.4, 0.4))));
    }
}
