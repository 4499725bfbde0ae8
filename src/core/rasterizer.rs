use crate::core::framebuffer::FrameBuffer;
use crate::core::math::interpolation::{
    barycentric_coordinates, is_inside_triangle, perspective_correct_barycentric,
};
use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::core::pipeline::{Interpolatable, Shader};
use crate::scene::material::Material;
use nalgebra::{Point2, Vector4};
use rayon::prelude::*;

/// Draws clip-space triangles into a [`FrameBuffer`].
pub struct Rasterizer {
    pub cull_mode: CullMode,
    pub wireframe: bool,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum CullMode {
    Back,
    Front,
    None,
}

impl CullMode {
    /// Parses the config spelling; anything unrecognised culls back faces.
    pub fn from_name(name: &str) -> Self {
        match name {
            "front" => CullMode::Front,
            "none" => CullMode::None,
            _ => CullMode::Back,
        }
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

type ClipVertex<V> = (Vector4<f32>, V);

// Clip planes as (axis, sign): inside when sign * p[axis] <= p.w.
const CLIP_PLANES: [(usize, f32); 6] = [
    (0, 1.0),
    (0, -1.0),
    (1, 1.0),
    (1, -1.0),
    (2, 1.0),
    (2, -1.0),
];

impl Rasterizer {
    pub fn new() -> Self {
        Self {
            cull_mode: CullMode::Back,
            wireframe: false,
        }
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.cull_mode = mode;
    }

    /// Clips the triangle against the view frustum in homogeneous space
    /// (Sutherland–Hodgman), then fills the resulting convex polygon as a fan.
    pub fn rasterize_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
        material: &Material,
    ) {
        // Fast path: nothing to clip.
        let fully_inside = clip_coords.iter().all(|p| {
            CLIP_PLANES
                .iter()
                .all(|&(axis, sign)| sign * p[axis] <= p.w)
        });
        if fully_inside {
            self.fill_triangle(framebuffer, shader, clip_coords, varyings, material);
            return;
        }

        let mut current: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(12);
        let mut scratch: Vec<ClipVertex<S::Varying>> = Vec::with_capacity(12);
        current.extend((0..3).map(|i| (clip_coords[i], varyings[i])));

        for &(axis, sign) in &CLIP_PLANES {
            if current.is_empty() {
                return;
            }
            clip_polygon_against_plane(&current, &mut scratch, axis, sign);
            std::mem::swap(&mut current, &mut scratch);
        }

        if current.len() < 3 {
            return;
        }

        let v0 = current[0];
        for pair in current[1..].windows(2) {
            let (v1, v2) = (pair[0], pair[1]);
            self.fill_triangle(
                framebuffer,
                shader,
                &[v0.0, v1.0, v2.0],
                &[v0.1, v1.1, v2.1],
                material,
            );
        }
    }

    /// Perspective divide, viewport, culling and the parallel pixel loop for a
    /// triangle that lies inside the frustum.
    fn fill_triangle<S: Shader>(
        &self,
        framebuffer: &mut FrameBuffer,
        shader: &S,
        clip_coords: &[Vector4<f32>; 3],
        varyings: &[S::Varying; 3],
        material: &Material,
    ) {
        let width = framebuffer.buffer_width as f32;
        let height = framebuffer.buffer_height as f32;

        let mut screen = [Point2::origin(); 3];
        let mut ndc_z = [0.0; 3];
        let mut w_values = [0.0; 3];
        for i in 0..3 {
            if clip_coords[i].w.abs() < 1e-6 {
                return;
            }
            let ndc = apply_perspective_division(&clip_coords[i]);
            w_values[i] = clip_coords[i].w;
            ndc_z[i] = ndc.z;
            screen[i] = ndc_to_screen(ndc.x, ndc.y, width, height);
        }

        // Screen Y points down, so counter-clockwise (front-facing) triangles
        // have a negative signed area here.
        let e1 = screen[1] - screen[0];
        let e2 = screen[2] - screen[1];
        let signed_area = e1.x * e2.y - e1.y * e2.x;
        match self.cull_mode {
            CullMode::Back if signed_area >= 0.0 => return,
            CullMode::Front if signed_area <= 0.0 => return,
            _ => {}
        }

        let min_x = screen.iter().map(|p| p.x).fold(f32::INFINITY, f32::min).floor() as i64;
        let min_y = screen.iter().map(|p| p.y).fold(f32::INFINITY, f32::min).floor() as i64;
        let max_x = screen.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
        let max_y = screen.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

        let buffer_w = framebuffer.buffer_width as i64;
        let buffer_h = framebuffer.buffer_height as i64;
        if max_x < 0 || max_y < 0 || min_x >= buffer_w || min_y >= buffer_h {
            return;
        }

        let start_x = min_x.max(0) as usize;
        let end_x = max_x.min(buffer_w - 1) as usize;
        let start_y = min_y.max(0) as usize;
        let end_y = max_y.min(buffer_h - 1) as usize;
        let wireframe = self.wireframe;

        framebuffer.rows_mut(start_y, end_y).for_each(|mut row| {
            for x in start_x..=end_x {
                let pixel_center = Point2::new(x as f32 + 0.5, row.y as f32 + 0.5);
                let Some(bary) = barycentric_coordinates(pixel_center, screen[0], screen[1], screen[2])
                else {
                    continue;
                };
                if !is_inside_triangle(bary) {
                    continue;
                }
                if wireframe && bary.x > 0.02 && bary.y > 0.02 && bary.z > 0.02 {
                    continue;
                }

                // NDC depth is affine in screen space, so it uses the raw weights.
                let z_ndc = bary.x * ndc_z[0] + bary.y * ndc_z[1] + bary.z * ndc_z[2];
                let depth = z_ndc * 0.5 + 0.5;

                if row.depth_test_and_update(x, depth) {
                    let Some(corrected) = perspective_correct_barycentric(bary, w_values) else {
                        continue;
                    };
                    let varying = varyings[0] * corrected.x
                        + varyings[1] * corrected.y
                        + varyings[2] * corrected.z;
                    row.set_pixel(x, shader.fragment(varying, material));
                }
            }
        });
    }
}

/// Clips `input` against one plane, writing the result into `output`.
fn clip_polygon_against_plane<V: Interpolatable>(
    input: &[ClipVertex<V>],
    output: &mut Vec<ClipVertex<V>>,
    axis: usize,
    sign: f32,
) {
    output.clear();
    let Some(&last) = input.last() else {
        return;
    };

    let is_inside = |p: &Vector4<f32>| sign * p[axis] <= p.w + 1e-6;
    let mut prev = last;
    let mut prev_inside = is_inside(&prev.0);

    for &curr in input {
        let curr_inside = is_inside(&curr.0);
        if curr_inside != prev_inside {
            if let Some(hit) = intersect_edge_plane(prev, curr, axis, sign) {
                output.push(hit);
            }
        }
        if curr_inside {
            output.push(curr);
        }
        prev = curr;
        prev_inside = curr_inside;
    }
}

/// Point where segment `a -> b` crosses `sign * p[axis] = p.w`.
#[inline(always)]
fn intersect_edge_plane<V: Interpolatable>(
    a: ClipVertex<V>,
    b: ClipVertex<V>,
    axis: usize,
    sign: f32,
) -> Option<ClipVertex<V>> {
    let da = a.0.w - sign * a.0[axis];
    let db = b.0.w - sign * b.0[axis];
    let denom = da - db;
    if denom.abs() < 1e-9 {
        return None;
    }
    let t = da / denom;
    if !t.is_finite() {
        return None;
    }
    Some((a.0 + (b.0 - a.0) * t, a.1 * (1.0 - t) + b.1 * t))
}
