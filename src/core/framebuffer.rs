use nalgebra::Vector3;
use rayon::prelude::*;

/// Colour and depth storage for one frame.
///
/// The internal buffers are `sample_count` times larger than the output in each
/// direction (ordered-grid supersampling); `get_pixel` resolves them.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    color_buffer: Vec<Vector3<f32>>,
    depth_buffer: Vec<f32>,
}

/// One row of the framebuffer handed to a rasterizer worker.
pub struct FrameRow<'a> {
    pub y: usize,
    pub color: &'a mut [Vector3<f32>],
    pub depth: &'a mut [f32],
}

impl FrameRow<'_> {
    /// Depth test with update. Returns true when `depth` is closer than the
    /// stored value, in which case the stored value is replaced.
    #[inline]
    pub fn depth_test_and_update(&mut self, x: usize, depth: f32) -> bool {
        match self.depth.get_mut(x) {
            Some(stored) if depth < *stored => {
                *stored = depth;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, color: Vector3<f32>) {
        if let Some(slot) = self.color.get_mut(x) {
            *slot = color;
        }
    }
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color_buffer: vec![Vector3::zeros(); size],
            depth_buffer: vec![f32::INFINITY; size],
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.buffer_width && y < self.buffer_height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.buffer_width + x
    }

    /// Fills every sample with `color` and resets depth.
    pub fn clear(&mut self, color: Vector3<f32>, depth: f32) {
        self.color_buffer.par_iter_mut().for_each(|c| *c = color);
        self.depth_buffer.par_iter_mut().for_each(|d| *d = depth);
    }

    /// Parallel iterator over the sample rows `start_y..=end_y`.
    /// Rows are disjoint, so workers never contend for the same pixel.
    pub fn rows_mut(
        &mut self,
        start_y: usize,
        end_y: usize,
    ) -> impl IndexedParallelIterator<Item = FrameRow<'_>> {
        let w = self.buffer_width;
        let end_y = end_y.min(self.buffer_height.saturating_sub(1));
        let range = if start_y <= end_y && w > 0 {
            start_y * w..(end_y + 1) * w
        } else {
            0..0
        };

        self.color_buffer[range.clone()]
            .par_chunks_mut(w.max(1))
            .zip(self.depth_buffer[range].par_chunks_mut(w.max(1)))
            .enumerate()
            .map(move |(i, (color, depth))| FrameRow {
                y: start_y + i,
                color,
                depth,
            })
    }

    /// Stored depth of a single sample, mostly useful for inspection.
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.depth_buffer[self.index(x, y)])
    }

    /// Resolved colour of output pixel `(x, y)` (box filter over its samples).
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        if self.sample_count == 1 {
            return Some(self.color_buffer[self.index(x, y)]);
        }

        let mut sum_color = Vector3::zeros();
        let start_x = x * self.sample_count;
        let start_y = y * self.sample_count;

        for dy in 0..self.sample_count {
            for dx in 0..self.sample_count {
                sum_color += self.color_buffer[self.index(start_x + dx, start_y + dy)];
            }
        }

        let samples = (self.sample_count * self.sample_count) as f32;
        Some(sum_color / samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut fb = FrameBuffer::new(4, 3, 2);
        fb.clear(Vector3::new(0.4, 0.4, 0.4), f32::INFINITY);
        assert_eq!(fb.get_pixel(3, 2), Some(Vector3::new(0.4, 0.4, 0.4)));
        assert_eq!(fb.depth_at(7, 5), Some(f32::INFINITY));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn rows_cover_requested_range_only() {
        let mut fb = FrameBuffer::new(5, 5, 1);
        let ys: Vec<usize> = fb.rows_mut(1, 3).map(|row| row.y).collect();
        assert_eq!(ys, vec![1, 2, 3]);
    }

    #[test]
    fn depth_test_keeps_nearest_sample() {
        let mut fb = FrameBuffer::new(2, 2, 1);
        fb.rows_mut(0, 0).for_each(|mut row| {
            assert!(row.depth_test_and_update(1, 0.5));
            assert!(!row.depth_test_and_update(1, 0.7));
            assert!(row.depth_test_and_update(1, 0.2));
            row.set_pixel(1, Vector3::new(1.0, 0.0, 0.0));
        });
        assert_eq!(fb.depth_at(1, 0), Some(0.2));
        assert_eq!(fb.get_pixel(1, 0), Some(Vector3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn supersampled_pixel_is_averaged() {
        let mut fb = FrameBuffer::new(1, 1, 2);
        fb.clear(Vector3::zeros(), f32::INFINITY);
        fb.rows_mut(0, 0).for_each(|mut row| {
            row.set_pixel(0, Vector3::new(1.0, 1.0, 1.0));
        });
        assert_eq!(fb.get_pixel(0, 0), Some(Vector3::new(0.25, 0.25, 0.25)));
    }
}
