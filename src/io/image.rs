use crate::core::color::unpack_rgb;
use crate::error::{Result, SceneError};
use image::{ImageBuffer, Rgb};
use std::path::Path;

/// Converts a packed 0RGB buffer into an RGB image.
pub fn buffer_to_image(buffer: &[u32], width: usize, height: usize) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(width as u32, height as u32, |x, y| {
        let idx = (y as usize) * width + (x as usize);
        Rgb(buffer.get(idx).map_or([0, 0, 0], |&c| unpack_rgb(c)))
    })
}

/// Saves a u32 (0RGB) buffer to a PNG file.
pub fn save_buffer_to_image<P: AsRef<Path>>(
    buffer: &[u32],
    width: usize,
    height: usize,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    buffer_to_image(buffer, width, height)
        .save(path)
        .map_err(|source| SceneError::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_unpack_in_rgb_order() {
        let buffer = [0xFF_10_20_30, 0xFF_FF_00_00];
        let img = buffer_to_image(&buffer, 2, 1);
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x10, 0x20, 0x30]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0xFF, 0, 0]));
    }
}
