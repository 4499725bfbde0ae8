use nalgebra::Vector3;

/// Packs a linear [0, 1] colour into a 0RGB `u32` as expected by the window buffer.
/// Components outside the range are clamped, like a fixed-function colour write.
pub fn pack_rgb(color: Vector3<f32>) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0).round() as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0).round() as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0).round() as u32;
    (255 << 24) | (r << 16) | (g << 8) | b
}

/// Splits a packed 0RGB pixel back into its 8-bit channels.
pub fn unpack_rgb(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_and_clamps_channels() {
        let pixel = pack_rgb(Vector3::new(1.5, 0.0, -2.0));
        assert_eq!(unpack_rgb(pixel), [255, 0, 0]);
        assert_eq!(pixel >> 24, 255);
    }

    #[test]
    fn mid_grey_maps_to_102() {
        let pixel = pack_rgb(Vector3::new(0.4, 0.4, 0.4));
        assert_eq!(unpack_rgb(pixel), [102, 102, 102]);
    }
}
