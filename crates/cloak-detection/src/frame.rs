use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Frame dimensions don't match: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("No frames were captured, background is unavailable")]
    NoFrames,

    #[error("Could not stack frames: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

// Fails unless both images have the same width and height.
pub fn ensure_same_dimensions(
    expected: (u32, u32),
    actual: (u32, u32),
) -> Result<(), FrameError> {
    if expected != actual {
        return Err(FrameError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

// Converts an RGB frame into HSV with H in 0..=180 and S, V in 0..=255.
pub fn to_hsv(frame: &RgbImage) -> RgbImage {
    let mut hsv = RgbImage::new(frame.width(), frame.height());
    for (dst, src) in hsv.pixels_mut().zip(frame.pixels()) {
        let (h, s, v) = rgb_to_hsv(src[0], src[1], src[2]);
        *dst = image::Rgb([h, s, v]);
    }
    hsv
}

// Converts an RGB triple to 8-bit HSV, hue being half the angle in degrees.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * (((b - r) / delta) + 2.0)
    } else {
        60.0 * (((r - g) / delta) + 4.0)
    };

    let h = if h < 0.0 { h + 360.0 } else { h };
    let h_byte = (h / 2.0).round() as u8;

    let s = if max == 0.0 { 0.0 } else { delta / max };
    let s_byte = (s * 255.0).round() as u8;
    let v_byte = (max * 255.0).round() as u8;

    (h_byte, s_byte, v_byte)
}
