use crate::frame::{ensure_same_dimensions, FrameError};
use crate::mask::BACKGROUND;
use image::{GrayImage, RgbImage};

// Masked pixels come from the background, all others from the frame.
pub fn apply_cloak(
    frame: &RgbImage,
    mask: &GrayImage,
    background: &RgbImage,
) -> Result<RgbImage, FrameError> {
    ensure_same_dimensions(frame.dimensions(), mask.dimensions())?;
    ensure_same_dimensions(frame.dimensions(), background.dimensions())?;

    let mut output = RgbImage::new(frame.width(), frame.height());
    let pixels = output
        .chunks_exact_mut(3)
        .zip(frame.as_raw().chunks_exact(3))
        .zip(background.as_raw().chunks_exact(3))
        .zip(mask.iter());

    for (((dst, fg), bg), &m) in pixels {
        // Disjoint halves: one side is always zero, so the add never saturates.
        let keep_frame = if m == BACKGROUND { 0xFF } else { 0x00 };
        let keep_background = !keep_frame;
        for c in 0..3 {
            dst[c] = (fg[c] & keep_frame).saturating_add(bg[c] & keep_background);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::FOREGROUND;
    use image::{Luma, Rgb};

    fn gradient(width: u32, height: u32, seed: u8) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = (x * 17 + y * 31) as u8;
            Rgb([v.wrapping_add(seed), v ^ seed, 255 - v])
        })
    }

    #[test]
    fn empty_mask_returns_the_frame() {
        let frame = gradient(8, 6, 3);
        let background = gradient(8, 6, 90);
        let mask = GrayImage::new(8, 6);
        assert_eq!(apply_cloak(&frame, &mask, &background).unwrap(), frame);
    }

    #[test]
    fn full_mask_returns_the_background() {
        let frame = gradient(8, 6, 3);
        let background = gradient(8, 6, 90);
        let mask = GrayImage::from_pixel(8, 6, Luma([FOREGROUND]));
        assert_eq!(apply_cloak(&frame, &mask, &background).unwrap(), background);
    }

    #[test]
    fn mixed_mask_selects_per_pixel() {
        let frame = RgbImage::from_pixel(5, 5, Rgb([200, 200, 200]));
        let background = RgbImage::from_pixel(5, 5, Rgb([100, 150, 250]));
        let mask = GrayImage::from_fn(5, 5, |x, y| {
            Luma([if (x + y) % 2 == 0 { FOREGROUND } else { BACKGROUND }])
        });

        let output = apply_cloak(&frame, &mask, &background).unwrap();
        for (x, y, pixel) in output.enumerate_pixels() {
            let expected = if (x + y) % 2 == 0 {
                background.get_pixel(x, y)
            } else {
                frame.get_pixel(x, y)
            };
            assert_eq!(pixel, expected, "({x}, {y})");
        }
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let frame = RgbImage::new(4, 4);
        let background = RgbImage::new(4, 4);
        let mask = GrayImage::new(3, 4);
        assert!(matches!(
            apply_cloak(&frame, &mask, &background),
            Err(FrameError::DimensionMismatch { .. })
        ));
    }
}
