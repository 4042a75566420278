use crate::color::HsvProfile;
use crate::frame::to_hsv;
use image::{GrayImage, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{dilate_mut, erode_mut};

pub const FOREGROUND: u8 = 255;
pub const BACKGROUND: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
// Square structuring element of side 2 * kernel_radius + 1.
pub struct MorphologyConfig {
    pub kernel_radius: u8,
    pub open_iterations: u32,
    pub dilate_iterations: u32,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            kernel_radius: 1,
            open_iterations: 2,
            dilate_iterations: 1,
        }
    }
}

// Marks every pixel that any range of the profile contains.
pub fn threshold(frame: &RgbImage, profile: &HsvProfile) -> GrayImage {
    let hsv = to_hsv(frame);
    let mut mask = GrayImage::new(frame.width(), frame.height());
    for (dst, px) in mask.iter_mut().zip(hsv.as_raw().chunks_exact(3)) {
        *dst = if profile.contains(px[0], px[1], px[2]) {
            FOREGROUND
        } else {
            BACKGROUND
        };
    }
    mask
}

// Threshold, then open to drop speckles and dilate to close small gaps.
pub fn build_mask(frame: &RgbImage, profile: &HsvProfile, morph: &MorphologyConfig) -> GrayImage {
    let mut mask = threshold(frame, profile);
    let k = morph.kernel_radius;

    for _ in 0..morph.open_iterations {
        erode_mut(&mut mask, Norm::LInf, k);
    }
    for _ in 0..morph.open_iterations {
        dilate_mut(&mut mask, Norm::LInf, k);
    }
    for _ in 0..morph.dilate_iterations {
        dilate_mut(&mut mask, Norm::LInf, k);
    }

    mask
}
