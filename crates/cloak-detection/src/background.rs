use crate::frame::{ensure_same_dimensions, FrameError};
use image::RgbImage;
use ndarray::{Array4, ArrayView1, ArrayView3, Axis, ErrorKind, ShapeError};

// Per-pixel, per-channel median across the sampled frames.
pub fn median_background(frames: &[RgbImage]) -> Result<RgbImage, FrameError> {
    let first = frames.first().ok_or(FrameError::NoFrames)?;
    let (width, height) = first.dimensions();
    let shape = (height as usize, width as usize, 3);

    let mut stack: Array4<u8> = Array4::zeros((frames.len(), shape.0, shape.1, shape.2));
    for (i, frame) in frames.iter().enumerate() {
        ensure_same_dimensions((width, height), frame.dimensions())?;
        let view = ArrayView3::from_shape(shape, frame.as_raw().as_slice())?;
        stack.index_axis_mut(Axis(0), i).assign(&view);
    }

    let median = stack.map_axis(Axis(0), median_of);
    let data: Vec<u8> = median.iter().copied().collect();

    RgbImage::from_raw(width, height, data)
        .ok_or_else(|| ShapeError::from_kind(ErrorKind::IncompatibleShape).into())
}

// Mean of the two middle samples for even counts, truncated.
fn median_of(samples: ArrayView1<u8>) -> u8 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        ((sorted[mid - 1] as u16 + sorted[mid] as u16) / 2) as u8
    }
}
