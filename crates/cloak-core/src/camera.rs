use crate::config::CameraConfig;
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Could not open camera {device_id}: {reason}")]
    Open { device_id: u32, reason: String },

    #[error("Could not read frame: {0}")]
    Read(String),

    #[error("Camera error: {0}")]
    Nokhwa(#[from] nokhwa::NokhwaError),
}

// A device that yields RGB frames until released.
pub trait FrameSource {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError>;
    fn release(&mut self);
}

pub struct NokhwaCamera {
    camera: Camera,
    streaming: bool,
}

impl NokhwaCamera {
    pub fn open(cfg: &CameraConfig) -> Result<Self, CaptureError> {
        let camera = get_camera(cfg).map_err(|e| CaptureError::Open {
            device_id: cfg.device_id,
            reason: e.to_string(),
        })?;
        Ok(Self {
            camera,
            streaming: true,
        })
    }
}

fn get_camera(cfg: &CameraConfig) -> Result<Camera, nokhwa::NokhwaError> {
    let index = CameraIndex::Index(cfg.device_id);
    let format_type = RequestedFormatType::AbsoluteHighestFrameRate;
    let requested = RequestedFormat::new::<RgbFormat>(format_type);

    let mut camera = Camera::new(index, requested)?;
    if let Err(e) = camera.set_resolution(Resolution::new(cfg.width, cfg.height)) {
        tracing::warn!(width = cfg.width, height = cfg.height, error = %e, "camera resolution rejected");
    }
    if let Err(e) = camera.set_frame_rate(cfg.fps) {
        tracing::warn!(fps = cfg.fps, error = %e, "camera frame rate rejected");
    }
    camera.open_stream()?;

    tracing::info!(device_id = cfg.device_id, name = %camera.info().human_name(), "camera opened");
    Ok(camera)
}

impl FrameSource for NokhwaCamera {
    fn read_frame(&mut self) -> Result<RgbImage, CaptureError> {
        if !self.streaming {
            return Err(CaptureError::Read("camera already released".to_string()));
        }
        let frame = self.camera.frame()?;
        let decoded = frame.decode_image::<RgbFormat>()?;
        Ok(decoded)
    }

    fn release(&mut self) {
        if !self.streaming {
            return;
        }
        if let Err(e) = self.camera.stop_stream() {
            tracing::warn!(error = %e, "failed to stop camera stream");
        }
        self.streaming = false;
        tracing::info!("camera released");
    }
}

impl Drop for NokhwaCamera {
    fn drop(&mut self) {
        self.release();
    }
}
