use crate::config::DisplayConfig;
use image::RgbImage;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),
}

// Where composited frames go, and where the quit key comes from.
pub trait Display {
    fn show(&mut self, frame: &RgbImage) -> Result<(), DisplayError>;
    fn poll_quit(&mut self) -> bool;
    fn close(&mut self);
}

pub struct WindowDisplay {
    cfg: DisplayConfig,
    window: Option<Window>,
    buffer: Vec<u32>,
}

impl WindowDisplay {
    // The window opens on the first frame, once its size is known.
    pub fn new(cfg: DisplayConfig) -> Self {
        Self {
            cfg,
            window: None,
            buffer: Vec::new(),
        }
    }

    fn window_for(&mut self, width: usize, height: usize) -> Result<&mut Window, DisplayError> {
        let window = match self.window.take() {
            Some(window) if window.get_size() == (width, height) => window,
            _ => {
                let mut window =
                    Window::new(&self.cfg.window_title, width, height, WindowOptions::default())?;
                let fps = 1000 / self.cfg.poll_interval_ms.max(1);
                window.set_target_fps(fps as usize);
                tracing::debug!(width, height, fps, "display window opened");
                window
            }
        };
        Ok(self.window.insert(window))
    }
}

// Packs RGB pixels into the 0RGB layout the window expects.
fn pack_rgb(frame: &RgbImage, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(
        frame
            .as_raw()
            .chunks_exact(3)
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | (p[2] as u32)),
    );
}

impl Display for WindowDisplay {
    fn show(&mut self, frame: &RgbImage) -> Result<(), DisplayError> {
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        pack_rgb(frame, &mut self.buffer);
        let buffer = std::mem::take(&mut self.buffer);

        let result = self.window_for(width, height).and_then(|window| {
            window
                .update_with_buffer(&buffer, width, height)
                .map_err(DisplayError::from)
        });
        self.buffer = buffer;
        result
    }

    fn poll_quit(&mut self) -> bool {
        match &self.window {
            Some(window) => !window.is_open() || window.is_key_pressed(Key::Q, KeyRepeat::No),
            None => false,
        }
    }

    fn close(&mut self) {
        if self.window.take().is_some() {
            tracing::debug!("display window closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn packs_pixels_as_zero_rgb() {
        let mut frame = RgbImage::new(2, 1);
        frame.put_pixel(0, 0, Rgb([0x12, 0x34, 0x56]));
        frame.put_pixel(1, 0, Rgb([0xFF, 0x00, 0x01]));

        let mut buffer = vec![7; 10];
        pack_rgb(&frame, &mut buffer);
        assert_eq!(buffer, vec![0x0012_3456, 0x00FF_0001]);
    }
}
