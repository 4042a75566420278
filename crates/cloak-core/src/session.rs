use crate::camera::{CaptureError, FrameSource};
use crate::config::Config;
use crate::display::Display;
use cloak_detection::{apply_cloak, build_mask, median_background};
use cloak_detection::{FrameError, HsvProfile, MorphologyConfig};
use image::RgbImage;
use std::io;
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Init,
    CapturingBackground,
    SteadyState,
    Terminated,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not open camera")]
    DeviceOpen(#[source] CaptureError),

    #[error("No cloak color was chosen")]
    NoColor(#[source] io::Error),

    #[error("Could not capture any frames for background")]
    NoBackground(#[source] FrameError),
}

#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub background_frames: usize,
    pub sample_interval: Duration,
    pub retry_delay: Duration,
    pub morphology: MorphologyConfig,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            background_frames: config.background.frame_count,
            sample_interval: config.sample_interval(),
            retry_delay: config.retry_delay(),
            morphology: config.mask.morphology(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub background_frames: usize,
    pub frames_shown: u64,
    pub read_failures: u64,
    pub skipped_frames: u64,
}

#[derive(PartialEq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<S: FrameSource, D: Display> {
    source: S,
    display: D,
    profile: HsvProfile,
    settings: SessionSettings,
    phase: Phase,
    report: SessionReport,
}

// Opens the device, asks for a color, then drives the session until the user quits.
pub fn run_session<S, D, O, C>(
    open: O,
    choose: C,
    display: D,
    settings: SessionSettings,
) -> Result<SessionReport, SessionError>
where
    S: FrameSource,
    D: Display,
    O: FnOnce() -> Result<S, CaptureError>,
    C: FnOnce() -> io::Result<HsvProfile>,
{
    tracing::debug!(phase = ?Phase::Init, "session starting");
    let mut source = open().map_err(|e| {
        tracing::error!(error = %e, "Could not open camera.");
        SessionError::DeviceOpen(e)
    })?;

    let profile = match choose() {
        Ok(profile) => profile,
        Err(e) => {
            source.release();
            return Err(SessionError::NoColor(e));
        }
    };
    Session::new(source, display, profile, settings).run()
}

impl<S: FrameSource, D: Display> Session<S, D> {
    pub fn new(source: S, display: D, profile: HsvProfile, settings: SessionSettings) -> Self {
        Self {
            source,
            display,
            profile,
            settings,
            phase: Phase::Init,
            report: SessionReport::default(),
        }
    }

    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        self.enter(Phase::CapturingBackground);
        let background = match self.capture_background() {
            Ok(background) => background,
            Err(e) => {
                tracing::error!(error = %e, "background capture failed");
                self.terminate();
                return Err(SessionError::NoBackground(e));
            }
        };

        self.enter(Phase::SteadyState);
        tracing::info!("Starting main loop. Press 'q' to quit.");
        while self.step(&background) == Flow::Continue {}

        self.terminate();
        Ok(self.report)
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    fn capture_background(&mut self) -> Result<RgbImage, FrameError> {
        tracing::info!("Capturing background. Please move out of frame.");
        let total = self.settings.background_frames;
        let mut frames = Vec::with_capacity(total);

        for i in 0..total {
            match self.source.read_frame() {
                Ok(frame) => frames.push(frame),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read frame {}/{}", i + 1, total)
                }
            }
            thread::sleep(self.settings.sample_interval);
        }

        self.report.background_frames = frames.len();
        let background = median_background(&frames)?;
        tracing::info!(
            sampled = frames.len(),
            requested = total,
            width = background.width(),
            height = background.height(),
            "background captured"
        );
        Ok(background)
    }

    fn step(&mut self, background: &RgbImage) -> Flow {
        let frame = match self.source.read_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read frame.");
                self.report.read_failures += 1;
                thread::sleep(self.settings.retry_delay);
                return Flow::Continue;
            }
        };

        let mask = build_mask(&frame, &self.profile, &self.settings.morphology);
        match apply_cloak(&frame, &mask, background) {
            Ok(output) => match self.display.show(&output) {
                Ok(()) => self.report.frames_shown += 1,
                Err(e) => tracing::warn!(error = %e, "could not display frame"),
            },
            Err(e) => {
                tracing::warn!(error = %e, "skipping frame");
                self.report.skipped_frames += 1;
            }
        }

        if self.display.poll_quit() {
            tracing::info!(frames = self.report.frames_shown, "quit requested");
            Flow::Quit
        } else {
            Flow::Continue
        }
    }

    fn terminate(&mut self) {
        self.source.release();
        self.display.close();
        self.enter(Phase::Terminated);
    }
}
