use crate::device_camera::interface::{CameraRequest, DeviceCamera};
use crate::error::CaptureError;
use crate::library::logger::interface::Logger;
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Produces noisy solid-color frames at the requested resolution.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    started: Mutex<Option<CameraRequest>>,
    warmup_frames: AtomicUsize,
    start_error: Option<CaptureError>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            started: Mutex::new(None),
            warmup_frames: AtomicUsize::new(0),
            start_error: None,
        }
    }

    /// The first `frames` reads after starting return no frame.
    #[allow(dead_code)]
    pub fn with_warmup(self, frames: usize) -> Self {
        self.warmup_frames.store(frames, Ordering::SeqCst);
        self
    }

    pub fn failing_start(mut self, error: CaptureError) -> Self {
        self.start_error = Some(error);
        self
    }

    fn request(&self) -> Option<CameraRequest> {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn noise_frame(request: &CameraRequest) -> DynamicImage {
        let mut rng = rand::rng();
        let base: [u8; 3] = [rng.random(), rng.random(), rng.random()];
        let frame = RgbImage::from_fn(request.width, request.height, |_, _| {
            let jitter: u8 = rng.random_range(0..16);
            Rgb(base.map(|channel| channel.saturating_add(jitter)))
        });
        DynamicImage::ImageRgb8(frame)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self, request: &CameraRequest) -> Result<(), CaptureError> {
        let _ = self.logger.info(&format!(
            "Starting camera {}x{} facing {:?}...",
            request.width, request.height, request.facing
        ));

        if let Some(error) = &self.start_error {
            let _ = self.logger.error(&format!("Camera failed to start: {}", error));
            return Err(error.clone());
        }

        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = Some(*request);
        let _ = self.logger.info("Camera started");
        Ok(())
    }

    fn stop(&self) -> Result<(), CaptureError> {
        let _ = self.logger.info("Stopping camera...");
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn current_frame(&self) -> Result<Option<DynamicImage>, CaptureError> {
        let request = self.request().ok_or(CaptureError::NotStarted)?;

        let warming_up = self
            .warmup_frames
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if warming_up {
            return Ok(None);
        }

        Ok(Some(Self::noise_frame(&request)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_camera::interface::Facing;
    use crate::library::logger::impl_console::LoggerConsole;

    fn camera() -> DeviceCameraFake {
        DeviceCameraFake::new(Arc::new(LoggerConsole::new(
            chrono::FixedOffset::east_opt(0).unwrap(),
        )))
    }

    fn request() -> CameraRequest {
        CameraRequest {
            width: 64,
            height: 48,
            facing: Facing::Environment,
        }
    }

    #[test]
    fn test_frame_requires_start() {
        assert_eq!(camera().current_frame(), Err(CaptureError::NotStarted));
    }

    #[test]
    fn test_frames_after_warmup() {
        let camera = camera().with_warmup(2);
        camera.start(&request()).unwrap();

        assert_eq!(camera.current_frame(), Ok(None));
        assert_eq!(camera.current_frame(), Ok(None));
        let frame = camera.current_frame().unwrap().unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 48));
    }

    #[test]
    fn test_start_failure() {
        let camera = camera().failing_start(CaptureError::PermissionDenied);
        assert_eq!(camera.start(&request()), Err(CaptureError::PermissionDenied));
        assert_eq!(camera.current_frame(), Err(CaptureError::NotStarted));
    }

    #[test]
    fn test_stop() {
        let camera = camera();
        camera.start(&request()).unwrap();
        camera.stop().unwrap();
        assert_eq!(camera.current_frame(), Err(CaptureError::NotStarted));
    }
}
