use crate::error::CaptureError;
use image::DynamicImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Rear camera.
    Environment,
    User,
}

/// What to ask the camera for. The device may deliver another resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraRequest {
    pub width: u32,
    pub height: u32,
    pub facing: Facing,
}

pub trait DeviceCamera {
    fn start(&self, request: &CameraRequest) -> Result<(), CaptureError>;
    fn stop(&self) -> Result<(), CaptureError>;
    /// Latest decoded frame, `None` while the stream is still warming up.
    fn current_frame(&self) -> Result<Option<DynamicImage>, CaptureError>;
}
