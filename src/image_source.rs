use crate::device_camera::interface::DeviceCamera;
use crate::error::{CaptureError, DecodeError};
use image::{imageops, DynamicImage};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Camera,
    File,
}

/// One image ready for classification, from either the camera or a file.
#[derive(Clone, PartialEq)]
pub struct ImageArtifact {
    image: DynamicImage,
    origin: ImageOrigin,
}

impl ImageArtifact {
    pub fn new(image: DynamicImage, origin: ImageOrigin) -> Self {
        Self { image, origin }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn origin(&self) -> ImageOrigin {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

// Pixel data stays out of logs.
impl fmt::Debug for ImageArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("origin", &self.origin)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Draws the camera's current frame into a `width` x `height` raster.
pub fn capture_from_live_video(
    camera: &dyn DeviceCamera,
    width: u32,
    height: u32,
) -> Result<ImageArtifact, CaptureError> {
    let frame = camera.current_frame()?.ok_or(CaptureError::NoFrame)?;
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CaptureError::NoFrame);
    }

    let raster = if (frame.width(), frame.height()) == (width, height) {
        frame
    } else {
        frame.resize_exact(width, height, imageops::FilterType::Triangle)
    };

    Ok(ImageArtifact::new(raster, ImageOrigin::Camera))
}

pub fn capture_from_file(bytes: &[u8]) -> Result<ImageArtifact, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image =
        image::load_from_memory(bytes).map_err(|error| DecodeError::Invalid(error.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Invalid("image has no pixels".to_string()));
    }

    Ok(ImageArtifact::new(image, ImageOrigin::File))
}

pub fn read_file(path: &Path) -> Result<Vec<u8>, DecodeError> {
    std::fs::read(path).map_err(|error| DecodeError::Unreadable {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}
