use crate::classifier_lifecycle::interface::LifecycleStatus;
use std::path::PathBuf;

/// Both the primary and the fallback model failed to load. Terminal for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("model initialization failed (primary: {primary}; fallback: {fallback})")]
pub struct InitializationError {
    pub primary: String,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureError {
    #[error("camera has not been started")]
    NotStarted,

    #[error("camera has no decoded frame yet")]
    NoFrame,

    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device found")]
    NoDevice,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("image data is empty")]
    Empty,

    #[error("could not decode image: {0}")]
    Invalid(String),

    #[error("could not read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("classifier is not ready (status: {0})")]
    NotReady(LifecycleStatus),

    #[error("classifier failed: {0}")]
    Classifier(String),
}

/// Every failure the pipeline reports to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FruitIdentifierError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl FruitIdentifierError {
    pub fn user_message(&self) -> String {
        match self {
            FruitIdentifierError::Initialization(_) => {
                "Error loading model. Please restart the app.".to_string()
            }
            FruitIdentifierError::Capture(CaptureError::PermissionDenied) => {
                "Could not access the camera. Please grant camera permissions.".to_string()
            }
            FruitIdentifierError::Capture(CaptureError::NoDevice) => {
                "No camera found.".to_string()
            }
            FruitIdentifierError::Capture(CaptureError::NotStarted) => {
                "Start the camera before capturing.".to_string()
            }
            FruitIdentifierError::Capture(CaptureError::NoFrame) => {
                "Camera is still warming up. Please try again.".to_string()
            }
            FruitIdentifierError::Decode(_) => {
                "That file is not an image we can read. Try another one.".to_string()
            }
            FruitIdentifierError::Classification(ClassificationError::NotReady(status)) => {
                match status {
                    LifecycleStatus::Failed(_) => {
                        "Error loading model. Please restart the app.".to_string()
                    }
                    _ => "Model not loaded yet. Please wait...".to_string(),
                }
            }
            FruitIdentifierError::Classification(ClassificationError::Classifier(_)) => {
                "Error processing image. Please try again.".to_string()
            }
        }
    }
}
