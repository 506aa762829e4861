use crate::device_display::interface::{DeviceDisplay, Screen, ScreenBody};
use crate::fruit_identifier::core::{CameraState, State, View};
use crate::presentation::status_text;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, state: &State) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut device_display = self
            .device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        device_display.show(&screen(state))
    }
}

pub fn screen(state: &State) -> Screen {
    let camera = match &state.camera {
        CameraState::Off => "Camera off".to_string(),
        CameraState::Starting => "Starting camera...".to_string(),
        CameraState::Live => "Camera live".to_string(),
        CameraState::Unavailable(error) => format!("Camera unavailable ({})", error),
    };

    let body = match &state.view {
        View::Empty => ScreenBody::Empty,
        View::Message(message) => ScreenBody::Message(message.clone()),
        View::Analyzing => ScreenBody::Analyzing,
        View::Results(list) => ScreenBody::Results(list.clone()),
    };

    let status = match &state.self_test_warning {
        Some(_) if state.classifier.is_available() => {
            format!("{} (self-test failed)", status_text(&state.classifier))
        }
        _ => status_text(&state.classifier).to_string(),
    };

    Screen {
        status,
        camera,
        body,
    }
}
