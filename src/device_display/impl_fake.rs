use crate::device_display::interface::{DeviceDisplay, Screen};
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps every screen it is asked to show.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    screens: Arc<Mutex<Vec<Screen>>>,
}

impl DeviceDisplayFake {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn screens(&self) -> Vec<Screen> {
        self.screens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[allow(dead_code)]
    pub fn last_screen(&self) -> Option<Screen> {
        self.screens().last().cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen.clone());
        Ok(())
    }
}
