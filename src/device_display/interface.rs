use crate::presentation::DisplayList;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenBody {
    Empty,
    Message(String),
    Analyzing,
    Results(DisplayList),
}

/// Everything the host shows at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub status: String,
    pub camera: String,
    pub body: ScreenBody,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            status: String::new(),
            camera: String::new(),
            body: ScreenBody::Empty,
        }
    }
}

pub trait DeviceDisplay: Send + Sync {
    /// Prepare the output device.
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace whatever is shown with `screen`.
    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>>;
}
