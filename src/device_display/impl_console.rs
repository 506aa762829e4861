use crate::device_display::interface::{DeviceDisplay, Screen, ScreenBody};
use std::error::Error;

const WIDTH: usize = 48;
const BAR_WIDTH: usize = 20;

pub struct DeviceDisplayConsole {
    last_screen: Option<Screen>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self { last_screen: None }
    }

    fn render_lines(screen: &Screen) -> Vec<String> {
        let mut lines = vec![screen.status.clone()];
        if !screen.camera.is_empty() {
            lines.push(screen.camera.clone());
        }
        lines.push(String::new());

        match &screen.body {
            ScreenBody::Empty => {}
            ScreenBody::Message(message) => lines.push(message.clone()),
            ScreenBody::Analyzing => lines.push("Analyzing image...".to_string()),
            ScreenBody::Results(list) => {
                lines.push(list.headline().to_string());
                for item in &list.items {
                    let filled = usize::from(item.magnitude) * BAR_WIDTH / 100;
                    lines.push(format!(
                        "{:<20} {:>6} {}{}",
                        item.title(),
                        item.confidence_text(),
                        "#".repeat(filled),
                        ".".repeat(BAR_WIDTH - filled)
                    ));
                }
            }
        }

        lines
    }

    fn render_display(screen: &Screen) {
        println!("┌{}┐", "─".repeat(WIDTH));
        for line in Self::render_lines(screen) {
            let text: String = line.chars().take(WIDTH).collect();
            let padding = WIDTH - text.chars().count();
            println!("│{}{}│", text, " ".repeat(padding));
        }
        println!("└{}┘", "─".repeat(WIDTH));
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.last_screen = None;
        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.last_screen.as_ref() == Some(screen) {
            return Ok(());
        }
        Self::render_display(screen);
        self.last_screen = Some(screen.clone());
        Ok(())
    }
}
