use crate::device_display::interface::{DeviceDisplay, Screen, ScreenBody};
use crate::presentation::DisplayKind;
use eframe::egui;
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
struct ResultWindow {
    screen: Arc<Mutex<Screen>>,
}

impl eframe::App for ResultWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = self
            .screen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&screen.status).strong());
                ui.separator();
                ui.label(screen.camera.as_str());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(12.0);
            match &screen.body {
                ScreenBody::Empty => {
                    ui.label("Start the camera or upload a photo of a fruit.");
                }
                ScreenBody::Message(message) => {
                    ui.label(message.as_str());
                }
                ScreenBody::Analyzing => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Analyzing image...");
                    });
                }
                ScreenBody::Results(list) => {
                    let heading_color = match list.kind {
                        DisplayKind::Fruit => egui::Color32::from_rgb(40, 140, 60),
                        DisplayKind::NoFruit => egui::Color32::from_rgb(180, 120, 20),
                    };
                    ui.label(
                        egui::RichText::new(list.headline())
                            .color(heading_color)
                            .size(18.0),
                    );
                    ui.add_space(8.0);

                    for item in &list.items {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(item.title()).size(16.0));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(egui::RichText::new(item.confidence_text()).monospace());
                            });
                        });
                        ui.add(
                            egui::ProgressBar::new(f32::from(item.magnitude) / 100.0)
                                .desired_width(ui.available_width()),
                        );
                        ui.add_space(6.0);
                    }
                }
            }
        });

        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

pub struct DeviceDisplayGui {
    screen: Arc<Mutex<Screen>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen::default())),
        }
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn init(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let window = ResultWindow {
            screen: self.screen.clone(),
        };

        thread::spawn(move || {
            let options = eframe::NativeOptions {
                viewport: egui::ViewportBuilder::default()
                    .with_inner_size([420.0, 320.0])
                    .with_resizable(true),
                ..Default::default()
            };

            let _ = eframe::run_native(
                "Fruit Identifier",
                options,
                Box::new(|_cc| Box::new(window)),
            );
        });

        Ok(())
    }

    fn show(&mut self, screen: &Screen) -> Result<(), Box<dyn Error + Send + Sync>> {
        *self.screen.lock().unwrap_or_else(PoisonError::into_inner) = screen.clone();
        Ok(())
    }
}
