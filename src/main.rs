use classifier_lifecycle::manager::ClassifierLifecycle;
use config::{ClassifierKind, Config, DisplayBackend};
use device_camera::impl_fake::DeviceCameraFake;
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_display::interface::DeviceDisplay;
use error::CaptureError;
use fruit_identifier::main::FruitIdentifier;
use image_classifier::impl_fake::{ClassifierLoaderFake, FakePredictions, ImageClassifierFake};
use image_classifier::impl_tract_onnx::ClassifierLoaderTractOnnx;
use image_classifier::interface::ClassifierLoader;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use std::sync::{Arc, Mutex};
use user_input::impl_stdin::UserInputStdin;

mod classifier_lifecycle;
mod config;
mod device_camera;
mod device_display;
mod error;
mod fruit_identifier;
mod image_classifier;
mod image_source;
mod library;
mod prediction_filter;
mod presentation;
mod user_input;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));

    let loader: Arc<dyn ClassifierLoader + Send + Sync> = match config.classifier_kind {
        ClassifierKind::TractOnnx => Arc::new(ClassifierLoaderTractOnnx::new(logger.clone())),
        ClassifierKind::Fake => Arc::new(ClassifierLoaderFake::new(ImageClassifierFake::new(
            logger.clone(),
            FakePredictions::Random,
        ))),
    };

    let classifier_lifecycle = Arc::new(ClassifierLifecycle::new(loader, logger.clone()));

    let mut device_camera = DeviceCameraFake::new(logger.clone());
    if !config.camera_available {
        device_camera = device_camera.failing_start(CaptureError::NoDevice);
    }
    let device_camera = Arc::new(device_camera);

    let device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>> = match config.display_backend
    {
        DisplayBackend::Console => Arc::new(Mutex::new(DeviceDisplayConsole::new())),
        DisplayBackend::Gui => Arc::new(Mutex::new(DeviceDisplayGui::new())),
    };

    let user_input = Arc::new(UserInputStdin::new(logger.clone()));

    let fruit_identifier = FruitIdentifier::new(
        config,
        logger,
        classifier_lifecycle,
        device_camera,
        device_display,
        user_input,
    );

    fruit_identifier.run()?;

    Ok(())
}
