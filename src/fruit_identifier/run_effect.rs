use crate::classifier_lifecycle::manager::ClassifierLifecycle;
use crate::config::Config;
use crate::device_camera::interface::{CameraRequest, DeviceCamera};
use crate::fruit_identifier::core::{Effect, Event};
use crate::image_source::{capture_from_file, capture_from_live_video, read_file};
use crate::library::logger::interface::Logger;
use crate::user_input::interface::UserInput;
use std::sync::mpsc::Sender;
use std::sync::Arc;

#[derive(Clone)]
pub struct RunEffect {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    classifier_lifecycle: Arc<ClassifierLifecycle>,
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    user_input: Arc<dyn UserInput + Send + Sync>,
}

impl RunEffect {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        classifier_lifecycle: Arc<ClassifierLifecycle>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        user_input: Arc<dyn UserInput + Send + Sync>,
    ) -> Self {
        Self {
            config,
            logger: logger.with_namespace("effect"),
            classifier_lifecycle,
            device_camera,
            user_input,
        }
    }

    pub fn run_effect(&self, effect: Effect, event_sender: Sender<Event>) {
        let _ = self.logger.info(&format!("Running effect: {:?}", effect));

        match effect {
            Effect::InitializeClassifier => {
                let status = self.classifier_lifecycle.initialize(
                    &self.config.primary_model,
                    &self.config.fallback_model,
                    self.config.run_self_test,
                );
                let self_test_warning = self
                    .classifier_lifecycle
                    .self_test_warning()
                    .map(str::to_string);
                let _ = event_sender.send(Event::ClassifierInitDone {
                    status,
                    self_test_warning,
                });
            }
            Effect::SubscribeToUserInput => {
                let events = self.user_input.events();
                while let Ok(event) = events.recv() {
                    if event_sender.send(Event::UserInput(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::StartCamera => {
                let request = CameraRequest {
                    width: self.config.capture_width,
                    height: self.config.capture_height,
                    facing: self.config.camera_facing,
                };
                let started = self.device_camera.start(&request);
                let _ = event_sender.send(Event::CameraStartDone(started));
            }
            Effect::StopCamera => {
                if let Err(error) = self.device_camera.stop() {
                    let _ = self.logger.error(&format!("Failed to stop camera: {}", error));
                }
            }
            Effect::CaptureFrame { request_id } => {
                let result = capture_from_live_video(
                    self.device_camera.as_ref(),
                    self.config.capture_width,
                    self.config.capture_height,
                )
                .map_err(Into::into);
                let _ = event_sender.send(Event::ImageStaged { request_id, result });
            }
            Effect::ReadFile { request_id, path } => {
                let result = read_file(&path)
                    .and_then(|bytes| capture_from_file(&bytes))
                    .map_err(Into::into);
                let _ = event_sender.send(Event::ImageStaged { request_id, result });
            }
            Effect::Classify {
                request_id,
                artifact,
            } => {
                let result = self.classifier_lifecycle.classify(&artifact);
                let _ = event_sender.send(Event::ClassifyDone { request_id, result });
            }
        }
    }
}
