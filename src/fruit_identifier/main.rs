use crate::classifier_lifecycle::manager::ClassifierLifecycle;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::fruit_identifier::core::{init, transition, Effect, Event, State};
use crate::fruit_identifier::render::Render;
use crate::fruit_identifier::run_effect::RunEffect;
use crate::library::logger::interface::Logger;
use crate::library::state_machine::StateMachine;
use crate::user_input::interface::UserInput;
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct FruitIdentifier {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    run_effect: RunEffect,
}

impl FruitIdentifier {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        classifier_lifecycle: Arc<ClassifierLifecycle>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        user_input: Arc<dyn UserInput + Send + Sync>,
    ) -> Self {
        let run_effect = RunEffect::new(
            config.clone(),
            logger.clone(),
            classifier_lifecycle,
            device_camera,
            user_input,
        );

        Self {
            config,
            logger: logger.with_namespace("fruit_identifier"),
            device_display,
            run_effect,
        }
    }

    /// Runs until the user quits and returns the final state.
    pub fn run(&self) -> Result<State, Box<dyn std::error::Error + Send + Sync>> {
        self.device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .init()?;

        let config = self.config.clone();
        let transition_logger = self.logger.clone();
        let render_logger = self.logger.clone();
        let render = Render::new(self.device_display.clone());
        let run_effect = self.run_effect.clone();

        let state_machine = StateMachine::new(
            init(),
            move |state: State, event: Event| {
                let _ = transition_logger.info(&format!("Event: {:?}", event));
                let (new_state, effects) = transition(&config, state, event);
                if !effects.is_empty() {
                    let _ = transition_logger.info(&format!("Effects: {:?}", effects));
                }
                (new_state, effects)
            },
            move |state: &State| {
                if let Err(error) = render.render(state) {
                    let _ = render_logger.error(&format!("Failed to render: {}", error));
                }
            },
            move |effect: Effect, event_sender: Sender<Event>| {
                run_effect.run_effect(effect, event_sender)
            },
            |state: &State| state.shutting_down,
        );

        let final_state = state_machine.run()?;
        let _ = self.logger.info("Shutting down");
        Ok(final_state)
    }
}
