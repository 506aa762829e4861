use crate::user_input::interface::{UserInput, UserInputEvent};
use std::sync::mpsc::{channel, Receiver};

/// Replays a fixed list of events.
pub struct UserInputFake {
    script: Vec<UserInputEvent>,
}

impl UserInputFake {
    #[allow(dead_code)]
    pub fn new(script: Vec<UserInputEvent>) -> Self {
        Self { script }
    }
}

impl UserInput for UserInputFake {
    fn events(&self) -> Receiver<UserInputEvent> {
        let (tx, rx) = channel();
        for event in &self.script {
            if tx.send(event.clone()).is_err() {
                break;
            }
        }
        rx
    }
}
