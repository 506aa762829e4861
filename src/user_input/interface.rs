use std::path::PathBuf;
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInputEvent {
    StartCamera,
    Capture,
    Upload(PathBuf),
    Quit,
}

pub trait UserInput {
    fn events(&self) -> Receiver<UserInputEvent>;
}
