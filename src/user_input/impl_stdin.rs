use crate::library::logger::interface::Logger;
use crate::user_input::interface::{UserInput, UserInputEvent};
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;

pub const HELP: &str = "Commands: camera | capture | upload <path> | quit";

/// Reads one command per line from standard input.
pub struct UserInputStdin {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl UserInputStdin {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("user_input").with_namespace("stdin"),
        }
    }
}

pub fn parse_command(line: &str) -> Option<UserInputEvent> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match (command.to_lowercase().as_str(), argument) {
        ("camera", "") | ("start", "") => Some(UserInputEvent::StartCamera),
        ("capture", "") | ("c", "") => Some(UserInputEvent::Capture),
        ("upload", path) | ("u", path) if !path.is_empty() => {
            Some(UserInputEvent::Upload(PathBuf::from(path)))
        }
        ("quit", "") | ("exit", "") | ("q", "") => Some(UserInputEvent::Quit),
        _ => None,
    }
}

impl UserInput for UserInputStdin {
    fn events(&self) -> Receiver<UserInputEvent> {
        let (tx, rx) = channel();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let _ = logger.info(HELP);
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(error) => {
                        let _ = logger.error(&format!("Could not read input: {}", error));
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    None => {
                        let _ = logger.warn(&format!("Unknown command {:?}. {}", line.trim(), HELP));
                    }
                }
            }
            // End of input means the user is done.
            let _ = tx.send(UserInputEvent::Quit);
        });

        rx
    }
}
