use crate::classifier_lifecycle::interface::LifecycleStatus;
use crate::config::Config;
use crate::error::{CaptureError, ClassificationError, FruitIdentifierError};
use crate::image_classifier::interface::Classification;
use crate::image_source::{ImageArtifact, ImageOrigin};
use crate::prediction_filter::rank::rank;
use crate::presentation::{format_ranking, DisplayList};
use crate::user_input::interface::UserInputEvent;
use std::path::PathBuf;

/// Issued once per image request. Only results carrying the latest id are
/// shown.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CameraState {
    #[default]
    Off,
    Starting,
    Live,
    Unavailable(CaptureError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage {
    pub request_id: RequestId,
    pub origin: ImageOrigin,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Empty,
    Message(String),
    Analyzing,
    Results(DisplayList),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub classifier: LifecycleStatus,
    pub self_test_warning: Option<String>,
    pub camera: CameraState,
    pub latest_request: RequestId,
    pub staged: Option<StagedImage>,
    pub view: View,
    pub shutting_down: bool,
}

#[derive(Debug)]
pub enum Event {
    ClassifierInitDone {
        status: LifecycleStatus,
        self_test_warning: Option<String>,
    },
    UserInput(UserInputEvent),
    CameraStartDone(Result<(), CaptureError>),
    ImageStaged {
        request_id: RequestId,
        result: Result<ImageArtifact, FruitIdentifierError>,
    },
    ClassifyDone {
        request_id: RequestId,
        result: Result<Vec<Classification>, ClassificationError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    InitializeClassifier,
    SubscribeToUserInput,
    StartCamera,
    StopCamera,
    CaptureFrame { request_id: RequestId },
    ReadFile { request_id: RequestId, path: PathBuf },
    Classify {
        request_id: RequestId,
        artifact: ImageArtifact,
    },
}

pub fn init() -> (State, Vec<Effect>) {
    (
        State {
            classifier: LifecycleStatus::Initializing,
            ..State::default()
        },
        vec![Effect::InitializeClassifier, Effect::SubscribeToUserInput],
    )
}

pub fn transition(config: &Config, state: State, event: Event) -> (State, Vec<Effect>) {
    match event {
        Event::ClassifierInitDone {
            status,
            self_test_warning,
        } => {
            let view = match &status {
                LifecycleStatus::Failed(error) => {
                    View::Message(FruitIdentifierError::from(error.clone()).user_message())
                }
                _ => state.view.clone(),
            };
            (
                State {
                    classifier: status,
                    self_test_warning,
                    view,
                    ..state
                },
                vec![],
            )
        }

        Event::UserInput(UserInputEvent::StartCamera) => match state.camera {
            CameraState::Starting | CameraState::Live => (state, vec![]),
            _ => (
                State {
                    camera: CameraState::Starting,
                    ..state
                },
                vec![Effect::StartCamera],
            ),
        },

        Event::CameraStartDone(Ok(())) => (
            State {
                camera: CameraState::Live,
                ..state
            },
            vec![],
        ),

        Event::CameraStartDone(Err(error)) => (
            State {
                view: View::Message(FruitIdentifierError::from(error.clone()).user_message()),
                camera: CameraState::Unavailable(error),
                ..state
            },
            vec![],
        ),

        Event::UserInput(UserInputEvent::Capture) => {
            if state.camera != CameraState::Live {
                return (
                    State {
                        view: View::Message(
                            FruitIdentifierError::from(CaptureError::NotStarted).user_message(),
                        ),
                        ..state
                    },
                    vec![],
                );
            }
            request_image(state, |request_id| Effect::CaptureFrame { request_id })
        }

        Event::UserInput(UserInputEvent::Upload(path)) => {
            request_image(state, |request_id| Effect::ReadFile { request_id, path })
        }

        Event::UserInput(UserInputEvent::Quit) => {
            let effects = match state.camera {
                CameraState::Live => vec![Effect::StopCamera],
                _ => vec![],
            };
            (
                State {
                    shutting_down: true,
                    ..state
                },
                effects,
            )
        }

        Event::ImageStaged { request_id, .. } | Event::ClassifyDone { request_id, .. }
            if request_id != state.latest_request =>
        {
            (state, vec![])
        }

        Event::ImageStaged {
            request_id,
            result: Ok(artifact),
        } => (
            State {
                staged: Some(StagedImage {
                    request_id,
                    origin: artifact.origin(),
                    width: artifact.width(),
                    height: artifact.height(),
                }),
                view: View::Analyzing,
                ..state
            },
            vec![Effect::Classify {
                request_id,
                artifact,
            }],
        ),

        Event::ImageStaged {
            result: Err(error), ..
        } => (
            State {
                view: View::Message(error.user_message()),
                ..state
            },
            vec![],
        ),

        Event::ClassifyDone {
            result: Ok(predictions),
            ..
        } => {
            let ranking = rank(&predictions, &config.fruit_vocabulary, config.max_results);
            (
                State {
                    view: View::Results(format_ranking(&ranking)),
                    ..state
                },
                vec![],
            )
        }

        Event::ClassifyDone {
            result: Err(error), ..
        } => (
            State {
                view: View::Message(FruitIdentifierError::from(error).user_message()),
                ..state
            },
            vec![],
        ),
    }
}

/// New images are only accepted once a classifier is available.
fn request_image(state: State, effect: impl FnOnce(RequestId) -> Effect) -> (State, Vec<Effect>) {
    if !state.classifier.is_available() {
        let message = FruitIdentifierError::from(ClassificationError::NotReady(
            state.classifier.clone(),
        ))
        .user_message();
        return (
            State {
                view: View::Message(message),
                ..state
            },
            vec![],
        );
    }

    let request_id = state.latest_request + 1;
    (
        State {
            latest_request: request_id,
            view: View::Analyzing,
            ..state
        },
        vec![effect(request_id)],
    )
}
