use crate::classifier_lifecycle::interface::LifecycleStatus;
use crate::config::Config;
use crate::error::{CaptureError, ClassificationError, DecodeError, InitializationError};
use crate::fruit_identifier::core::{init, transition, CameraState, Effect, Event, State, View};
use crate::fruit_identifier::render::screen;
use crate::fruit_identifier::tests::fixture::prediction;
use crate::device_display::interface::ScreenBody;
use crate::image_source::{ImageArtifact, ImageOrigin};
use crate::presentation::DisplayKind;
use crate::user_input::interface::UserInputEvent;
use image::DynamicImage;
use std::path::PathBuf;

fn ready() -> State {
    State {
        classifier: LifecycleStatus::Ready,
        ..State::default()
    }
}

fn artifact() -> ImageArtifact {
    ImageArtifact::new(DynamicImage::new_rgb8(4, 4), ImageOrigin::File)
}

fn upload(path: &str) -> Event {
    Event::UserInput(UserInputEvent::Upload(PathBuf::from(path)))
}

#[test]
fn test_init() {
    let (state, effects) = init();

    assert_eq!(state.classifier, LifecycleStatus::Initializing);
    assert_eq!(state.latest_request, 0);
    assert_eq!(
        effects,
        vec![Effect::InitializeClassifier, Effect::SubscribeToUserInput]
    );
}

#[test]
fn test_upload_before_model_ready_is_rejected() {
    let config = Config::default();
    let (state, _) = init();

    let (state, effects) = transition(&config, state, upload("banana.jpg"));

    assert!(effects.is_empty());
    assert_eq!(state.latest_request, 0);
    assert_eq!(
        state.view,
        View::Message("Model not loaded yet. Please wait...".to_string())
    );
}

#[test]
fn test_upload_after_failed_model_is_rejected() {
    let config = Config::default();
    let failed = LifecycleStatus::Failed(InitializationError {
        primary: "missing".to_string(),
        fallback: "missing".to_string(),
    });
    let (state, _) = init();

    let (state, effects) = transition(
        &config,
        state,
        Event::ClassifierInitDone {
            status: failed.clone(),
            self_test_warning: None,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.classifier, failed);
    assert_eq!(
        state.view,
        View::Message("Error loading model. Please restart the app.".to_string())
    );

    let (state, effects) = transition(&config, state, upload("banana.jpg"));
    assert!(effects.is_empty());
    assert_eq!(state.latest_request, 0);
}

#[test]
fn test_upload_issues_new_request() {
    let config = Config::default();

    let (state, effects) = transition(&config, ready(), upload("banana.jpg"));

    assert_eq!(state.latest_request, 1);
    assert_eq!(state.view, View::Analyzing);
    assert_eq!(
        effects,
        vec![Effect::ReadFile {
            request_id: 1,
            path: PathBuf::from("banana.jpg"),
        }]
    );

    let (state, effects) = transition(&config, state, upload("apple.jpg"));
    assert_eq!(state.latest_request, 2);
    assert_eq!(
        effects,
        vec![Effect::ReadFile {
            request_id: 2,
            path: PathBuf::from("apple.jpg"),
        }]
    );
}

#[test]
fn test_camera_start_flow() {
    let config = Config::default();

    let (state, effects) = transition(
        &config,
        ready(),
        Event::UserInput(UserInputEvent::StartCamera),
    );
    assert_eq!(state.camera, CameraState::Starting);
    assert_eq!(effects, vec![Effect::StartCamera]);

    let (state, effects) = transition(
        &config,
        state,
        Event::UserInput(UserInputEvent::StartCamera),
    );
    assert_eq!(state.camera, CameraState::Starting);
    assert!(effects.is_empty());

    let (state, effects) = transition(&config, state, Event::CameraStartDone(Ok(())));
    assert_eq!(state.camera, CameraState::Live);
    assert!(effects.is_empty());

    let (state, effects) = transition(&config, state, Event::UserInput(UserInputEvent::Capture));
    assert_eq!(state.latest_request, 1);
    assert_eq!(effects, vec![Effect::CaptureFrame { request_id: 1 }]);
}

#[test]
fn test_camera_permission_denied() {
    let config = Config::default();
    let state = State {
        camera: CameraState::Starting,
        ..ready()
    };

    let (state, effects) = transition(
        &config,
        state,
        Event::CameraStartDone(Err(CaptureError::PermissionDenied)),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.camera,
        CameraState::Unavailable(CaptureError::PermissionDenied)
    );
    assert_eq!(
        state.view,
        View::Message("Could not access the camera. Please grant camera permissions.".to_string())
    );

    // The user may retry.
    let (state, effects) = transition(
        &config,
        state,
        Event::UserInput(UserInputEvent::StartCamera),
    );
    assert_eq!(state.camera, CameraState::Starting);
    assert_eq!(effects, vec![Effect::StartCamera]);
}

#[test]
fn test_capture_requires_live_camera() {
    let config = Config::default();

    let (state, effects) = transition(&config, ready(), Event::UserInput(UserInputEvent::Capture));

    assert!(effects.is_empty());
    assert_eq!(state.latest_request, 0);
    assert_eq!(
        state.view,
        View::Message("Start the camera before capturing.".to_string())
    );
}

#[test]
fn test_staged_image_is_classified() {
    let config = Config::default();
    let state = State {
        latest_request: 1,
        ..ready()
    };

    let (state, effects) = transition(
        &config,
        state,
        Event::ImageStaged {
            request_id: 1,
            result: Ok(artifact()),
        },
    );

    let staged = state.staged.clone().unwrap();
    assert_eq!(staged.request_id, 1);
    assert_eq!((staged.width, staged.height), (4, 4));
    assert_eq!(state.view, View::Analyzing);
    assert_eq!(
        effects,
        vec![Effect::Classify {
            request_id: 1,
            artifact: artifact(),
        }]
    );
}

#[test]
fn test_decode_failure_shows_message() {
    let config = Config::default();
    let state = State {
        latest_request: 1,
        ..ready()
    };

    let (state, effects) = transition(
        &config,
        state,
        Event::ImageStaged {
            request_id: 1,
            result: Err(DecodeError::Empty.into()),
        },
    );

    assert!(effects.is_empty());
    assert!(state.staged.is_none());
    assert_eq!(
        state.view,
        View::Message("That file is not an image we can read. Try another one.".to_string())
    );
}

#[test]
fn test_stale_staged_image_is_discarded() {
    let config = Config::default();
    let state = State {
        latest_request: 2,
        view: View::Analyzing,
        ..ready()
    };

    let (new_state, effects) = transition(
        &config,
        state.clone(),
        Event::ImageStaged {
            request_id: 1,
            result: Ok(artifact()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(new_state, state);
}

#[test]
fn test_stale_classification_is_discarded() {
    let config = Config::default();
    let state = State {
        latest_request: 2,
        view: View::Analyzing,
        ..ready()
    };

    let (new_state, effects) = transition(
        &config,
        state.clone(),
        Event::ClassifyDone {
            request_id: 1,
            result: Ok(vec![prediction("banana", 0.92)]),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(new_state, state);
}

#[test]
fn test_fruit_result() {
    let config = Config::default();
    let state = State {
        latest_request: 1,
        ..ready()
    };

    let (state, effects) = transition(
        &config,
        state,
        Event::ClassifyDone {
            request_id: 1,
            result: Ok(vec![
                prediction("banana", 0.92),
                prediction("yellow object", 0.5),
            ]),
        },
    );

    assert!(effects.is_empty());
    match state.view {
        View::Results(list) => {
            assert_eq!(list.kind, DisplayKind::Fruit);
            assert_eq!(list.items.len(), 1);
            assert_eq!(list.items[0].text, "Banana");
            assert_eq!(list.items[0].confidence_text(), "92.0%");
        }
        other => panic!("Unexpected view: {:?}", other),
    }
}

#[test]
fn test_no_fruit_result() {
    let config = Config::default();
    let state = State {
        latest_request: 1,
        ..ready()
    };

    let (state, _) = transition(
        &config,
        state,
        Event::ClassifyDone {
            request_id: 1,
            result: Ok(vec![prediction("golden retriever", 0.8)]),
        },
    );

    match state.view {
        View::Results(list) => {
            assert_eq!(list.kind, DisplayKind::NoFruit);
            assert_eq!(list.items[0].line(), "Golden Retriever — 80.0%");
        }
        other => panic!("Unexpected view: {:?}", other),
    }
}

#[test]
fn test_classification_error_is_recoverable() {
    let config = Config::default();
    let state = State {
        latest_request: 1,
        ..ready()
    };

    let (state, effects) = transition(
        &config,
        state,
        Event::ClassifyDone {
            request_id: 1,
            result: Err(ClassificationError::Classifier("boom".to_string())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view,
        View::Message("Error processing image. Please try again.".to_string())
    );

    let (state, effects) = transition(&config, state, upload("again.jpg"));
    assert_eq!(state.latest_request, 2);
    assert_eq!(effects.len(), 1);
}

#[test]
fn test_quit_stops_live_camera() {
    let config = Config::default();
    let state = State {
        camera: CameraState::Live,
        ..ready()
    };

    let (state, effects) = transition(&config, state, Event::UserInput(UserInputEvent::Quit));

    assert!(state.shutting_down);
    assert_eq!(effects, vec![Effect::StopCamera]);

    let (state, effects) = transition(&config, ready(), Event::UserInput(UserInputEvent::Quit));
    assert!(state.shutting_down);
    assert!(effects.is_empty());
}

#[test]
fn test_self_test_warning_is_shown_with_status() {
    let config = Config::default();
    let (state, _) = init();

    let (state, effects) = transition(
        &config,
        state,
        Event::ClassifierInitDone {
            status: LifecycleStatus::Ready,
            self_test_warning: Some("blank input rejected".to_string()),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.self_test_warning.as_deref(),
        Some("blank input rejected")
    );
    assert_eq!(
        screen(&state).status,
        "Model loaded successfully! (self-test failed)"
    );
}

#[test]
fn test_screen_reflects_state() {
    let state = State {
        classifier: LifecycleStatus::Degraded,
        camera: CameraState::Live,
        view: View::Analyzing,
        ..State::default()
    };

    let screen = screen(&state);

    assert_eq!(screen.status, "Model loaded (fallback configuration)");
    assert_eq!(screen.camera, "Camera live");
    assert_eq!(screen.body, ScreenBody::Analyzing);
}
