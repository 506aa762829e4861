use crate::device_camera::interface::Facing;
use crate::image_classifier::model_config::ModelConfig;
use crate::prediction_filter::vocabulary::FruitVocabulary;
use chrono::Offset;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    TractOnnx,
    Fake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Console,
    Gui,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub primary_model: ModelConfig,
    pub fallback_model: ModelConfig,
    pub run_self_test: bool,
    pub classifier_kind: ClassifierKind,
    pub fruit_vocabulary: FruitVocabulary,
    pub max_results: usize,
    pub capture_width: u32,
    pub capture_height: u32,
    pub camera_facing: Facing,
    /// `false` on hosts without a camera; starting it then fails.
    pub camera_available: bool,
    pub display_backend: DisplayBackend,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_model: ModelConfig::mobilenet_v2(),
            fallback_model: ModelConfig::default(),
            run_self_test: true,
            classifier_kind: ClassifierKind::TractOnnx,
            fruit_vocabulary: FruitVocabulary::default(),
            max_results: 3,
            capture_width: 640,
            capture_height: 480,
            camera_facing: Facing::Environment,
            camera_available: true,
            display_backend: DisplayBackend::Console,
            logger_timezone: mountain_standard_time(),
        }
    }
}

impl Config {
    /// Defaults overridden by `FRUIT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("FRUIT_MODEL_PATH") {
            config.primary_model.model_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("FRUIT_FALLBACK_MODEL_PATH") {
            config.fallback_model.model_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("FRUIT_LABELS_PATH") {
            config.primary_model.labels_path = PathBuf::from(&path);
            config.fallback_model.labels_path = PathBuf::from(path);
        }
        if let Some(kind) = lookup("FRUIT_CLASSIFIER") {
            if kind.eq_ignore_ascii_case("fake") {
                config.classifier_kind = ClassifierKind::Fake;
            }
        }
        if let Some(terms) = lookup("FRUIT_VOCABULARY") {
            let vocabulary = FruitVocabulary::new(terms.split(','));
            if !vocabulary.is_empty() {
                config.fruit_vocabulary = vocabulary;
            }
        }
        if let Some(camera) = lookup("FRUIT_CAMERA") {
            if camera.eq_ignore_ascii_case("none") {
                config.camera_available = false;
            }
        }
        if let Some(kind) = lookup("FRUIT_DISPLAY") {
            if kind.eq_ignore_ascii_case("gui") {
                config.display_backend = DisplayBackend::Gui;
            }
        }

        config
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or(chrono::Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_follow_mobilenet_v2_with_unconfigured_fallback() {
        let config = Config::default();
        assert_eq!(config.primary_model.version, 2);
        assert!(config.primary_model.model_path.is_some());
        assert_eq!(config.fallback_model, ModelConfig::default());
        assert_eq!(config.max_results, 3);
        assert_eq!((config.capture_width, config.capture_height), (640, 480));
        assert!(config.camera_available);
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("FRUIT_MODEL_PATH", "/tmp/primary.onnx"),
            ("FRUIT_LABELS_PATH", "/tmp/labels.txt"),
            ("FRUIT_CLASSIFIER", "fake"),
            ("FRUIT_DISPLAY", "GUI"),
            ("FRUIT_CAMERA", "none"),
        ]);

        let config = Config::from_lookup(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.primary_model.model_path,
            Some(PathBuf::from("/tmp/primary.onnx"))
        );
        assert_eq!(config.fallback_model.model_path, None);
        assert_eq!(
            config.fallback_model.labels_path,
            PathBuf::from("/tmp/labels.txt")
        );
        assert_eq!(config.classifier_kind, ClassifierKind::Fake);
        assert_eq!(config.display_backend, DisplayBackend::Gui);
        assert!(!config.camera_available);
    }

    #[test]
    fn test_vocabulary_override() {
        let config = Config::from_lookup(|key| match key {
            "FRUIT_VOCABULARY" => Some("Fig, durian,,".to_string()),
            _ => None,
        });
        assert_eq!(
            config.fruit_vocabulary.iter().collect::<Vec<_>>(),
            vec!["fig", "durian"]
        );

        let config = Config::from_lookup(|key| match key {
            "FRUIT_VOCABULARY" => Some(" , ".to_string()),
            _ => None,
        });
        assert_eq!(config.fruit_vocabulary, FruitVocabulary::default());
    }
}
