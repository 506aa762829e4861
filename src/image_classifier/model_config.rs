use std::path::PathBuf;

/// How to load one classifier. A config without `model_path` is the
/// unconfigured load: the model file is derived from version and alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub version: u32,
    pub alpha: f32,
    pub model_path: Option<PathBuf>,
    pub labels_path: PathBuf,
    pub input_shape: (u32, u32),
    pub top_k: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            alpha: 1.0,
            model_path: None,
            labels_path: PathBuf::from("models/imagenet_labels.txt"),
            input_shape: (224, 224),
            top_k: 3,
        }
    }
}

impl ModelConfig {
    pub fn mobilenet_v2() -> Self {
        Self {
            version: 2,
            alpha: 1.0,
            model_path: Some(PathBuf::from("models/mobilenet_v2_1.0_224.onnx")),
            ..Self::default()
        }
    }

    pub fn resolved_model_path(&self) -> PathBuf {
        match &self.model_path {
            Some(path) => path.clone(),
            None => PathBuf::from(format!(
                "models/mobilenet_v{}_{:.1}_{}.onnx",
                self.version, self.alpha, self.input_shape.0
            )),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "mobilenet v{} alpha {:.2} ({})",
            self.version,
            self.alpha,
            self.resolved_model_path().display()
        )
    }
}
