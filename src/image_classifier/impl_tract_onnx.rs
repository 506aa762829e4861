use crate::image_classifier::interface::{Classification, ClassifierLoader, ImageClassifier};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_classifier::tract::image::{blank_tensor, resize_image_to_tensor};
use crate::image_classifier::tract::labels::load_labels;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    labels: Vec<String>,
    config: ModelConfig,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: ModelConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = config.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(config.resolved_model_path())?
            .with_input_fact(
                0,
                f32::fact([1, 3, height as usize, width as usize]).into(),
            )?
            .into_optimized()?
            .into_runnable()?;

        let labels = load_labels(&config.labels_path)?;

        Ok(Self {
            model,
            labels,
            config,
        })
    }

    fn run(&self, input: Tensor) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .to_array_view::<f32>()?;
        Ok(output.iter().copied().collect())
    }

    fn label_for(&self, index: usize, num_scores: usize) -> Option<&str> {
        // 1001-way models put "background" at index 0.
        let offset = num_scores.saturating_sub(self.labels.len());
        index
            .checked_sub(offset)
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.config.input_shape;
        let input = resize_image_to_tensor(image, width, height)?;
        let scores = self.run(input)?;
        let probabilities = to_probabilities(&scores);

        let classifications = top_k(&probabilities, self.config.top_k)
            .into_iter()
            .filter_map(|(index, probability)| {
                self.label_for(index, probabilities.len())
                    .map(|label| Classification {
                        label: label.to_string(),
                        probability,
                    })
            })
            .collect();

        Ok(classifications)
    }

    fn input_shape(&self) -> (u32, u32) {
        self.config.input_shape
    }

    fn self_test(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.config.input_shape;
        self.run(blank_tensor(width, height)?)?;
        Ok(())
    }
}

pub struct ClassifierLoaderTractOnnx {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ClassifierLoaderTractOnnx {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("tract_onnx"),
        }
    }
}

impl ClassifierLoader for ClassifierLoaderTractOnnx {
    fn load(
        &self,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        let _ = self.logger.info(&format!("Loading {}...", config.describe()));
        let classifier = ImageClassifierTractOnnx::new(config.clone())?;
        let _ = self.logger.info(&format!(
            "Loaded {} with {} labels",
            config.describe(),
            classifier.labels.len()
        ));
        Ok(Arc::new(classifier))
    }
}

/// Scores that already form a distribution are kept, logits get a softmax.
fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let sum: f32 = scores.iter().sum();
    let is_distribution =
        scores.iter().all(|s| (0.0..=1.0).contains(s)) && (sum - 1.0).abs() < 1e-3;
    if is_distribution {
        return scores.to_vec();
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn top_k(probabilities: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1));
    indexed.truncate(k);
    indexed
}
