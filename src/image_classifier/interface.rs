use crate::image_classifier::model_config::ModelConfig;
use image::DynamicImage;
use std::sync::Arc;

/// One (label, probability) pair as reported by the classifier. The label is
/// free-form text, often a comma-joined list of synonyms.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub probability: f32,
}

pub trait ImageClassifier {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>;

    /// (width, height) the model expects.
    fn input_shape(&self) -> (u32, u32);

    /// Classifies a blank input of the model's input shape.
    fn self_test(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (width, height) = self.input_shape();
        self.classify(&DynamicImage::new_rgb8(width, height))?;
        Ok(())
    }
}

pub trait ClassifierLoader {
    fn load(
        &self,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}
