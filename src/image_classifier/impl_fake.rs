use crate::image_classifier::interface::{Classification, ClassifierLoader, ImageClassifier};
use crate::image_classifier::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const RANDOM_LABELS: [&str; 12] = [
    "banana",
    "Granny Smith, apple",
    "orange",
    "lemon",
    "strawberry",
    "pineapple, ananas",
    "golden retriever",
    "coffee mug",
    "tennis ball",
    "shopping basket",
    "tabby, tabby cat",
    "plate",
];

#[derive(Debug, Clone, PartialEq)]
pub enum FakePredictions {
    Scripted(Vec<Classification>),
    Random,
}

#[derive(Clone)]
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    predictions: FakePredictions,
    fail_classify: bool,
    fail_self_test: bool,
    input_shape: (u32, u32),
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, predictions: FakePredictions) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            predictions,
            fail_classify: false,
            fail_self_test: false,
            input_shape: (224, 224),
        }
    }

    #[allow(dead_code)]
    pub fn failing_classify(mut self) -> Self {
        self.fail_classify = true;
        self
    }

    #[allow(dead_code)]
    pub fn failing_self_test(mut self) -> Self {
        self.fail_self_test = true;
        self
    }

    fn random_predictions() -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>>
    {
        let mut rng = rand::rng();
        let index_dist = Uniform::new(0, RANDOM_LABELS.len())?;
        let probability_dist = Uniform::new(0.0f32, 1.0)?;

        let mut remaining = 1.0f32;
        let mut predictions = Vec::new();
        for _ in 0..3 {
            let probability = remaining * probability_dist.sample(&mut rng);
            remaining -= probability;
            predictions.push(Classification {
                label: RANDOM_LABELS[index_dist.sample(&mut rng)].to_string(),
                probability,
            });
        }
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));

        Ok(predictions)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<Classification>, Box<dyn std::error::Error + Send + Sync>> {
        self.logger.info(&format!(
            "Classifying {}x{} image with fake classifier...",
            image.width(),
            image.height()
        ))?;

        if self.fail_classify {
            return Err("fake classifier failure".into());
        }

        match &self.predictions {
            FakePredictions::Scripted(predictions) => Ok(predictions.clone()),
            FakePredictions::Random => Self::random_predictions(),
        }
    }

    fn input_shape(&self) -> (u32, u32) {
        self.input_shape
    }

    fn self_test(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail_self_test {
            return Err("fake self-test failure".into());
        }
        Ok(())
    }
}

/// Loads `ImageClassifierFake`, optionally failing configured (with a model
/// path) or unconfigured loads.
pub struct ClassifierLoaderFake {
    classifier: ImageClassifierFake,
    fail_configured: bool,
    fail_unconfigured: bool,
    load_count: AtomicUsize,
}

impl ClassifierLoaderFake {
    pub fn new(classifier: ImageClassifierFake) -> Self {
        Self {
            classifier,
            fail_configured: false,
            fail_unconfigured: false,
            load_count: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn failing_primary(mut self) -> Self {
        self.fail_configured = true;
        self
    }

    #[allow(dead_code)]
    pub fn failing_fallback(mut self) -> Self {
        self.fail_unconfigured = true;
        self
    }

    #[allow(dead_code)]
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

impl ClassifierLoader for ClassifierLoaderFake {
    fn load(
        &self,
        config: &ModelConfig,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        self.load_count.fetch_add(1, Ordering::SeqCst);

        let fails = match config.model_path {
            Some(_) => self.fail_configured,
            None => self.fail_unconfigured,
        };
        if fails {
            return Err(format!("could not load {}", config.describe()).into());
        }

        let mut classifier = self.classifier.clone();
        classifier.input_shape = config.input_shape;
        Ok(Arc::new(classifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_console::LoggerConsole;

    fn logger() -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole::new(chrono::FixedOffset::east_opt(0).unwrap()))
    }

    #[test]
    fn test_random_predictions_are_sorted_probabilities() {
        let classifier = ImageClassifierFake::new(logger(), FakePredictions::Random);
        let predictions = classifier.classify(&DynamicImage::new_rgb8(4, 4)).unwrap();

        assert_eq!(predictions.len(), 3);
        assert!(predictions
            .windows(2)
            .all(|pair| pair[0].probability >= pair[1].probability));
        let total: f32 = predictions.iter().map(|p| p.probability).sum();
        assert!(total <= 1.0 + f32::EPSILON);
    }

    #[test]
    fn test_loader_fails_only_configured_loads() {
        let classifier = ImageClassifierFake::new(logger(), FakePredictions::Random);
        let loader = ClassifierLoaderFake::new(classifier).failing_primary();

        assert!(loader.load(&ModelConfig::mobilenet_v2()).is_err());
        assert!(loader.load(&ModelConfig::default()).is_ok());
        assert_eq!(loader.load_count(), 2);
    }
}
