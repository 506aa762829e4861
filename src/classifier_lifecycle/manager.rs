use crate::classifier_lifecycle::interface::LifecycleStatus;
use crate::error::{ClassificationError, InitializationError};
use crate::image_classifier::interface::{Classification, ClassifierLoader, ImageClassifier};
use crate::image_classifier::model_config::ModelConfig;
use crate::image_source::ImageArtifact;
use crate::library::logger::interface::Logger;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Owns the one classifier handle of the process. The handle is written at
/// most once, during `initialize`, and only read afterwards.
pub struct ClassifierLifecycle {
    loader: Arc<dyn ClassifierLoader + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    status: RwLock<LifecycleStatus>,
    handle: OnceLock<Arc<dyn ImageClassifier + Send + Sync>>,
    self_test_warning: OnceLock<String>,
}

impl ClassifierLifecycle {
    pub fn new(
        loader: Arc<dyn ClassifierLoader + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            loader,
            logger: logger.with_namespace("classifier_lifecycle"),
            status: RwLock::new(LifecycleStatus::Uninitialized),
            handle: OnceLock::new(),
            self_test_warning: OnceLock::new(),
        }
    }

    pub fn status(&self) -> LifecycleStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Loads `primary`, falling back to `fallback` once. Only the first call
    /// does any work; later calls report the status reached by the first.
    pub fn initialize(
        &self,
        primary: &ModelConfig,
        fallback: &ModelConfig,
        run_self_test: bool,
    ) -> LifecycleStatus {
        {
            let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
            if *status != LifecycleStatus::Uninitialized {
                let _ = self.logger.info(&format!(
                    "Initialization already ran (status: {})",
                    *status
                ));
                return status.clone();
            }
            *status = LifecycleStatus::Initializing;
        }

        let _ = self.logger.info("Loading model...");
        let outcome = self.load(primary, fallback, run_self_test);
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = outcome.clone();
        let _ = self.logger.info(&format!("Model status: {}", outcome));

        outcome
    }

    fn load(
        &self,
        primary: &ModelConfig,
        fallback: &ModelConfig,
        run_self_test: bool,
    ) -> LifecycleStatus {
        let primary_error = match self.loader.load(primary) {
            Ok(classifier) => {
                if run_self_test {
                    self.self_test(classifier.as_ref());
                }
                self.install(classifier);
                return LifecycleStatus::Ready;
            }
            Err(error) => error,
        };

        let _ = self.logger.error(&format!(
            "Error loading {}: {}",
            primary.describe(),
            primary_error
        ));
        let _ = self
            .logger
            .warn(&format!("Falling back to {}", fallback.describe()));

        match self.loader.load(fallback) {
            Ok(classifier) => {
                self.install(classifier);
                LifecycleStatus::Degraded
            }
            Err(fallback_error) => {
                let _ = self.logger.error(&format!(
                    "Error loading fallback {}: {}",
                    fallback.describe(),
                    fallback_error
                ));
                LifecycleStatus::Failed(InitializationError {
                    primary: primary_error.to_string(),
                    fallback: fallback_error.to_string(),
                })
            }
        }
    }

    fn self_test(&self, classifier: &(dyn ImageClassifier + Send + Sync)) {
        if let Err(error) = classifier.self_test() {
            let warning = format!("Self-test on blank input failed: {}", error);
            let _ = self.logger.warn(&warning);
            let _ = self.self_test_warning.set(warning);
        }
    }

    fn install(&self, classifier: Arc<dyn ImageClassifier + Send + Sync>) {
        if self.handle.set(classifier).is_err() {
            let _ = self.logger.warn("Classifier handle was already set");
        }
    }

    /// `Some` only when ready or degraded.
    pub fn get_handle(&self) -> Option<Arc<dyn ImageClassifier + Send + Sync>> {
        if !self.status().is_available() {
            return None;
        }
        self.handle.get().cloned()
    }

    pub fn self_test_warning(&self) -> Option<&str> {
        self.self_test_warning.get().map(String::as_str)
    }

    pub fn classify(
        &self,
        artifact: &ImageArtifact,
    ) -> Result<Vec<Classification>, ClassificationError> {
        let classifier = self
            .get_handle()
            .ok_or_else(|| ClassificationError::NotReady(self.status()))?;

        classifier.classify(artifact.image()).map_err(|error| {
            let _ = self.logger.error(&format!("Error processing image: {}", error));
            ClassificationError::Classifier(error.to_string())
        })
    }
}
