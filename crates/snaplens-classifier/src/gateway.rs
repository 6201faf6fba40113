//! Classifier gateway
//!
//! Owns the process-wide, lazily-loaded classifier. Loading happens at most
//! once per gateway via a single-flight once-guard; a failed load caches
//! nothing, so the handle is only ever "ready" after a fully successful load
//! and the next call may retry. After load the classifier is read-only.

use crate::classifier::ImageClassifier;
use crate::linear::LinearImageClassifier;
use crate::model_source::ModelConfig;
use async_trait::async_trait;
use snaplens_core::{CanonicalImage, Error, Label, Prediction, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

/// Seam for producing the classifier instance, so the gateway can be exercised
/// without weights or network access.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn ImageClassifier>>;
}

/// Loads the linear classifier from configured model artifacts.
pub struct ModelArtifactLoader {
    config: ModelConfig,
}

impl ModelArtifactLoader {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ClassifierLoader for ModelArtifactLoader {
    async fn load(&self) -> Result<Arc<dyn ImageClassifier>> {
        let config = self.config.clone();
        // Artifact fetch and weight mapping are blocking.
        let classifier = tokio::task::spawn_blocking(move || LinearImageClassifier::load(&config))
            .await
            .map_err(|e| Error::internal(format!("model load task failed: {e}")))??;
        Ok(Arc::new(classifier))
    }
}

/// Gateway owning the lazily-initialized, cached classifier handle.
///
/// The handle is exposed only through this type's operations; no other
/// component holds a direct reference to the loaded model.
pub struct ClassifierGateway {
    loader: Box<dyn ClassifierLoader>,
    handle: OnceCell<Arc<dyn ImageClassifier>>,
}

impl ClassifierGateway {
    /// Gateway backed by real model artifacts
    pub fn new(config: ModelConfig) -> Self {
        Self::with_loader(Box::new(ModelArtifactLoader::new(config)))
    }

    /// Gateway backed by a custom loader
    pub fn with_loader(loader: Box<dyn ClassifierLoader>) -> Self {
        Self {
            loader,
            handle: OnceCell::new(),
        }
    }

    /// Idempotent load: the first call initializes, concurrent and later calls
    /// share the same handle.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn ImageClassifier>> {
        self.handle
            .get_or_try_init(|| async {
                info!("loading classifier");
                self.loader.load().await
            })
            .await
            .map(Arc::clone)
    }

    /// The fixed, ordered label vocabulary
    pub async fn labels(&self) -> Result<Vec<Label>> {
        Ok(self.ensure_loaded().await?.labels().to_vec())
    }

    /// Classify a canonical image
    pub async fn predict(&self, image: &CanonicalImage) -> Result<Prediction> {
        let classifier = self.ensure_loaded().await?;
        classifier.predict(image).await
    }
}
