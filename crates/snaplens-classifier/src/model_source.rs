//! Model artifact sources and configuration
//!
//! A model is two artifacts: a safetensors weights file and a JSON label
//! vocabulary (an ordered array of label strings). Each can live on the local
//! file system or on the Hugging Face Hub; hub downloads land in the hf-hub
//! on-disk cache, so a fetch happens at most once and later resolutions reuse
//! the local copy.

use hf_hub::{api::sync::Api, Repo, RepoType};
use snaplens_core::{Error, Label, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default input edge for the classifier (images are resized to a square)
pub const DEFAULT_INPUT_EDGE: u32 = 64;

/// Source location for one model artifact
#[derive(Debug, Clone)]
pub enum ModelSource {
    /// Load from the local file system
    LocalPath(PathBuf),

    /// Download from the Hugging Face Hub
    HuggingFace {
        repo_id: String,
        revision: Option<String>,
        filename: String,
    },
}

impl ModelSource {
    /// Resolve the artifact to a local path, fetching it if necessary.
    ///
    /// Local paths must already exist. Hub artifacts are fetched through the
    /// hf-hub cache: the first resolution downloads, later ones are cache hits.
    pub fn resolve(&self) -> Result<PathBuf> {
        match self {
            Self::LocalPath(path) => {
                if !path.exists() {
                    return Err(Error::model_unavailable(format!(
                        "model artifact not found: {}",
                        path.display()
                    )));
                }
                Ok(path.clone())
            }
            Self::HuggingFace {
                repo_id,
                revision,
                filename,
            } => {
                let api = Api::new().map_err(|e| {
                    Error::model_unavailable(format!("failed to initialize HF API: {e}"))
                })?;

                let repo = api.repo(Repo::with_revision(
                    repo_id.clone(),
                    RepoType::Model,
                    revision.clone().unwrap_or_else(|| "main".to_string()),
                ));

                let path = repo.get(filename).map_err(|e| {
                    Error::model_unavailable(format!(
                        "failed to fetch {filename} from {repo_id}: {e}"
                    ))
                })?;
                info!(artifact = %path.display(), "resolved model artifact");
                Ok(path)
            }
        }
    }
}

/// Configuration for loading the classifier
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Source of the safetensors weights
    pub weights: ModelSource,

    /// Source of the JSON label vocabulary
    pub labels: ModelSource,

    /// Edge length images are resized to before inference
    pub input_edge: u32,
}

impl ModelConfig {
    /// Create a configuration from local weights and labels files
    pub fn from_local(weights: impl Into<PathBuf>, labels: impl Into<PathBuf>) -> Self {
        Self {
            weights: ModelSource::LocalPath(weights.into()),
            labels: ModelSource::LocalPath(labels.into()),
            input_edge: DEFAULT_INPUT_EDGE,
        }
    }

    /// Create a configuration from a Hugging Face repository
    pub fn from_hf(
        repo_id: impl Into<String>,
        weights_filename: impl Into<String>,
        labels_filename: impl Into<String>,
    ) -> Self {
        let repo_id = repo_id.into();
        Self {
            weights: ModelSource::HuggingFace {
                repo_id: repo_id.clone(),
                revision: None,
                filename: weights_filename.into(),
            },
            labels: ModelSource::HuggingFace {
                repo_id,
                revision: None,
                filename: labels_filename.into(),
            },
            input_edge: DEFAULT_INPUT_EDGE,
        }
    }

    /// Set the input edge length
    pub fn with_input_edge(mut self, edge: u32) -> Self {
        self.input_edge = edge;
        self
    }

    /// Pin both hub artifacts to a revision
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        let revision = revision.into();
        for source in [&mut self.weights, &mut self.labels] {
            if let ModelSource::HuggingFace { revision: rev, .. } = source {
                *rev = Some(revision.clone());
            }
        }
        self
    }
}

/// Read the label vocabulary from a JSON array file.
///
/// The order of the array is the classifier's fixed label order.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<Label>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let labels: Vec<Label> = serde_json::from_str(&contents).map_err(|e| {
        Error::model_unavailable(format!(
            "invalid label vocabulary {}: {}",
            path.display(),
            e
        ))
    })?;
    if labels.is_empty() {
        return Err(Error::model_unavailable(format!(
            "label vocabulary {} is empty",
            path.display()
        )));
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn model_config_builder_from_hf() {
        let config = ModelConfig::from_hf("someone/some-model", "model.safetensors", "labels.json")
            .with_revision("main")
            .with_input_edge(32);

        assert_eq!(config.input_edge, 32);
        match &config.weights {
            ModelSource::HuggingFace {
                repo_id,
                revision,
                filename,
            } => {
                assert_eq!(repo_id, "someone/some-model");
                assert_eq!(revision.as_deref(), Some("main"));
                assert_eq!(filename, "model.safetensors");
            }
            _ => panic!("expected HuggingFace source"),
        }
    }

    #[test]
    fn local_source_requires_existing_file() {
        let source = ModelSource::LocalPath(PathBuf::from("/definitely/not/here.safetensors"));
        let err = source.resolve().unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn load_labels_reads_json_array_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\"guardian\", \"phantom\", \"vandal\"]").unwrap();
        let labels = load_labels(file.path()).unwrap();
        assert_eq!(labels, vec!["guardian", "phantom", "vandal"]);
    }

    #[test]
    fn load_labels_maps_parse_failures_to_model_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"not\": \"an array\"}}").unwrap();
        let err = load_labels(file.path()).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn load_labels_rejects_empty_vocabulary() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let err = load_labels(file.path()).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }
}
