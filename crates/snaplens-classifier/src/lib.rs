//! SnapLens Classifier
//!
//! Model loading and image classification for the SnapLens demo:
//! - Model artifact sources (local files or the Hugging Face Hub) with
//!   fetch-at-most-once semantics
//! - A candle-based linear image classifier
//! - The classifier gateway: a lazily-initialized, process-wide cached handle
//! - The image decode boundary (bytes in, canonical RGB out)

pub mod classifier;
pub mod decode;
pub mod gateway;
pub mod linear;
pub mod model_source;

pub use classifier::{FixedClassifier, ImageClassifier};
pub use decode::decode_image;
pub use gateway::{ClassifierGateway, ClassifierLoader, ModelArtifactLoader};
pub use linear::LinearImageClassifier;
pub use model_source::{load_labels, ModelConfig, ModelSource, DEFAULT_INPUT_EDGE};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{FixedClassifier, ImageClassifier};
    pub use crate::decode::decode_image;
    pub use crate::gateway::{ClassifierGateway, ClassifierLoader};
    pub use crate::model_source::{ModelConfig, ModelSource};
}
