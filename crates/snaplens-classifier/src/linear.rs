//! Candle-based linear image classifier
//!
//! A single linear layer over flattened RGB features with a softmax head.
//! Images are resized to a fixed square edge, scaled to [0, 1], and flattened
//! in row-major RGB order; the weights file must carry `weight` of shape
//! `(num_labels, edge * edge * 3)` and `bias` of shape `(num_labels)`.

use crate::classifier::{argmax, ImageClassifier};
use crate::model_source::{load_labels, ModelConfig};
use async_trait::async_trait;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::ops::softmax;
use candle_nn::{Linear, Module, VarBuilder};
use image::imageops::FilterType;
use image::RgbImage;
use snaplens_core::{CanonicalImage, Error, Label, Prediction, Result};
use tracing::info;

#[derive(Debug)]
pub struct LinearImageClassifier {
    labels: Vec<Label>,
    linear: Linear,
    input_edge: u32,
    device: Device,
}

impl LinearImageClassifier {
    /// Resolve both artifacts and load the classifier onto the CPU.
    ///
    /// Any fetch or parse failure is `ModelUnavailable`; the classifier only
    /// exists once loading has fully succeeded.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let weights_path = config.weights.resolve()?;
        let labels_path = config.labels.resolve()?;

        let labels = load_labels(&labels_path)?;
        let device = Device::Cpu;

        // Safety: the weights file is not mutated while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
        }
        .map_err(|e| {
            Error::model_unavailable(format!(
                "failed to load weights {}: {}",
                weights_path.display(),
                e
            ))
        })?;

        let feature_dim = (config.input_edge * config.input_edge * 3) as usize;
        let linear = candle_nn::linear(feature_dim, labels.len(), vb).map_err(|e| {
            Error::model_unavailable(format!(
                "weights {} do not match a {}-feature, {}-label linear model: {}",
                weights_path.display(),
                feature_dim,
                labels.len(),
                e
            ))
        })?;

        info!(
            labels = labels.len(),
            input_edge = config.input_edge,
            "loaded linear image classifier"
        );

        Ok(Self {
            labels,
            linear,
            input_edge: config.input_edge,
            device,
        })
    }

    /// Resize to the model's input edge and flatten to [0, 1] f32 features.
    fn features(&self, image: &CanonicalImage) -> Result<Vec<f32>> {
        let rgb = RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .ok_or_else(|| Error::internal("canonical image buffer mismatch"))?;
        let resized = image::imageops::resize(
            &rgb,
            self.input_edge,
            self.input_edge,
            FilterType::Triangle,
        );
        Ok(resized
            .into_raw()
            .into_iter()
            .map(|b| b as f32 / 255.0)
            .collect())
    }
}

#[async_trait]
impl ImageClassifier for LinearImageClassifier {
    fn labels(&self) -> &[Label] {
        &self.labels
    }

    async fn predict(&self, image: &CanonicalImage) -> Result<Prediction> {
        let features = self.features(image)?;
        let input = Tensor::from_vec(features, (1, self.feature_dim()), &self.device)
            .map_err(candle_err)?;

        let logits = self.linear.forward(&input).map_err(candle_err)?;
        let probs = softmax(&logits, D::Minus1)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(candle_err)?;

        let idx =
            argmax(&probs).ok_or_else(|| Error::internal("classifier produced no scores"))?;
        Ok(Prediction::new(self.labels[idx].clone(), probs))
    }
}

impl LinearImageClassifier {
    fn feature_dim(&self) -> usize {
        (self.input_edge * self.input_edge * 3) as usize
    }
}

fn candle_err(e: candle_core::Error) -> Error {
    Error::internal(format!("inference failed: {e}"))
}
