//! Image classifier trait and test double

use async_trait::async_trait;
use snaplens_core::{CanonicalImage, Error, Label, Prediction, Result};

/// Trait for loaded, ready-to-use image classifiers.
///
/// The label set is fixed when the classifier is loaded and immutable for the
/// session; every probability vector has exactly one entry per label, in label
/// order. Inference is read-only, so a loaded classifier is safely shared.
#[async_trait]
pub trait ImageClassifier: Send + Sync + std::fmt::Debug {
    /// The full ordered label vocabulary
    fn labels(&self) -> &[Label];

    /// Classify a canonical RGB image, returning the most likely label and the
    /// full probability vector in label order.
    async fn predict(&self, image: &CanonicalImage) -> Result<Prediction>;
}

/// A classifier that always returns the same probability vector.
///
/// Used for wiring tests and for running the demo without model weights.
#[derive(Debug)]
pub struct FixedClassifier {
    labels: Vec<Label>,
    probabilities: Vec<f32>,
}

impl FixedClassifier {
    /// Create a fixed classifier from labels and a matching probability vector
    pub fn new(labels: Vec<Label>, probabilities: Vec<f32>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::invalid_input("label set must not be empty"));
        }
        if labels.len() != probabilities.len() {
            return Err(Error::invalid_input(format!(
                "label count {} does not match probability count {}",
                labels.len(),
                probabilities.len()
            )));
        }
        Ok(Self {
            labels,
            probabilities,
        })
    }

    /// Uniform distribution over the given labels
    pub fn uniform(labels: Vec<Label>) -> Result<Self> {
        let n = labels.len();
        if n == 0 {
            return Err(Error::invalid_input("label set must not be empty"));
        }
        let probabilities = vec![1.0 / n as f32; n];
        Self::new(labels, probabilities)
    }
}

#[async_trait]
impl ImageClassifier for FixedClassifier {
    fn labels(&self) -> &[Label] {
        &self.labels
    }

    async fn predict(&self, _image: &CanonicalImage) -> Result<Prediction> {
        let idx = argmax(&self.probabilities)
            .ok_or_else(|| Error::internal("empty probability vector"))?;
        Ok(Prediction::new(
            self.labels[idx].clone(),
            self.probabilities.clone(),
        ))
    }
}

/// Index of the highest probability; ties resolve to the earlier index, the
/// same tie-break the ranking uses.
pub(crate) fn argmax(probs: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in probs.iter().enumerate() {
        match best {
            Some((_, bp)) if p <= bp => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> CanonicalImage {
        CanonicalImage::new(1, 1, vec![0, 0, 0]).unwrap()
    }

    #[tokio::test]
    async fn fixed_classifier_returns_argmax_label() {
        let clf = FixedClassifier::new(
            vec!["cat".to_string(), "dog".to_string(), "fox".to_string()],
            vec![0.2, 0.7, 0.1],
        )
        .unwrap();

        let prediction = clf.predict(&image()).await.unwrap();
        assert_eq!(prediction.top_label, "dog");
        assert_eq!(prediction.probabilities, vec![0.2, 0.7, 0.1]);
        assert_eq!(clf.labels().len(), 3);
    }

    #[test]
    fn fixed_classifier_rejects_mismatched_lengths() {
        let err = FixedClassifier::new(vec!["cat".to_string()], vec![0.5, 0.5]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn uniform_classifier_predicts_first_label_on_tie() {
        let clf =
            FixedClassifier::uniform(vec!["cat".to_string(), "dog".to_string()]).unwrap();
        let prediction = clf.predict(&image()).await.unwrap();
        assert_eq!(prediction.top_label, "cat");
    }
}
