//! Prediction ranking
//!
//! Converts a raw probability vector plus the fixed label list into a
//! deterministically ordered ranking. Sorting is by probability descending;
//! entries with equal probability keep their relative order from the input
//! label sequence (stable sort), so the result is reproducible for a given
//! classifier vocabulary.

use crate::error::{Error, Result};
use crate::types::Label;
use serde::{Deserialize, Serialize};

/// One (label, probability) pair in a ranking.
///
/// The numeric probability is the entry's identity; percentage formatting is a
/// presentation detail layered on top via [`RankedEntry::display_percent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// The label
    pub label: Label,

    /// Probability in [0.0, 1.0]
    pub probability: f32,
}

impl RankedEntry {
    /// Probability as a percentage value
    pub fn percent(&self) -> f32 {
        self.probability * 100.0
    }

    /// Percentage formatted with two decimal digits, e.g. `"97.31%"`
    pub fn display_percent(&self) -> String {
        format!("{:.2}%", self.percent())
    }
}

/// Labels ordered by predicted probability, descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
}

impl Ranking {
    /// The ranked entries, highest probability first
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// The highest-probability entry, if any labels exist
    pub fn top(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    /// Number of ranked labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the label set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Ranking {
    type Item = RankedEntry;
    type IntoIter = std::vec::IntoIter<RankedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build a ranking from the fixed label list and a matching probability vector.
///
/// `labels` and `probs` must have equal length; a mismatch is a caller bug and
/// yields [`Error::InvalidInput`]. The probability vector is trusted to be the
/// classifier's output (non-negative, summing to ~1.0) and is not re-normalized.
pub fn rank(labels: &[Label], probs: &[f32]) -> Result<Ranking> {
    if labels.len() != probs.len() {
        return Err(Error::invalid_input(format!(
            "label count {} does not match probability count {}",
            labels.len(),
            probs.len()
        )));
    }

    let mut entries: Vec<RankedEntry> = labels
        .iter()
        .zip(probs.iter())
        .map(|(label, &probability)| RankedEntry {
            label: label.clone(),
            probability,
        })
        .collect();

    // Stable sort: equal probabilities keep input label order.
    entries.sort_by(|a, b| b.probability.total_cmp(&a.probability));

    Ok(Ranking { entries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rank_sorts_descending() {
        let ranking = rank(&labels(&["a", "b", "c"]), &[0.1, 0.7, 0.2]).unwrap();
        let order: Vec<&str> = ranking.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(ranking.top().unwrap().label, "b");
    }

    #[test]
    fn rank_breaks_ties_by_input_order() {
        let ranking = rank(&labels(&["a", "b", "c", "d"]), &[0.25, 0.25, 0.3, 0.2]).unwrap();
        let order: Vec<&str> = ranking.entries().iter().map(|e| e.label.as_str()).collect();
        // a and b tie; a came first in the label list so it stays first.
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn rank_rejects_length_mismatch() {
        let err = rank(&labels(&["a", "b"]), &[0.5]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rank_empty_is_empty() {
        let ranking = rank(&[], &[]).unwrap();
        assert!(ranking.is_empty());
        assert!(ranking.top().is_none());
    }

    #[test]
    fn percent_formatting_is_two_decimals() {
        let entry = RankedEntry {
            label: "a".to_string(),
            probability: 0.97314,
        };
        assert_eq!(entry.display_percent(), "97.31%");
        assert!((entry.percent() - 97.314).abs() < 1e-3);
    }
}
