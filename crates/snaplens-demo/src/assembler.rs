//! Presentation assembly
//!
//! Orchestrates one classification interaction into the view model the UI
//! consumes: prediction box, ranked probability list, and the content panel
//! for the selected label.

use serde::Serialize;
use snaplens_classifier::ClassifierGateway;
use snaplens_content::{ContentCatalog, VideoLinkResolver, VideoRef};
use snaplens_core::{rank, CanonicalImage, Label, Result};

/// One row of the probability panel.
#[derive(Debug, Clone, Serialize)]
pub struct ProbabilityRow {
    /// The label
    pub label: Label,

    /// Numeric probability in [0.0, 1.0]
    pub probability: f32,

    /// Fixed-precision percentage for display, e.g. `"97.31%"`
    pub percent: String,

    /// True when this row's label is the predicted label
    pub highlighted: bool,
}

/// Content panel for the selected label.
///
/// `Empty` is a distinguishable "no content configured" state: the UI shows a
/// single explanatory placeholder instead of three empty sections.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ContentPanel {
    /// No texts, images, or videos are curated for the label
    Empty { label: Label },

    /// Curated content, each kind capped at three entries
    Curated {
        label: Label,
        texts: Vec<String>,
        images: Vec<String>,
        videos: Vec<VideoRef>,
    },
}

impl ContentPanel {
    /// The label the panel was resolved for
    pub fn label(&self) -> &str {
        match self {
            Self::Empty { label } | Self::Curated { label, .. } => label,
        }
    }
}

/// The UI-facing view model for one classified image.
///
/// The submitted image itself is not echoed back here: the page previews the
/// capture or upload client-side from the bytes it already holds, so round-
/// tripping them through the server would only bloat the response.
#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    /// The predicted label
    pub predicted_label: Label,

    /// Probability rows, highest first
    pub ranking: Vec<ProbabilityRow>,

    /// Content panel for the selected (or predicted) label
    pub content: ContentPanel,
}

/// Assembles predictions, rankings, and curated content into view models.
pub struct PresentationAssembler {
    catalog: ContentCatalog,
    resolver: VideoLinkResolver,
}

impl PresentationAssembler {
    pub fn new(catalog: ContentCatalog) -> Result<Self> {
        Ok(Self {
            catalog,
            resolver: VideoLinkResolver::new()?,
        })
    }

    /// Run one classification interaction.
    ///
    /// The probability panel always reflects the prediction. The content panel
    /// uses `selected_label` when it names a known label, else the predicted
    /// label, else the first known label; an unknown override falls back
    /// silently rather than erroring.
    pub async fn assemble(
        &self,
        gateway: &ClassifierGateway,
        image: &CanonicalImage,
        selected_label: Option<&str>,
    ) -> Result<ViewModel> {
        let labels = gateway.labels().await?;
        let prediction = gateway.predict(image).await?;

        let ranking = rank(&labels, &prediction.probabilities)?
            .into_iter()
            .map(|entry| ProbabilityRow {
                highlighted: entry.label == prediction.top_label,
                percent: entry.display_percent(),
                probability: entry.probability,
                label: entry.label,
            })
            .collect();

        let content_label = resolve_content_label(&labels, &prediction.top_label, selected_label);
        let bundle = self.catalog.lookup(&content_label);

        let content = if bundle.is_empty() {
            ContentPanel::Empty {
                label: content_label,
            }
        } else {
            ContentPanel::Curated {
                label: content_label,
                texts: bundle.texts,
                images: bundle.images,
                // Each video resolves independently; an unmatched URL renders
                // as a plain link, not an error.
                videos: bundle.videos.iter().map(|v| self.resolver.resolve(v)).collect(),
            }
        };

        Ok(ViewModel {
            predicted_label: prediction.top_label,
            ranking,
            content,
        })
    }
}

/// Pick the label the content panel is rendered for.
fn resolve_content_label(labels: &[Label], predicted: &str, selected: Option<&str>) -> Label {
    if let Some(sel) = selected {
        if labels.iter().any(|l| l == sel) {
            return sel.to_string();
        }
    }
    if labels.iter().any(|l| l == predicted) {
        return predicted.to_string();
    }
    labels
        .first()
        .cloned()
        .unwrap_or_else(|| predicted.to_string())
}
