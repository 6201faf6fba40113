//! SnapLens Content
//!
//! Curated per-label content for the demo UI: a static catalog mapping each
//! classifier label to up to three texts, images, and video links, plus
//! best-effort video-thumbnail resolution for arbitrary URLs.

pub mod catalog;
pub mod video;

pub use catalog::{pick_top3, ContentBundle, ContentCatalog};
pub use video::{VideoLinkResolver, VideoRef};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::catalog::{ContentBundle, ContentCatalog};
    pub use crate::video::{VideoLinkResolver, VideoRef};
}
