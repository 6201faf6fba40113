//! Video-link resolution
//!
//! Extracts an 11-character video identifier from known URL shapes and derives
//! a thumbnail URL by template substitution. Extraction rules run in a fixed
//! priority order; the first match wins. A URL that matches no rule resolves to
//! a plain link (thumbnail `None`), which is an expected state, not an error.
//! The derived thumbnail is never validated over the network; a broken
//! thumbnail is accepted degraded rendering.

use regex::Regex;
use serde::{Deserialize, Serialize};
use snaplens_core::{Error, Result};

/// Thumbnail-service URL template; `{id}` is replaced with the video id.
const THUMBNAIL_TEMPLATE: &str = "https://img.youtube.com/vi/{id}/hqdefault.jpg";

/// One extraction rule: a named pattern whose first capture group is the video id.
#[derive(Debug)]
struct ExtractRule {
    name: &'static str,
    pattern: Regex,
}

/// A video entry resolved for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    /// The original video URL, always rendered as the link target
    pub url: String,

    /// Derived thumbnail URL, or `None` when no rule matched (render a plain link)
    pub thumbnail_url: Option<String>,
}

/// Resolver from arbitrary video URLs to thumbnail URLs.
#[derive(Debug)]
pub struct VideoLinkResolver {
    rules: Vec<ExtractRule>,
}

impl VideoLinkResolver {
    /// Build the resolver with its fixed, priority-ordered rule set.
    ///
    /// A video id is exactly 11 characters of `[0-9A-Za-z_-]`, terminated by
    /// `?`, `&`, `/`, or end of string.
    pub fn new() -> Result<Self> {
        let rules = vec![
            // watch?v=<id>, with v= anywhere in the query
            ExtractRule {
                name: "watch-param",
                pattern: compile(r"youtube\.com/watch\?(?:[^#]*&)?v=([0-9A-Za-z_-]{11})(?:[?&/]|$)")?,
            },
            // /embed/<id>, /shorts/<id>, /v/<id> path-segment forms
            ExtractRule {
                name: "path-segment",
                pattern: compile(r"youtube\.com/(?:embed|shorts|v)/([0-9A-Za-z_-]{11})(?:[?&/]|$)")?,
            },
            // short-link domain form
            ExtractRule {
                name: "short-link",
                pattern: compile(r"youtu\.be/([0-9A-Za-z_-]{11})(?:[?&/]|$)")?,
            },
        ];
        Ok(Self { rules })
    }

    /// Extract the video id from a URL, trying rules in priority order.
    pub fn extract_id(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures(url)
                .and_then(|caps| caps.get(1))
                .map(|m| {
                    tracing::debug!(rule = rule.name, id = m.as_str(), "extracted video id");
                    m.as_str().to_string()
                })
        })
    }

    /// Derive a thumbnail URL for a video URL, or `None` when no rule matches.
    pub fn resolve_thumbnail(&self, url: &str) -> Option<String> {
        self.extract_id(url)
            .map(|id| THUMBNAIL_TEMPLATE.replace("{id}", &id))
    }

    /// Resolve a video URL into its presentation form.
    pub fn resolve(&self, url: &str) -> VideoRef {
        VideoRef {
            url: url.to_string(),
            thumbnail_url: self.resolve_thumbnail(url),
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::internal(format!("failed to compile video-id pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> VideoLinkResolver {
        VideoLinkResolver::new().unwrap()
    }

    #[test]
    fn extracts_id_from_watch_url() {
        let id = resolver()
            .extract_id("https://www.youtube.com/watch?v=j5UOdqtOudc")
            .unwrap();
        assert_eq!(id, "j5UOdqtOudc");
    }

    #[test]
    fn extracts_id_from_short_link() {
        let id = resolver()
            .extract_id("https://youtu.be/j5UOdqtOudc")
            .unwrap();
        assert_eq!(id, "j5UOdqtOudc");
    }

    #[test]
    fn extracts_id_from_path_segment_with_query() {
        let id = resolver()
            .extract_id("https://www.youtube.com/embed/j5UOdqtOudc?start=10")
            .unwrap();
        assert_eq!(id, "j5UOdqtOudc");
    }

    #[test]
    fn extracts_id_when_v_is_not_the_first_param() {
        let id = resolver()
            .extract_id("https://www.youtube.com/watch?list=PL123&v=j5UOdqtOudc&t=3")
            .unwrap();
        assert_eq!(id, "j5UOdqtOudc");
    }

    #[test]
    fn ignores_urls_without_a_video_id() {
        let r = resolver();
        // "not-a-video" happens to be 11 id-safe characters, but the domain
        // and shape are not a known video URL form.
        assert_eq!(r.extract_id("https://example.com/not-a-video"), None);
        assert_eq!(r.extract_id(""), None);
        // ten characters is too short to be an id
        assert_eq!(r.extract_id("https://youtu.be/shortid123"), None);
    }

    #[test]
    fn thumbnail_url_contains_the_id() {
        let thumb = resolver()
            .resolve_thumbnail("https://www.youtube.com/watch?v=j5UOdqtOudc")
            .unwrap();
        assert_eq!(thumb, "https://img.youtube.com/vi/j5UOdqtOudc/hqdefault.jpg");
    }

    #[test]
    fn unmatched_url_resolves_to_plain_link() {
        let video = resolver().resolve("https://example.com/not-a-video");
        assert_eq!(video.url, "https://example.com/not-a-video");
        assert_eq!(video.thumbnail_url, None);
    }

    #[test]
    fn matched_url_keeps_original_link_target() {
        let video = resolver().resolve("https://www.youtube.com/watch?v=j5UOdqtOudc&t=42");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=j5UOdqtOudc&t=42");
        assert!(video.thumbnail_url.unwrap().contains("j5UOdqtOudc"));
    }
}
