//! Shared types written to the output manifests.
//!
//! These are serialized into `redirects.json` and `settings.json`, so field
//! names are part of the output format.

use serde::{Deserialize, Serialize};

/// A build-time redirect applied by the static host.
///
/// Computed once per build from the blog directory listing and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    pub source: String,
    pub destination: String,
    /// `true` for a 301, `false` for a 302.
    pub permanent: bool,
}

impl RedirectRule {
    /// HTTP status code the host should answer with.
    pub fn status_code(&self) -> u16 {
        if self.permanent { 301 } else { 302 }
    }
}

/// A blog post parsed from a markdown file in the blog directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// URL slug (file name without extension)
    pub slug: String,
    /// Title from first `# heading`, or the slug as fallback
    pub title: String,
    /// Raw markdown body
    pub body: String,
}
