//! Shared test utilities for the budgie-site test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), &SiteConfig::default()).unwrap();
//! let post = find_post(&manifest, "budgie-10-8-released");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::i18n::{self, Messages};
use crate::scan::Manifest;
use crate::types::BlogPost;

// =========================================================================
// Fixture setup
// =========================================================================

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

/// Copy `fixtures/site/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixtures_root(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// The fixture English bundle, read in place.
pub fn english_messages() -> Messages {
    i18n::load_messages(&fixtures_root().join("messages"), "en").unwrap()
}

// =========================================================================
// Lookups — panic with a clear message on miss
// =========================================================================

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a BlogPost {
    manifest
        .posts
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.posts.iter().map(|p| p.slug.as_str()).collect();
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}

// =========================================================================
// Markup assertions
// =========================================================================

/// Whether the rendered tab panel `idx` carries the `hidden` attribute.
pub fn panel_is_hidden(html: &str, idx: usize) -> bool {
    let marker = format!(r#"id="home-tabpanel-{idx}""#);
    let pos = html
        .find(&marker)
        .unwrap_or_else(|| panic!("tab panel {idx} not rendered"));
    let tag_start = html[..pos].rfind('<').unwrap();
    let tag_end = pos + html[pos..].find('>').unwrap();
    let tag = &html[tag_start..tag_end];
    tag.split_whitespace().any(|attr| attr == "hidden")
}
