//! Redirect derivation.
//!
//! Every entry in the blog directory gets a short URL: `/{slug}` redirects
//! permanently to `/blog/{slug}`. Rules are derived once per build, in
//! directory-listing order (sorted by file name), and written out for the
//! static host in two forms:
//!
//! ```text
//! _redirects       /budgie-10-8-released /blog/budgie-10-8-released 301
//! redirects.json   [{"source": "/budgie-10-8-released", ...}]
//! ```
//!
//! Slugs are not de-duplicated. `post.md` and `post.mdx` both produce a
//! `/post` rule; hosts that read the table top to bottom apply the first.

use crate::naming::parse_content_name;
use crate::scan::{self, ScanError};
use crate::types::RedirectRule;
use std::path::Path;

/// Derive one permanent redirect per file name, in input order.
pub fn derive_redirects<S: AsRef<str>>(file_names: &[S]) -> Vec<RedirectRule> {
    file_names
        .iter()
        .map(|name| {
            let slug = parse_content_name(name.as_ref()).slug;
            RedirectRule {
                source: format!("/{slug}"),
                destination: format!("/blog/{slug}"),
                permanent: true,
            }
        })
        .collect()
}

/// List a content directory and derive its redirects.
///
/// An unreadable or missing directory is an error; the build cannot continue
/// without its redirect table.
pub fn scan_redirects(dir: &Path) -> Result<Vec<RedirectRule>, ScanError> {
    let names = scan::list_entry_names(dir)?;
    Ok(derive_redirects(&names))
}

/// Render rules in the `_redirects` table format, one rule per line.
pub fn render_redirects_file(rules: &[RedirectRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&format!(
            "{} {} {}\n",
            rule.source,
            rule.destination,
            rule.status_code()
        ));
    }
    out
}
