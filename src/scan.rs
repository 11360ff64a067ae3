//! Content discovery.
//!
//! Lists the blog directory once per build and turns it into a [`Manifest`]:
//! the redirect table (one rule per entry) and the markdown posts to render.
//!
//! ```text
//! content/blog/
//! ├── budgie-10-8-released.mdx   # redirect + post
//! ├── state-of-the-budgie.md     # redirect + post
//! └── press-kit.pdf              # redirect only (not a markdown page)
//! ```
//!
//! Entries are sorted by file name so the redirect table does not depend on
//! the filesystem's listing order.

use crate::config::SiteConfig;
use crate::naming::parse_content_name;
use crate::redirects::derive_redirects;
use crate::types::{BlogPost, RedirectRule};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions rendered as markdown posts (when also listed as page extensions).
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read blog post {0}: {1}")]
    Post(PathBuf, std::io::Error),
    #[error("File name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),
}

/// Everything discovered in the content directory.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub redirects: Vec<RedirectRule>,
    pub posts: Vec<BlogPost>,
}

/// List the names of every entry in `dir`, sorted.
///
/// Names become URL path segments, so a name that is not valid UTF-8 is an
/// error rather than a lossy slug.
pub fn list_entry_names(dir: &Path) -> Result<Vec<String>, ScanError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(|_| ScanError::NonUtf8Name(entry.path()))?;
        names.push(name);
    }
    names.sort();
    Ok(names)
}

pub fn scan(root: &Path, config: &SiteConfig) -> Result<Manifest, ScanError> {
    let blog_dir = root.join(&config.blog_dir);
    let names = list_entry_names(&blog_dir)?;
    let redirects = derive_redirects(&names);

    let mut posts = Vec::new();
    for name in &names {
        let parsed = parse_content_name(name);
        let Some(ext) = parsed.extension.as_deref() else {
            continue;
        };
        let is_markdown = MARKDOWN_EXTENSIONS
            .iter()
            .any(|m| m.eq_ignore_ascii_case(ext));
        let path = blog_dir.join(name);
        if !parsed.is_path_safe()
            || !is_markdown
            || !config.is_page_extension(ext)
            || !path.is_file()
        {
            continue;
        }
        let body = fs::read_to_string(&path).map_err(|e| ScanError::Post(path.clone(), e))?;
        posts.push(parse_post(parsed.slug, body));
    }

    Ok(Manifest { redirects, posts })
}

/// Build a post from its slug and markdown body.
///
/// The title is the first `# heading`; the slug stands in when there is none.
pub fn parse_post(slug: String, body: String) -> BlogPost {
    let title = body
        .lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .unwrap_or_else(|| slug.clone());
    BlogPost { slug, title, body }
}
