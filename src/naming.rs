//! Slug parsing for content file names.
//!
//! Every blog entry is addressed by its slug: the file name with the final
//! extension removed. The slug is used verbatim as a URL path segment, both
//! for the short redirect (`/{slug}`) and for the post itself
//! (`/blog/{slug}`).
//!
//! - `budgie-10-8-released.mdx` → slug `budgie-10-8-released`, extension `mdx`
//! - `notes.draft.md` → slug `notes.draft`, extension `md`
//! - `README` → slug `README`, no extension

/// Result of parsing a content file name.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentName {
    /// File name without its final extension.
    pub slug: String,
    /// Final extension without the dot, if any.
    pub extension: Option<String>,
}

/// Split a file name into slug and extension.
///
/// A leading dot does not start an extension, so `.draft` is its own slug.
pub fn parse_content_name(file_name: &str) -> ContentName {
    match file_name.rfind('.') {
        Some(dot) if dot > 0 => ContentName {
            slug: file_name[..dot].to_string(),
            extension: Some(file_name[dot + 1..].to_string()).filter(|e| !e.is_empty()),
        },
        _ => ContentName {
            slug: file_name.to_string(),
            extension: None,
        },
    }
}

impl ContentName {
    /// Whether the slug can be joined onto an output directory as a single
    /// path segment. `.` and `..` would resolve to the parent page.
    pub fn is_path_safe(&self) -> bool {
        !matches!(self.slug.as_str(), "" | "." | "..") && !self.slug.contains(['/', '\\'])
    }
}
