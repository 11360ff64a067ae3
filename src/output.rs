//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Build 1718040000000
//!
//! Pages
//! 001 en → index.html
//! 002 de → de/index.html
//!
//! Blog
//! 001 Budgie 10.8 Released → blog/budgie-10-8-released/index.html
//!
//! Redirects
//! 001 /budgie-10-8-released → /blog/budgie-10-8-released (301)
//!
//! Generated 2 pages, 1 post, 1 redirect, 3 assets
//! ```
//!
//! ## Check
//!
//! ```text
//! Locales
//! 001 en (24 messages)
//! 002 de (22 messages)
//!     Missing: Home.Hero.Text
//! ```

use crate::generate::{BuildReport, GeneratedPage};
use crate::types::RedirectRule;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn page_lines(pages: &[GeneratedPage]) -> Vec<String> {
    pages
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{} {} → {}", format_index(i + 1), p.title, p.path))
        .collect()
}

// ============================================================================
// Redirects
// ============================================================================

pub fn format_redirects(rules: &[RedirectRule]) -> Vec<String> {
    let mut lines = vec!["Redirects".to_string()];
    if rules.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, rule) in rules.iter().enumerate() {
        lines.push(format!(
            "{} {} → {} ({})",
            format_index(i + 1),
            rule.source,
            rule.destination,
            rule.status_code()
        ));
    }
    lines
}

pub fn print_redirects(rules: &[RedirectRule]) {
    for line in format_redirects(rules) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!("Build {}", report.build_id), String::new()];

    lines.push("Pages".to_string());
    lines.extend(page_lines(&report.home_pages));

    if !report.posts.is_empty() {
        lines.push(String::new());
        lines.push("Blog".to_string());
        lines.extend(page_lines(&report.posts));
    }

    lines.push(String::new());
    lines.extend(format_redirects(&report.redirects));

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for warning in &report.warnings {
            lines.push(format!("    {}", warning));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}",
        plural(report.home_pages.len(), "page"),
        plural(report.posts.len(), "post"),
        plural(report.redirects.len(), "redirect"),
        plural(report.assets_copied, "asset"),
    ));
    lines
}

pub fn print_build_output(report: &BuildReport) {
    for line in format_build_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// One locale's result from `check`.
#[derive(Debug)]
pub struct LocaleCheck<'a> {
    pub locale: &'a str,
    pub message_count: usize,
    pub missing: Vec<&'a str>,
}

pub fn format_check_output(locales: &[LocaleCheck<'_>]) -> Vec<String> {
    let mut lines = vec!["Locales".to_string()];
    for (i, check) in locales.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            check.locale,
            plural(check.message_count, "message")
        ));
        if !check.missing.is_empty() {
            lines.push(format!("    Missing: {}", check.missing.join(", ")));
        }
    }
    lines
}

pub fn print_check_output(locales: &[LocaleCheck<'_>]) {
    for line in format_check_output(locales) {
        println!("{}", line);
    }
}
