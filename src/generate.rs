//! Static site build.
//!
//! Turns a site directory into a deployable `dist/`. The build is a single
//! pass:
//!
//! 1. Load `site.toml` over the stock defaults.
//! 2. Scan the blog directory: redirect table and markdown posts.
//! 3. Load every locale's message bundle. All bundles load before the first
//!    page renders; a missing bundle fails the build.
//! 4. Render the landing page once per locale and every blog post.
//! 5. Copy `public/` and write the host-facing files.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html               # Landing page, default locale
//! ├── de/index.html            # Landing page, other locales
//! ├── blog/{slug}/index.html   # Blog posts
//! ├── _redirects               # Redirect table for the static host
//! ├── redirects.json
//! ├── settings.json            # Resolved build settings
//! ├── BUILD_ID
//! └── images/...               # Copied from public/
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (accent colour injected from config)
//! - `static/tabs.js`: Feature tab switching

use crate::config::{self, SiteConfig};
use crate::home::{self, TabSelection};
use crate::i18n::{self, Messages};
use crate::meta::{self, MetaProps};
use crate::redirects::render_redirects_file;
use crate::scan::{self, Manifest};
use crate::types::{BlogPost, RedirectRule};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Options, Parser, Tag, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Scan error: {0}")]
    Scan(#[from] scan::ScanError),
    #[error("Localization error: {0}")]
    I18n(#[from] i18n::I18nError),
}

/// The resolved settings a static host needs, written to `settings.json`.
///
/// Keys are camelCase throughout, nested tables included; `site.toml` keeps
/// its snake_case names.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkSettings<'a> {
    pub build_id: &'a str,
    pub redirects: &'a [RedirectRule],
    pub images: ImageSettings<'a>,
    pub i18n: LocaleSettings<'a>,
    pub page_extensions: &'a [String],
    pub large_page_data_bytes: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSettings<'a> {
    pub domains: &'a [String],
    pub formats: &'a [String],
    pub content_disposition_type: &'a str,
    pub content_security_policy: &'a str,
    pub dangerously_allow_svg: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSettings<'a> {
    pub locales: &'a [String],
    pub default_locale: &'a str,
}

impl<'a> FrameworkSettings<'a> {
    pub fn new(config: &'a SiteConfig, build_id: &'a str, redirects: &'a [RedirectRule]) -> Self {
        let images = &config.images;
        Self {
            build_id,
            redirects,
            images: ImageSettings {
                domains: &images.domains,
                formats: &images.formats,
                content_disposition_type: &images.content_disposition_type,
                content_security_policy: &images.content_security_policy,
                dangerously_allow_svg: images.dangerously_allow_svg,
            },
            i18n: LocaleSettings {
                locales: &config.i18n.locales,
                default_locale: &config.i18n.default_locale,
            },
            page_extensions: &config.page_extensions,
            large_page_data_bytes: config.large_page_data_bytes,
        }
    }
}

/// A page written by the build.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory.
    pub path: String,
}

/// Summary of a finished build, for CLI output.
#[derive(Debug)]
pub struct BuildReport {
    pub build_id: String,
    pub output_dir: PathBuf,
    pub redirects: Vec<RedirectRule>,
    pub home_pages: Vec<GeneratedPage>,
    pub posts: Vec<GeneratedPage>,
    pub assets_copied: usize,
    pub warnings: Vec<String>,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const TABS_JS: &str = include_str!("../static/tabs.js");

pub fn generate(
    root: &Path,
    output_dir: &Path,
    build_id: &str,
) -> Result<BuildReport, GenerateError> {
    let config = config::load_config(root)?;
    let manifest = scan::scan(root, &config)?;
    let bundles = i18n::load_all(&root.join(&config.messages_dir), &config.i18n.locales)?;

    let css = format!("{}\n\n{}", config::generate_theme_css(&config.theme), CSS_STATIC);

    fs::create_dir_all(output_dir)?;

    let public_dir = root.join(&config.public_dir);
    let assets_copied = if public_dir.is_dir() {
        copy_dir_recursive(&public_dir, output_dir)?
    } else {
        0
    };

    let mut warnings = Vec::new();
    let mut home_pages = Vec::new();
    for messages in &bundles {
        let page_data = serde_json::to_vec(messages.entries())?;
        if page_data.len() as u64 > config.large_page_data_bytes {
            warnings.push(format!(
                "{}: message bundle is {} bytes, over the {} byte page data limit",
                messages.locale,
                page_data.len(),
                config.large_page_data_bytes
            ));
        }

        let rel_path = home_page_path(&config, &messages.locale);
        let target = output_dir.join(&rel_path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let page = render_home_page(messages, &config, &css);
        fs::write(&target, page.into_string())?;
        home_pages.push(GeneratedPage {
            title: messages.locale.clone(),
            path: rel_path,
        });
    }

    for post in &manifest.posts {
        for url in post_image_urls(&post.body) {
            if !config.images.allows_remote(&url) {
                warnings.push(format!(
                    "blog/{}: image host not listed in images.domains: {url}",
                    post.slug
                ));
            }
        }
    }

    let posts = write_posts(&manifest, &config, &css, output_dir)?;

    write_host_files(&manifest.redirects, &config, build_id, output_dir)?;

    Ok(BuildReport {
        build_id: build_id.to_string(),
        output_dir: output_dir.to_path_buf(),
        redirects: manifest.redirects,
        home_pages,
        posts,
        assets_copied,
        warnings,
    })
}

/// Output path of a locale's landing page, relative to the output root.
pub fn home_page_path(config: &SiteConfig, locale: &str) -> String {
    if locale == config.i18n.default_locale {
        "index.html".to_string()
    } else {
        format!("{locale}/index.html")
    }
}

fn write_posts(
    manifest: &Manifest,
    config: &SiteConfig,
    css: &str,
    output_dir: &Path,
) -> Result<Vec<GeneratedPage>, GenerateError> {
    // Posts are not translated; they render under the default locale.
    let lang = config.i18n.default_locale.as_str();
    let mut pages = Vec::new();
    for post in &manifest.posts {
        let post_dir = output_dir.join("blog").join(&post.slug);
        fs::create_dir_all(&post_dir)?;
        let page = render_post_page(post, config, lang, css);
        fs::write(post_dir.join("index.html"), page.into_string())?;
        pages.push(GeneratedPage {
            title: post.title.clone(),
            path: format!("blog/{}/index.html", post.slug),
        });
    }
    Ok(pages)
}

fn write_host_files(
    redirects: &[RedirectRule],
    config: &SiteConfig,
    build_id: &str,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    fs::write(output_dir.join("_redirects"), render_redirects_file(redirects))?;
    fs::write(
        output_dir.join("redirects.json"),
        serde_json::to_string_pretty(redirects)?,
    )?;
    let settings = FrameworkSettings::new(config, build_id, redirects);
    fs::write(
        output_dir.join("settings.json"),
        serde_json::to_string_pretty(&settings)?,
    )?;
    fs::write(output_dir.join("BUILD_ID"), build_id)?;
    Ok(())
}

/// Copy every file under `src` into `dst`, keeping relative paths.
/// Returns the number of files copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(lang: &str, head: Markup, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(lang) {
            head {
                (head)
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Site header with the home link and, for multi-locale sites, a locale switcher.
fn site_header(config: &SiteConfig, current_locale: &str) -> Markup {
    let home_href = format!("{}/", config.i18n.path_prefix(current_locale));
    html! {
        header.site-header {
            a.site-logo href=(home_href) {
                img src=(config.default_icon) alt="" width="32" height="32";
                span { (config.site_name) }
            }
            @if config.i18n.locales.len() > 1 {
                nav.locale-switcher {
                    @for locale in &config.i18n.locales {
                        @let href = format!("{}/", config.i18n.path_prefix(locale));
                        a href=(href) hreflang=(locale)
                            class=[(locale == current_locale).then_some("current")] {
                            (locale)
                        }
                    }
                }
            }
        }
    }
}

/// Alternate-language links for the landing page.
fn locale_alternates(config: &SiteConfig) -> Markup {
    html! {
        @if config.i18n.locales.len() > 1 {
            @for locale in &config.i18n.locales {
                link rel="alternate" hreflang=(locale)
                    href={ (config.i18n.path_prefix(locale)) "/" };
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders a locale's landing page.
pub fn render_home_page(messages: &Messages, config: &SiteConfig, css: &str) -> Markup {
    let props = MetaProps {
        og_meta: vec![("type".to_string(), "website".to_string())],
        ..MetaProps::titled("Home")
    };
    let head = html! {
        (meta::render_head(&meta::compose_head(&props, config)))
        (locale_alternates(config))
    };

    let content = html! {
        (site_header(config, &messages.locale))
        (home::render_home(messages, config, TabSelection::default()))
        script { (PreEscaped(TABS_JS)) }
    };

    base_document(&messages.locale, head, css, content)
}

/// Renders a blog post from its markdown body.
pub fn render_post_page(post: &BlogPost, config: &SiteConfig, lang: &str, css: &str) -> Markup {
    let props = MetaProps {
        og_meta: vec![
            ("type".to_string(), "article".to_string()),
            ("title".to_string(), post.title.clone()),
        ],
        ..MetaProps::titled(post.title.clone())
    };
    let head = meta::render_head(&meta::compose_head(&props, config));

    let content = html! {
        (site_header(config, lang))
        main.post-page {
            article.post-content {
                (PreEscaped(render_markdown(&post.body)))
            }
        }
    };

    base_document(lang, head, css, content)
}

/// Markdown to HTML. The MDX preamble is dropped; components are not
/// evaluated.
fn render_markdown(body: &str) -> String {
    let parser = Parser::new_ext(strip_mdx_preamble(body), markdown_options());
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Skip the leading run of `import`/`export` lines (and blank lines between
/// them). Anything after the first other line is markdown, fenced code
/// included.
fn strip_mdx_preamble(body: &str) -> &str {
    let mut rest = body;
    while !rest.is_empty() {
        let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
        let line = line.trim_end();
        if !(line.is_empty() || line.starts_with("import ") || line.starts_with("export ")) {
            break;
        }
        rest = tail;
    }
    rest
}

/// Image URLs referenced by a post body, in document order.
fn post_image_urls(body: &str) -> Vec<String> {
    Parser::new_ext(strip_mdx_preamble(body), markdown_options())
        .filter_map(|event| match event {
            Event::Start(Tag::Image { dest_url, .. }) => Some(dest_url.into_string()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
