//! # Budgie Site
//!
//! Static site builder for the Buddies of Budgie website: the landing page,
//! short redirects for every blog post, localized text, and the settings a
//! static host needs to serve the result.
//!
//! # Architecture: One Build Pass
//!
//! ```text
//! site.toml          →  SiteConfig        (stock defaults + overrides)
//! content/blog/      →  redirects, posts  (one rule per entry)
//! messages/*.json    →  Messages          (one bundle per locale)
//!                    →  dist/             (HTML, _redirects, settings.json)
//! ```
//!
//! Everything except [`generate`] is a pure transform over its inputs, so the
//! redirect rules, head metadata and page markup are tested without touching
//! the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `site.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | File name → slug |
//! | [`redirects`] | Blog listing → permanent `/{slug}` → `/blog/{slug}` rules |
//! | [`build_id`] | `BUILD_ID` or millisecond timestamp |
//! | [`i18n`] | Locale message bundles with dotted-key lookup |
//! | [`meta`] | Document head composition (title suffix, favicon, Open Graph) |
//! | [`home`] | Landing page composition and feature tab state |
//! | [`scan`] | Blog directory discovery |
//! | [`generate`] | The build: renders pages, writes host files |
//! | [`output`] | CLI output formatting |
//! | [`types`] | Types serialized into the output manifests |
//!
//! # Design Decisions
//!
//! ## Redirects Instead of Duplicate Pages
//!
//! Posts live at `/blog/{slug}`. Old links used `/{slug}`, so each blog
//! entry gets a permanent redirect rather than a second copy of the page.
//! The table is written as `_redirects` for hosts that read it and as
//! `redirects.json` for everything else.
//!
//! ## No Fallback Locale
//!
//! A locale listed in `site.toml` without a bundle fails the build. Missing
//! individual keys render as the key itself and are reported by
//! `budgie-site check`.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): templates are
//! checked at compile time and all interpolation is escaped, which matters
//! here because every visible string comes from translator-supplied JSON.

pub mod build_id;
pub mod config;
pub mod generate;
pub mod home;
pub mod i18n;
pub mod meta;
pub mod naming;
pub mod output;
pub mod redirects;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
