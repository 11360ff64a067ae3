//! Document head metadata.
//!
//! Every page describes its head with [`MetaProps`]: a title, an optional
//! favicon, and optional Open Graph pairs. [`compose_head`] turns those into
//! the concrete [`HeadMeta`] (site-name suffix, default icon, the `rel="me"`
//! profile link), and [`render_head`] emits the elements.

use crate::config::SiteConfig;
use maud::{Markup, html};

/// Per-page head inputs.
#[derive(Debug, Clone, Default)]
pub struct MetaProps {
    pub title: String,
    /// Defaults to the site favicon.
    pub icon: Option<String>,
    /// Open Graph pairs without the `og:` prefix, e.g. `("type", "website")`.
    pub og_meta: Vec<(String, String)>,
}

impl MetaProps {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// One `<meta property=... content=...>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct OgTag {
    pub property: String,
    pub content: String,
}

/// Fully resolved head metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadMeta {
    pub title: String,
    pub charset: &'static str,
    pub icon: String,
    pub me_link: String,
    pub og: Vec<OgTag>,
}

pub fn compose_head(props: &MetaProps, config: &SiteConfig) -> HeadMeta {
    HeadMeta {
        title: format!("{} | {}", props.title, config.site_name),
        charset: "utf-8",
        icon: props
            .icon
            .clone()
            .unwrap_or_else(|| config.default_icon.clone()),
        me_link: config.social_profile.clone(),
        og: props
            .og_meta
            .iter()
            .map(|(key, value)| OgTag {
                property: format!("og:{key}"),
                content: value.clone(),
            })
            .collect(),
    }
}

pub fn render_head(head: &HeadMeta) -> Markup {
    html! {
        title { (head.title) }
        meta charset=(head.charset);
        link rel="icon" href=(head.icon);
        link rel="me" href=(head.me_link);
        @for tag in &head.og {
            meta property=(tag.property) content=(tag.content);
        }
    }
}
