//! Landing page composition.
//!
//! The homepage is a fixed tree:
//!
//! ```text
//! hero banner
//! feature tabs      two tabs, one image panel per tab
//! personalize banner
//! colour banners    "Built" (about) and "Get" (download)
//! ```
//!
//! All visible text goes through [`Messages::t`]; the structure is the same
//! for every locale. The only state is the active tab. It starts at 0 on
//! every page load and `tabs.js` flips the `hidden` attribute client-side;
//! [`TabSelection`] is the server-side model of the same state, used for the
//! initial render.

use crate::config::SiteConfig;
use crate::i18n::Messages;
use maud::{Markup, html};
use thiserror::Error;

/// Preview size of the tab panel images.
pub const PREVIEW_WIDTH: u32 = 900;
pub const PREVIEW_HEIGHT: u32 = 506;

/// Number of entries in the feature tabs.
pub const BANNER_COUNT: usize = 2;

/// Translation keys the homepage renders.
pub const REQUIRED_KEYS: &[&str] = &[
    "Home.Hero.Header",
    "Home.Hero.Text",
    "Home.Tabs.MenuHeader",
    "Home.Tabs.MenuText",
    "Home.Tabs.MenuTabText",
    "Home.Tabs.RavenHeader",
    "Home.Tabs.RavenText",
    "Home.Tabs.RavenTabText",
    "Home.Personalize.Header",
    "Home.Personalize.Text",
    "Home.ColorBanner.Built.Header",
    "Home.ColorBanner.Built.Text",
    "Home.ColorBanner.Built.Button",
    "Home.ColorBanner.Get.Header",
    "Home.ColorBanner.Get.Text",
    "Get Budgie",
];

#[derive(Error, Debug, PartialEq)]
pub enum TabError {
    #[error("Tab index {index} out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },
}

/// A local image shown in a tab panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub src: &'static str,
}

/// One feature tab: its label and the panel it reveals.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBannerEntry {
    pub alt_text: &'static str,
    pub headline: String,
    pub image: ImageRef,
    pub body: String,
    pub tab_label: String,
}

/// The two feature tabs, in display order.
pub fn image_banner_entries(messages: &Messages) -> [ImageBannerEntry; BANNER_COUNT] {
    [
        ImageBannerEntry {
            alt_text: "Budgie Menu Image",
            headline: messages.t("Home.Tabs.MenuHeader").to_string(),
            image: ImageRef {
                src: "/images/BudgieMenu.png",
            },
            body: messages.t("Home.Tabs.MenuText").to_string(),
            tab_label: messages.t("Home.Tabs.MenuTabText").to_string(),
        },
        ImageBannerEntry {
            alt_text: "Raven",
            headline: messages.t("Home.Tabs.RavenHeader").to_string(),
            image: ImageRef {
                src: "/images/Raven-WidgetView.jpg",
            },
            body: messages.t("Home.Tabs.RavenText").to_string(),
            tab_label: messages.t("Home.Tabs.RavenTabText").to_string(),
        },
    ]
}

/// Active tab of the feature showcase. Always within `0..BANNER_COUNT`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TabSelection {
    active: usize,
}

impl TabSelection {
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn select(&mut self, index: usize) -> Result<(), TabError> {
        if index >= BANNER_COUNT {
            return Err(TabError::OutOfRange {
                index,
                len: BANNER_COUNT,
            });
        }
        self.active = index;
        Ok(())
    }
}

/// A gradient call-to-action panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBanner {
    pub background: &'static str,
    pub header: String,
    pub body: String,
    pub button_text: String,
    pub button_href: String,
    pub button_text_color: &'static str,
}

pub fn color_banners(messages: &Messages, config: &SiteConfig) -> [ColorBanner; 2] {
    [
        ColorBanner {
            background: "linear-gradient(to right, #9f7beb, #7b83eb)",
            header: messages.t("Home.ColorBanner.Built.Header").to_string(),
            body: messages.t("Home.ColorBanner.Built.Text").to_string(),
            button_text: messages.t("Home.ColorBanner.Built.Button").to_string(),
            button_href: config.links.about.clone(),
            button_text_color: "#9E7BEB",
        },
        ColorBanner {
            background: "linear-gradient(to right, #1687C7, #4DB2EC)",
            header: messages.t("Home.ColorBanner.Get.Header").to_string(),
            body: messages.t("Home.ColorBanner.Get.Text").to_string(),
            button_text: messages.t("Get Budgie").to_string(),
            button_href: config.links.get_budgie.clone(),
            button_text_color: "#1687C7",
        },
    ]
}

fn tab_id(idx: usize) -> String {
    format!("home-tab-{idx}")
}

fn panel_id(idx: usize) -> String {
    format!("home-tabpanel-{idx}")
}

/// Renders the landing page body.
pub fn render_home(messages: &Messages, config: &SiteConfig, selection: TabSelection) -> Markup {
    let entries = image_banner_entries(messages);
    let banners = color_banners(messages, config);

    html! {
        main.home-page {
            (hero_banner(messages, config))
            section.feature-tabs {
                div.tab-strip role="tablist" {
                    @for (idx, entry) in entries.iter().enumerate() {
                        @let selected = idx == selection.active();
                        button.tab type="button" role="tab" id=(tab_id(idx))
                            aria-controls=(panel_id(idx))
                            aria-selected=(if selected { "true" } else { "false" })
                            data-tab-index=(idx) {
                            (entry.tab_label)
                        }
                    }
                }
                @for (idx, entry) in entries.iter().enumerate() {
                    div.tab-panel role="tabpanel" id=(panel_id(idx))
                        aria-labelledby=(tab_id(idx))
                        hidden[idx != selection.active()] {
                        (lightbox_image(entry))
                        div.tab-copy {
                            h2.tab-headline { (entry.headline) }
                            p.tab-body { (entry.body) }
                        }
                    }
                }
            }
            (personalize_banner(messages))
            div.color-banners {
                @for banner in &banners {
                    (color_banner(banner))
                }
            }
        }
    }
}

fn hero_banner(messages: &Messages, config: &SiteConfig) -> Markup {
    html! {
        section.hero-banner {
            h1 { (messages.t("Home.Hero.Header")) }
            p.hero-text { (messages.t("Home.Hero.Text")) }
            a.button href=(config.links.get_budgie) { (messages.t("Get Budgie")) }
        }
    }
}

/// Preview-sized image that opens the full image.
fn lightbox_image(entry: &ImageBannerEntry) -> Markup {
    html! {
        a.lightbox href=(entry.image.src) target="_blank" {
            img src=(entry.image.src) alt=(entry.alt_text)
                width=(PREVIEW_WIDTH) height=(PREVIEW_HEIGHT) loading="lazy";
        }
    }
}

fn personalize_banner(messages: &Messages) -> Markup {
    html! {
        section.personalize-banner {
            h2 { (messages.t("Home.Personalize.Header")) }
            p { (messages.t("Home.Personalize.Text")) }
        }
    }
}

fn color_banner(banner: &ColorBanner) -> Markup {
    let style = format!("background: {};", banner.background);
    let button_style = format!("color: {};", banner.button_text_color);
    html! {
        div.color-banner style=(style) {
            h3 { (banner.header) }
            p { (banner.body) }
            a.button href=(banner.button_href) style=(button_style) { (banner.button_text) }
        }
    }
}
