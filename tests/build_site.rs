//! End-to-end build of a small two-locale site.

use budgie_site::generate::{GenerateError, generate};
use budgie_site::home::REQUIRED_KEYS;
use budgie_site::i18n::load_messages;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Bundle defining every homepage key as `"{prefix} {key}"`.
fn bundle(prefix: &str) -> String {
    let entries: serde_json::Map<String, serde_json::Value> = REQUIRED_KEYS
        .iter()
        .map(|k| (k.to_string(), format!("{prefix} {k}").into()))
        .collect();
    serde_json::to_string(&entries).unwrap()
}

fn two_locale_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(
        &root.join("site.toml"),
        r#"
[i18n]
locales = ["en", "de"]
default_locale = "en"

[links]
get_budgie = "https://buddiesofbudgie.org/download"
"#,
    );
    write(&root.join("content/blog/hello-world.mdx"), "# Hello World\n");
    write(&root.join("content/blog/second-post.md"), "# Second Post\n");
    write(&root.join("messages/en.json"), &bundle("EN"));
    write(&root.join("messages/de.json"), &bundle("DE"));
    write(&root.join("public/images/logo.svg"), "<svg/>");
    tmp
}

#[test]
fn builds_every_locale_and_post() {
    let site = two_locale_site();
    let out = TempDir::new().unwrap();
    let report = generate(site.path(), out.path(), "abc123").unwrap();

    assert_eq!(report.home_pages.len(), 2);
    assert_eq!(report.posts.len(), 2);
    assert_eq!(report.assets_copied, 1);

    let en = fs::read_to_string(out.path().join("index.html")).unwrap();
    let de = fs::read_to_string(out.path().join("de/index.html")).unwrap();
    assert!(en.contains(r#"<html lang="en">"#));
    assert!(de.contains(r#"<html lang="de">"#));
    assert!(en.contains("EN Home.Tabs.MenuHeader"));
    assert!(de.contains("DE Home.Tabs.MenuHeader"));
    assert!(de.contains(r#"hreflang="en""#));
    assert!(en.contains("https://buddiesofbudgie.org/download"));

    let post = fs::read_to_string(out.path().join("blog/hello-world/index.html")).unwrap();
    assert!(post.contains("<title>Hello World | Buddies of Budgie</title>"));
}

#[test]
fn redirect_table_matches_blog_listing() {
    let site = two_locale_site();
    let out = TempDir::new().unwrap();
    generate(site.path(), out.path(), "abc123").unwrap();

    let rules: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(out.path().join("redirects.json")).unwrap())
            .unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0]["source"], "/hello-world");
    assert_eq!(rules[0]["destination"], "/blog/hello-world");
    assert_eq!(rules[0]["permanent"], true);
    assert_eq!(rules[1]["source"], "/second-post");

    assert_eq!(
        fs::read_to_string(out.path().join("_redirects")).unwrap(),
        "/hello-world /blog/hello-world 301\n/second-post /blog/second-post 301\n"
    );
}

#[test]
fn locale_without_bundle_fails_build() {
    let site = two_locale_site();
    fs::remove_file(site.path().join("messages/de.json")).unwrap();
    let out = TempDir::new().unwrap();
    let err = generate(site.path(), out.path(), "x").unwrap_err();
    assert!(matches!(err, GenerateError::I18n(_)));
    assert!(err.to_string().contains("de.json"));
}

#[test]
fn invalid_config_fails_build() {
    let site = two_locale_site();
    write(
        &site.path().join("site.toml"),
        "[i18n]\nlocales = [\"en\"]\ndefault_locale = \"fr\"\n",
    );
    let out = TempDir::new().unwrap();
    assert!(matches!(
        generate(site.path(), out.path(), "x"),
        Err(GenerateError::Config(_))
    ));
}

#[test]
fn generated_bundles_cover_homepage() {
    let site = two_locale_site();
    let messages = load_messages(&site.path().join("messages"), "de").unwrap();
    assert!(messages.missing_keys(REQUIRED_KEYS).is_empty());
}
