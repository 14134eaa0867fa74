//! HTML rendering of every generated page.
//!
//! Pages are assembled from small string-building functions. All variable
//! text goes through [`escape`]; nothing here decides *what* is shown, that
//! is done by `search`, `paginate` and `tags`.
//!
//! | Module     | Pages                                  |
//! |------------|----------------------------------------|
//! | `listing`  | home, `/blog/`, `/blog/page/N`, tags/X |
//! | `post`     | `/blog/<slug>/`                        |
//! | `tags`     | `/tags/`                               |
//! | `projects` | `/projects/`                           |

mod listing;
mod post;
mod projects;
mod tags;

pub use listing::{render_home, render_listing, render_tag_page};
pub use post::render_post;
pub use projects::render_projects;
pub use tags::render_tags;

use crate::config::SiteConfig;
use std::{borrow::Cow, fmt::Write};

/// Client-side search over the JSON index.
const SEARCH_SCRIPT: &str = include_str!("../embed/search.js");

/// Reading progress bar driver.
const PROGRESS_SCRIPT: &str = include_str!("../embed/progress.js");

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// `<head>` metadata of one page.
#[derive(Debug, Default)]
pub struct PageMeta<'a> {
    pub title: Cow<'a, str>,
    pub description: Option<&'a str>,
    /// Site-relative path, used for the canonical link.
    pub path: String,
    pub image: Option<String>,
}

/// Extra scripts a page needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scripts {
    pub search: bool,
    pub progress: bool,
}

/// Wrap page content in the shared document shell.
pub fn document(config: &SiteConfig, meta: &PageMeta<'_>, scripts: Scripts, main: &str) -> String {
    let base = &config.base;
    let site_title = escape(&base.title);
    let title = if meta.title.is_empty() || meta.title == base.title {
        site_title.to_string()
    } else {
        format!("{} | {}", escape(&meta.title), site_title)
    };
    let description = escape(meta.description.unwrap_or(&base.description));
    let canonical = format!("{}/{}", base.site_url(), meta.path.trim_start_matches('/'));
    let listing = &config.listing.base;

    let mut html = String::with_capacity(main.len() + 2048);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:url" content="{canonical}">
"#,
        lang = escape(&base.language),
        canonical = escape(&canonical),
    );
    if let Some(image) = &meta.image {
        let _ = writeln!(html, r#"<meta property="og:image" content="{}">"#, escape(image));
    }
    if config.build.rss.enable {
        let _ = writeln!(
            html,
            r#"<link rel="alternate" type="application/rss+xml" title="{site_title}" href="/{}">"#,
            escape(&config.build.rss.path.to_string_lossy())
        );
    }
    let _ = write!(
        html,
        r#"<link rel="canonical" href="{canonical}">
</head>
<body>
<header class="site-header">
<a class="site-title" href="/">{site_title}</a>
<nav><a href="/{listing}/">Blog</a> <a href="/tags/">Tags</a> <a href="/projects/">Projects</a></nav>
</header>
<main>
{main}
</main>
<footer class="site-footer">{copyright}</footer>
"#,
        canonical = escape(&canonical),
        listing = escape(listing),
        copyright = escape(&base.copyright),
    );
    if scripts.search {
        let _ = writeln!(html, "<script>{SEARCH_SCRIPT}</script>");
    }
    if scripts.progress {
        let _ = writeln!(html, "<script>{PROGRESS_SCRIPT}</script>");
    }
    html.push_str("</body>\n</html>\n");
    html
}

/// Tag link, e.g. `<a class="tag" href="/tags/system-design">system-design</a>`.
fn tag_link(tag: &str) -> String {
    format!(
        r#"<a class="tag" href="/tags/{}">{}</a>"#,
        escape(&crate::utils::slug::slugify_tag(tag)),
        escape(&crate::utils::slug::tag_label(tag)),
    )
}

/// Page shown for unknown paths.
pub fn render_not_found(config: &SiteConfig) -> String {
    let meta = PageMeta {
        title: Cow::Borrowed("Page not found"),
        path: "404.html".into(),
        ..PageMeta::default()
    };
    let main = r#"<section class="not-found">
<h1>404</h1>
<p>Sorry we couldn't find this page.</p>
<a href="/">Back to homepage</a>
</section>"#;
    document(config, &meta, Scripts::default(), main)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Backend Almanac".into();
        config.base.description = "Notes & things".into();
        config.base.url = Some("https://almanac.example.com".into());
        config
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_document_title_and_canonical() {
        let meta = PageMeta {
            title: Cow::Borrowed("Tags"),
            path: "tags/".into(),
            ..PageMeta::default()
        };
        let html = document(&config(), &meta, Scripts::default(), "<p>x</p>");

        assert!(html.contains("<title>Tags | Backend Almanac</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="https://almanac.example.com/tags/">"#));
        assert!(html.contains("Notes &amp; things"));
        assert!(html.contains("<p>x</p>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_document_scripts() {
        let meta = PageMeta::default();
        let scripts = Scripts {
            search: true,
            progress: true,
        };
        let html = document(&config(), &meta, scripts, "");
        assert_eq!(html.matches("<script>").count(), 2);
    }

    #[test]
    fn test_search_script_handles_failed_index_fetch() {
        assert!(SEARCH_SCRIPT.contains(".catch("));
        assert!(SEARCH_SCRIPT.contains("Search is unavailable."));
    }

    #[test]
    fn test_tag_link() {
        assert_eq!(
            tag_link("System Design"),
            r#"<a class="tag" href="/tags/system-design">System-Design</a>"#
        );
    }

    #[test]
    fn test_not_found() {
        let html = render_not_found(&config());
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains("Page not found | Backend Almanac"));
    }
}
