//! HTML minification for written pages.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// Minify a rendered page when `[build].minify` is on.
///
/// Returns the input untouched (`Cow::Borrowed`) when disabled.
pub fn minify_page<'a>(html: &'a str, config: &SiteConfig) -> Cow<'a, str> {
    if !config.build.minify {
        return Cow::Borrowed(html);
    }

    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;

    let minified = minify_html::minify(html.as_bytes(), &cfg);
    Cow::Owned(String::from_utf8_lossy(&minified).into_owned())
}
