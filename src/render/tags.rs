//! Tag cloud page.

use super::{PageMeta, Scripts, document, escape};
use crate::{config::SiteConfig, tags::TagCount, utils::slug::tag_label};
use std::{borrow::Cow, fmt::Write};

/// Every tag with its post count, in the order given.
pub fn render_tags(config: &SiteConfig, tags: &[TagCount]) -> String {
    let mut main = String::from("<header><h1>Tags</h1></header>\n<div class=\"tag-cloud\">\n");
    if tags.is_empty() {
        main.push_str("No tags found.");
    }
    for tag in tags {
        let _ = writeln!(
            main,
            r#"<div class="tag-item"><a class="tag" href="/tags/{slug}">{label}</a> <a href="/tags/{slug}" aria-label="View posts tagged {name}">({count})</a></div>"#,
            slug = escape(&tag.slug),
            label = escape(&tag_label(&tag.name)),
            name = escape(&tag.name),
            count = tag.count,
        );
    }
    main.push_str("</div>");

    let meta = PageMeta {
        title: Cow::Borrowed("Tags"),
        description: Some("Things I blog about"),
        path: "tags/".into(),
        ..PageMeta::default()
    };
    document(config, &meta, Scripts::default(), &main)
}
