//! Post lists: home page, paginated blog listing and per-tag pages.

use super::{PageMeta, Scripts, document, escape, tag_link};
use crate::{
    config::SiteConfig,
    content::Post,
    paginate::{Page, Pagination, page_href},
    search::{listing_view, recent_posts},
    tags::TagCount,
};
use std::{borrow::Cow, fmt::Write};

/// Post card flavours. One renderer serves every list on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    /// Title, tags and summary.
    Listing,
    /// Adds the date, reading time and a "Read more" link.
    Home,
}

fn render_card(post: &Post, listing_base: &str, variant: CardVariant) -> String {
    let href = format!("/{}", post.path(listing_base));
    let title = escape(&post.title);
    let tags: Vec<String> = post.tags.iter().map(|t| tag_link(t)).collect();

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<li class="post-card post-card--{variant}"><article>"#,
        variant = match variant {
            CardVariant::Listing => "listing",
            CardVariant::Home => "home",
        }
    );
    let _ = write!(html, r#"<h2><a href="{href}">{title}</a></h2>"#);

    if variant == CardVariant::Home {
        let _ = write!(
            html,
            r#"<time datetime="{}">{}</time>"#,
            post.date.format("%Y-%m-%d"),
            post.date.format("%B %-d, %Y"),
        );
    }

    let _ = write!(html, r#"<div class="tags">{}</div>"#, tags.join(" "));

    if variant == CardVariant::Home {
        let _ = write!(
            html,
            r#"<p class="reading-time">{}</p>"#,
            post.reading_time.text()
        );
    }

    let _ = write!(html, "<p>{}</p>", escape(&post.summary));

    if variant == CardVariant::Home {
        let _ = write!(
            html,
            r#"<a class="read-more" href="{href}" aria-label="Read more: &quot;{title}&quot;">Read more &rarr;</a>"#
        );
    }

    html.push_str("</article></li>");
    html
}

fn render_cards<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    listing_base: &str,
    variant: CardVariant,
) -> String {
    posts
        .into_iter()
        .map(|post| render_card(post, listing_base, variant))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Previous / "Page X of Y" / Next navigation.
fn render_pagination(pagination: &Pagination, base: &str) -> String {
    let previous = match pagination.previous_href(base) {
        Some(href) => format!(r#"<a href="{}" rel="prev">Previous</a>"#, escape(&href)),
        None => r#"<span class="disabled">Previous</span>"#.to_owned(),
    };
    let next = match pagination.next_href(base) {
        Some(href) => format!(r#"<a href="{}" rel="next">Next</a>"#, escape(&href)),
        None => r#"<span class="disabled">Next</span>"#.to_owned(),
    };
    format!(
        r#"<nav id="pagination" class="pagination">{previous}<span>Page {} of {}</span>{next}</nav>"#,
        pagination.current(),
        pagination.total(),
    )
}

/// One page of the blog listing with its search box.
pub fn render_listing(config: &SiteConfig, posts: &[Post], page: &Page<'_>) -> String {
    let base = &config.listing.base;
    let view = listing_view(posts, page.posts, "", page.pagination.total());

    let mut main = String::new();
    let _ = write!(
        main,
        r#"<header><h1>All Posts</h1></header>
<input id="post-search" type="text" placeholder="Search posts..." data-index="/{}">
<ul id="post-list">
"#,
        escape(&config.build.search.path.to_string_lossy()),
    );
    if view.no_results {
        main.push_str(r#"<p class="no-posts">No posts found.</p>"#);
    }
    main.push_str(&render_cards(view.posts, base, CardVariant::Listing));
    main.push_str("\n</ul>\n");
    if view.show_pagination {
        main.push_str(&render_pagination(&page.pagination, base));
    }

    let current = page.pagination.current();
    let meta = PageMeta {
        title: if current > 1 {
            Cow::Owned(format!("Blog - page {current}"))
        } else {
            Cow::Borrowed("Blog")
        },
        path: page_href(base, current),
        ..PageMeta::default()
    };
    let scripts = Scripts {
        search: config.build.search.enable,
        progress: false,
    };
    document(config, &meta, scripts, &main)
}

/// Home page: the most recent posts and a link to the full listing.
pub fn render_home(config: &SiteConfig, posts: &[Post]) -> String {
    let base = &config.listing.base;
    let recent = recent_posts(posts, config.listing.recent);

    let mut main = String::from("<header><h1>Recent Posts</h1></header>\n<ul class=\"post-list\">\n");
    if recent.posts.is_empty() {
        main.push_str(r#"<p class="no-posts">No posts found.</p>"#);
    }
    main.push_str(&render_cards(recent.posts, base, CardVariant::Home));
    main.push_str("\n</ul>\n");
    if recent.has_more {
        let _ = write!(
            main,
            r#"<div class="all-posts"><a href="/{}/" aria-label="All posts">All Posts &rarr;</a></div>"#,
            escape(base)
        );
    }

    let meta = PageMeta {
        title: Cow::Borrowed(config.base.title.as_str()),
        ..PageMeta::default()
    };
    document(config, &meta, Scripts::default(), &main)
}

/// Posts carrying one tag.
pub fn render_tag_page(config: &SiteConfig, tag: &TagCount, posts: &[&Post]) -> String {
    let mut main = String::new();
    let _ = writeln!(main, "<header><h1>{}</h1></header>", escape(&tag.name));
    main.push_str("<ul class=\"post-list\">\n");
    main.push_str(&render_cards(posts.iter().copied(), &config.listing.base, CardVariant::Listing));
    main.push_str("\n</ul>\n");

    let meta = PageMeta {
        title: Cow::Borrowed(tag.name.as_str()),
        description: Some("Things I blog about"),
        path: format!("tags/{}/", tag.slug),
        ..PageMeta::default()
    };
    document(config, &meta, Scripts::default(), &main)
}
