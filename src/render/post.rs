//! Single post page.

use super::{PageMeta, Scripts, document, escape, tag_link};
use crate::{blur::ContextTag, breadcrumb::breadcrumbs, config::SiteConfig, content::Post};
use std::{borrow::Cow, fmt::Write};

/// Intent link for sharing a post on X.
pub fn share_url(title: &str, url: &str) -> String {
    let text = format!("{title}\n\n📖 Read More:\n{url}\n");
    format!("https://x.com/intent/tweet?text={}", urlencoding::encode(&text))
}

fn render_breadcrumbs(path: &str) -> String {
    let items: Vec<String> = breadcrumbs(path)
        .into_iter()
        .map(|crumb| {
            if crumb.is_last {
                format!(r#"<li aria-current="page">{}</li>"#, escape(&crumb.label))
            } else {
                format!(
                    r#"<li><a href="{}">{}</a></li>"#,
                    escape(&crumb.href),
                    escape(&crumb.label)
                )
            }
        })
        .collect();
    format!(r#"<nav class="breadcrumbs"><ol>{}</ol></nav>"#, items.join(""))
}

/// Banner image with an inline placeholder shown until it loads.
fn render_banner(src: &str) -> String {
    format!(
        r#"<div class="banner"><img src="{src}" alt="" loading="lazy" style="background-image:url('{placeholder}');background-size:cover"></div>"#,
        src = escape(src),
        placeholder = ContextTag::Hero.blur_data_url(),
    )
}

/// Body text split on blank lines into paragraphs.
fn render_body(body: &str) -> String {
    body.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape(p)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn neighbour_link(post: Option<&Post>, base: &str, rel: &str, label: &str) -> String {
    match post {
        Some(post) => format!(
            r#"<a href="/{}" rel="{rel}">{label}: {}</a>"#,
            escape(&post.path(base)),
            escape(&post.title),
        ),
        None => String::new(),
    }
}

/// Render `posts[index]`. `posts` is sorted newest first, so the previous
/// article is the one after it in the slice.
pub fn render_post(config: &SiteConfig, posts: &[Post], index: usize) -> String {
    let post = &posts[index];
    let base = &config.listing.base;
    let path = format!("{}/", post.path(base));
    let canonical = format!("{}/{path}", config.base.site_url());

    let mut main = String::new();
    main.push_str(r#"<div id="reading-progress" class="reading-progress" style="width:0%"></div>"#);
    main.push('\n');
    main.push_str(&render_breadcrumbs(&path));
    main.push_str("\n<article class=\"post\">\n");
    if let Some(image) = post.images.first() {
        main.push_str(&render_banner(image));
    }
    let _ = write!(
        main,
        r#"<header><h1>{title}</h1><p class="meta"><time datetime="{iso}">{date}</time> · <span class="reading-time">{reading}</span></p><div class="tags">{tags}</div></header>
<div class="content">
{body}
</div>
"#,
        title = escape(&post.title),
        iso = post.date.format("%Y-%m-%d"),
        date = post.date.format("%B %-d, %Y"),
        reading = post.reading_time.text(),
        tags = post.tags.iter().map(|t| tag_link(t)).collect::<Vec<_>>().join(" "),
        body = render_body(&post.body),
    );
    let _ = writeln!(
        main,
        r#"<a class="share" href="{}" target="_blank" rel="noopener noreferrer">Share on X</a>"#,
        escape(&share_url(&post.title, &canonical)),
    );
    main.push_str("</article>\n");

    let previous = posts.get(index + 1);
    let next = index.checked_sub(1).and_then(|i| posts.get(i));
    if previous.is_some() || next.is_some() {
        let _ = write!(
            main,
            r#"<nav class="post-nav">{}{}</nav>"#,
            neighbour_link(previous, base, "prev", "Previous Article"),
            neighbour_link(next, base, "next", "Next Article"),
        );
    }

    let meta = PageMeta {
        title: Cow::Borrowed(post.title.as_str()),
        description: Some(post.summary.as_str()),
        path,
        image: post.images.first().cloned(),
    };
    let scripts = Scripts {
        search: false,
        progress: true,
    };
    document(config, &meta, scripts, &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, day: u32) -> Post {
        Post::new(slug, format!("Title {slug}"), NaiveDate::from_ymd_opt(2024, 3, day).unwrap())
            .with_summary("summary")
            .with_body("First paragraph.\n\nSecond <b>paragraph</b>.")
    }

    #[test]
    fn test_share_url() {
        let url = share_url("AWS Basics", "https://a.dev/blog/aws");
        assert_eq!(
            url,
            "https://x.com/intent/tweet?text=AWS%20Basics%0A%0A%F0%9F%93%96%20Read%20More%3A%0Ahttps%3A%2F%2Fa.dev%2Fblog%2Faws%0A"
        );
    }

    #[test]
    fn test_render_body_paragraphs() {
        let html = render_body("One.\n\n\n\nTwo <x>.\n");
        assert_eq!(html, "<p>One.</p>\n<p>Two &lt;x&gt;.</p>");
    }

    #[test]
    fn test_breadcrumbs_markup() {
        let html = render_breadcrumbs("blog/aws-basics/");
        assert!(html.contains(r#"<li><a href="/">Home</a></li>"#));
        assert!(html.contains(r#"<li><a href="/blog">blog</a></li>"#));
        assert!(html.contains(r#"<li aria-current="page">aws-basics</li>"#));
    }

    #[test]
    fn test_banner_has_hero_placeholder() {
        let html = render_banner("/img/a.png");
        assert!(html.contains(&ContextTag::Hero.blur_data_url()));
    }

    #[test]
    fn test_render_post_page() {
        let posts = vec![post("newer", 3), post("middle", 2), post("older", 1)];
        let config = SiteConfig::default();
        let html = render_post(&config, &posts, 1);

        assert!(html.contains("<h1>Title middle</h1>"));
        assert!(html.contains(r#"id="reading-progress""#));
        assert!(html.contains("<p>Second &lt;b&gt;paragraph&lt;/b&gt;.</p>"));
        assert!(html.contains(r#"href="/blog/older" rel="prev""#));
        assert!(html.contains(r#"href="/blog/newer" rel="next""#));
        assert!(html.contains("x.com/intent/tweet"));
        assert_eq!(html.matches("<script>").count(), 1);
    }

    #[test]
    fn test_render_only_post_has_no_nav() {
        let posts = vec![post("solo", 1)];
        let html = render_post(&SiteConfig::default(), &posts, 0);
        assert!(!html.contains("post-nav"));
        assert!(!html.contains("class=\"banner\""));
    }
}
