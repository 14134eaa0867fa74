//! RSS feed generation.

use crate::{config::SiteConfig, content::Post, log};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use regex::Regex;
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::{fs, sync::LazyLock};

/// Write the feed when `[build.rss].enable` is set.
pub fn build_feed(config: &SiteConfig, posts: &[Post]) -> Result<()> {
    if !config.build.rss.enable {
        return Ok(());
    }

    let xml = feed_xml(config, posts)?;
    let path = config.build.output.join(&config.build.rss.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, xml).with_context(|| format!("Failed to write {}", path.display()))?;

    log!("rss"; "{}", path.file_name().unwrap_or_default().to_string_lossy());
    Ok(())
}

/// Render the channel for `posts` and validate it.
fn feed_xml(config: &SiteConfig, posts: &[Post]) -> Result<String> {
    let items: Vec<_> = posts.iter().map(|post| post_to_item(post, config)).collect();

    let channel = ChannelBuilder::default()
        .title(&config.base.title)
        .link(config.base.site_url())
        .description(&config.base.description)
        .language(config.base.language.clone())
        .generator("almanac".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("rss validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn post_to_item(post: &Post, config: &SiteConfig) -> rss::Item {
    let link = format!(
        "{}/{}/",
        config.base.site_url(),
        post.path(&config.listing.base)
    );
    let pub_date = post.date.and_time(NaiveTime::MIN).and_utc().to_rfc2822();

    ItemBuilder::default()
        .title(post.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description((!post.summary.is_empty()).then(|| post.summary.clone()))
        .pub_date(pub_date)
        .author(rss_author(config))
        .categories(
            post.tags
                .iter()
                .map(|tag| rss::CategoryBuilder::default().name(tag.clone()).build())
                .collect::<Vec<_>>(),
        )
        .build()
}

/// Author in RSS form: `email@example.com (Name)`.
///
/// Priority:
/// 1. Site author if already in valid format
/// 2. Site email and author combined
///
/// Returns `None` when neither is valid (e.g. no email configured).
fn rss_author(config: &SiteConfig) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$").unwrap()
    });

    let author = &config.base.author;
    if RE_VALID_AUTHOR.is_match(author) {
        return Some(author.clone());
    }

    let combined = format!("{} ({})", config.base.email, author);
    RE_VALID_AUTHOR.is_match(&combined).then_some(combined)
}
