//! Post search and the listing views built on top of it.
//!
//! The search box matches a free-text query against
//! `title + summary + tags joined by spaces`, case-insensitively. It runs on
//! every keystroke over the whole collection; at blog scale a linear scan
//! per query is all it needs.

use crate::content::Post;
use serde::Serialize;

/// Posts whose search text contains `query`, in their original order.
///
/// An empty query matches every post.
pub fn filter_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    if query.is_empty() {
        return posts.iter().collect();
    }

    let needle = query.to_lowercase();
    posts
        .iter()
        .filter(|post| post.search_content().to_lowercase().contains(&needle))
        .collect()
}

/// What the list page shows for the current query.
#[derive(Debug)]
pub struct ListingView<'a> {
    /// Posts to render, in order.
    pub posts: Vec<&'a Post>,
    /// The query matched nothing; render the "No posts found." fallback.
    pub no_results: bool,
    /// Pagination controls are shown only for an unfiltered, multi-page list.
    pub show_pagination: bool,
}

/// Decide what the list page displays.
///
/// Without a query the current page slice (`initial`) is shown when there is
/// one; otherwise the filtered collection is shown. `total_pages` is only
/// used to decide whether the pager is visible.
pub fn listing_view<'a>(
    posts: &'a [Post],
    initial: &'a [Post],
    query: &str,
    total_pages: usize,
) -> ListingView<'a> {
    let filtered = filter_posts(posts, query);
    let no_results = filtered.is_empty();

    let posts = if !initial.is_empty() && query.is_empty() {
        initial.iter().collect()
    } else {
        filtered
    };

    ListingView {
        posts,
        no_results,
        show_pagination: total_pages > 1 && query.is_empty(),
    }
}

/// Posts shown on the home page.
#[derive(Debug)]
pub struct RecentPosts<'a> {
    pub posts: &'a [Post],
    /// More posts exist than are shown; render the "All Posts" link.
    pub has_more: bool,
}

pub fn recent_posts(posts: &[Post], max_display: usize) -> RecentPosts<'_> {
    RecentPosts {
        posts: &posts[..posts.len().min(max_display)],
        has_more: posts.len() > max_display,
    }
}

/// One entry of the JSON search index shipped with the site.
#[derive(Debug, Serialize)]
pub struct SearchEntry<'a> {
    pub path: String,
    pub title: &'a str,
    pub summary: &'a str,
    pub tags: &'a [String],
    pub date: String,
}

/// Build the search index consumed by the list page.
///
/// Takes any sequence of borrowed posts, so a filtered subset is indexed
/// without copying it.
pub fn search_index<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    listing_base: &str,
) -> Vec<SearchEntry<'a>> {
    posts
        .into_iter()
        .map(|post| SearchEntry {
            path: format!("/{}", post.path(listing_base)),
            title: &post.title,
            summary: &post.summary,
            tags: &post.tags,
            date: post.date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}
