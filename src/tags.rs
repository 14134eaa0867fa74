//! Tag index: counts for the tag cloud and post lists per tag.

use crate::{content::Post, utils::slug::slugify_tag};
use std::collections::HashMap;

/// One tag with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Count tags across posts, most used first; equal counts ordered by name.
///
/// Tags with no sluggable characters (e.g. `+++`) have no page and are left out.
pub fn tag_counts(posts: &[Post]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in posts.iter().flat_map(|p| &p.tags) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(name, count)| TagCount {
            name: name.to_owned(),
            slug: slugify_tag(name),
            count,
        })
        .filter(|tag| !tag.slug.is_empty())
        .collect();

    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    tags
}

/// Posts whose tags slugify to `slug`, keeping collection order.
///
/// Matching on the slug groups `Next JS` and `next-js` under one page.
pub fn posts_with_tag<'a>(posts: &'a [Post], slug: &str) -> Vec<&'a Post> {
    if slug.is_empty() {
        return Vec::new();
    }
    posts
        .iter()
        .filter(|post| post.tags.iter().any(|tag| slugify_tag(tag) == slug))
        .collect()
}

/// Merge tags that share a slug, summing their counts.
///
/// The first-listed spelling (i.e. the most used) names the group.
pub fn group_by_slug(counts: Vec<TagCount>) -> Vec<TagCount> {
    let mut grouped: Vec<TagCount> = Vec::with_capacity(counts.len());
    for tag in counts {
        match grouped.iter_mut().find(|t| t.slug == tag.slug) {
            Some(existing) => existing.count += tag.count,
            None => grouped.push(tag),
        }
    }
    grouped.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, tags: &[&str]) -> Post {
        Post::new(slug, slug, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_tags(tags.iter().copied())
    }

    #[test]
    fn test_tag_counts_sorted_by_count_then_name() {
        let posts = vec![
            post("a", &["aws", "cloud"]),
            post("b", &["linux", "cloud"]),
            post("c", &["bash"]),
        ];
        let counts = tag_counts(&posts);
        let names: Vec<_> = counts.iter().map(|t| (t.name.as_str(), t.count)).collect();
        assert_eq!(
            names,
            vec![("cloud", 2), ("aws", 1), ("bash", 1), ("linux", 1)]
        );
    }

    #[test]
    fn test_tag_counts_empty() {
        assert!(tag_counts(&[]).is_empty());
    }

    #[test]
    fn test_tag_slug() {
        let counts = tag_counts(&[post("a", &["System Design"])]);
        assert_eq!(counts[0].slug, "system-design");
    }

    #[test]
    fn test_unsluggable_tags_skipped() {
        let posts = vec![post("a", &["+++", "rust"]), post("b", &["!!"])];
        let counts = tag_counts(&posts);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].slug, "rust");

        assert!(posts_with_tag(&posts, "").is_empty());
    }

    #[test]
    fn test_posts_with_tag_by_slug() {
        let posts = vec![
            post("a", &["Next JS"]),
            post("b", &["next-js"]),
            post("c", &["rust"]),
        ];
        let found: Vec<_> = posts_with_tag(&posts, "next-js")
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(found, vec!["a", "b"]);
    }

    #[test]
    fn test_group_by_slug_merges_spellings() {
        let posts = vec![
            post("a", &["Next JS"]),
            post("b", &["next-js"]),
            post("c", &["next-js", "rust"]),
        ];
        let grouped = group_by_slug(tag_counts(&posts));
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].name, "next-js");
        assert_eq!(grouped[0].count, 3);
        assert_eq!(grouped[1].name, "rust");
    }
}
