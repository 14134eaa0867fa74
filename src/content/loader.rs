//! Reading posts from the content directory.
//!
//! Every `.md` file under the content directory is one post:
//!
//! ```text
//! +++
//! title = "AWS Basics"
//! date = 2024-01-15
//! summary = "Getting started with the console"
//! tags = ["aws", "cloud"]
//! +++
//!
//! Body text, one paragraph per blank-line separated block.
//! ```
//!
//! The slug is the file stem unless the front matter sets `slug`.

use super::{ContentError, Post, compare_posts};
use crate::{log, utils::slug::slugify_path};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

const FRONT_MATTER_DELIMITER: &str = "+++";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrontMatter {
    title: String,
    /// TOML date literal or a `YYYY-MM-DD` string.
    date: toml::Value,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    slug: Option<String>,
}

/// Load all published posts, newest first.
pub fn load_posts(content_dir: &Path) -> Result<Vec<Post>> {
    if !content_dir.is_dir() {
        bail!("content directory `{}` not found", content_dir.display());
    }

    let files = collect_post_files(content_dir);
    let parsed = files
        .par_iter()
        .map(|path| {
            let raw = fs::read_to_string(path)
                .map_err(|err| ContentError::Io(path.clone(), err))?;
            parse_post(path, &raw)
        })
        .collect::<Result<Vec<_>, ContentError>>()?;

    let drafts = parsed.iter().filter(|p| p.is_none()).count();
    let mut posts: Vec<Post> = parsed.into_iter().flatten().collect();

    let mut seen = HashSet::new();
    for post in &posts {
        if !seen.insert(post.slug.as_str()) {
            return Err(ContentError::DuplicateSlug(post.slug.clone()))
                .with_context(|| format!("in `{}`", content_dir.display()));
        }
    }

    posts.sort_by(compare_posts);

    if drafts > 0 {
        log!("content"; "{} posts, {} drafts skipped", posts.len(), drafts);
    } else {
        log!("content"; "{} posts", posts.len());
    }

    Ok(posts)
}

/// `.md` files under `dir`, in a stable order.
fn collect_post_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}

/// Parse one post file. Drafts yield `Ok(None)`.
pub fn parse_post(path: &Path, raw: &str) -> Result<Option<Post>, ContentError> {
    let (front, body) = split_front_matter(raw)
        .ok_or_else(|| ContentError::MissingFrontMatter(path.to_path_buf()))?;

    let meta: FrontMatter =
        toml::from_str(front).map_err(|err| ContentError::FrontMatter(path.to_path_buf(), err))?;

    if meta.draft {
        return Ok(None);
    }

    let date = parse_date(&meta.date)
        .ok_or_else(|| ContentError::InvalidDate(path.to_path_buf(), meta.date.to_string()))?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = slugify_path(meta.slug.as_deref().unwrap_or(&stem));
    if slug.is_empty() {
        return Err(ContentError::EmptySlug(path.to_path_buf()));
    }

    let post = Post::new(slug, meta.title, date)
        .with_summary(meta.summary)
        .with_tags(meta.tags)
        .with_images(meta.images)
        .with_body(body.trim());

    Ok(Some(post))
}

/// Split `+++ ... +++` front matter from the body.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.trim_start_matches('\u{feff}').trim_start();
    let rest = rest.strip_prefix(FRONT_MATTER_DELIMITER)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((front, body));
        }
        offset += line.len();
    }
    None
}

fn parse_date(value: &toml::Value) -> Option<NaiveDate> {
    match value {
        toml::Value::Datetime(dt) => {
            let date = dt.date?;
            NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
        }
        toml::Value::String(s) => {
            let day = s.get(..10)?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        }
        _ => None,
    }
}
