//! Site building orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_posts()         ──► content/*.md → Vec<Post>
//!     ├── prepare_output()     ──► create (or clear) the output directory
//!     ├── collect_pages()      ──► (path, html) for every page
//!     ├── write pages          ──► minified in parallel
//!     ├── search index         ──► search.json
//!     └── build_feed()         ──► feed.xml
//! ```

use crate::{
    config::SiteConfig,
    content::{Post, load_posts},
    feed::build_feed,
    log,
    paginate::paginate,
    render,
    search::search_index,
    tags::{group_by_slug, posts_with_tag, tag_counts},
    utils::minify::minify_page,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// A rendered page and its path relative to the output directory.
struct Output {
    path: PathBuf,
    html: String,
}

impl Output {
    /// Page served at `/{dir}/`, written to `{dir}/index.html`.
    fn index(dir: impl AsRef<Path>, html: String) -> Self {
        Self {
            path: dir.as_ref().join("index.html"),
            html,
        }
    }
}

/// Build the whole site and return the loaded posts.
///
/// If `config.build.clean` is true, clears the output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Vec<Post>> {
    let posts = load_posts(&config.build.content)?;
    prepare_output(&config.build.output, config.build.clean)?;

    let pages = collect_pages(config, &posts)?;
    log!("build"; "rendering {} pages...", pages.len());

    let output = &config.build.output;
    pages.par_iter().try_for_each(|page| {
        let path = output.join(&page.path);
        write_file(&path, minify_page(&page.html, config).as_bytes())
    })?;

    if config.build.search.enable {
        let index = serde_json::to_string(&search_index(&posts, &config.listing.base))?;
        write_file(&output.join(&config.build.search.path), index.as_bytes())?;
        log!("search"; "{} entries", posts.len());
    }

    build_feed(config, &posts)?;

    log_build_result(output)?;
    Ok(posts)
}

/// Every page of the site, rendered but not yet written.
fn collect_pages(config: &SiteConfig, posts: &[Post]) -> Result<Vec<Output>> {
    let base = Path::new(&config.listing.base);
    let mut pages = vec![
        Output::index("", render::render_home(config, posts)),
        Output::index("projects", render::render_projects(config)),
        Output {
            path: PathBuf::from("404.html"),
            html: render::render_not_found(config),
        },
    ];

    for page in paginate(posts, config.listing.per_page)? {
        let current = page.pagination.current();
        let dir = if current == 1 {
            base.to_path_buf()
        } else {
            base.join("page").join(current.to_string())
        };
        pages.push(Output::index(dir, render::render_listing(config, posts, &page)));
    }

    let post_pages: Vec<Output> = (0..posts.len())
        .into_par_iter()
        .map(|index| Output::index(base.join(&posts[index].slug), render::render_post(config, posts, index)))
        .collect();
    pages.extend(post_pages);

    let tags = group_by_slug(tag_counts(posts));
    pages.push(Output::index("tags", render::render_tags(config, &tags)));
    for tag in &tags {
        let tagged = posts_with_tag(posts, &tag.slug);
        pages.push(Output::index(
            Path::new("tags").join(&tag.slug),
            render::render_tag_page(config, tag, &tagged),
        ));
    }

    Ok(pages)
}

/// Ensure the output directory exists, clearing it first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty");
    } else {
        log!("build"; "done");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, title: &str, date: &str, tags: &str) {
        let raw = format!(
            "+++\ntitle = \"{title}\"\ndate = {date}\nsummary = \"About {title}\"\ntags = [{tags}]\n+++\n\nBody text.\n"
        );
        fs::write(dir.join(name), raw).unwrap();
    }

    fn site(posts: usize) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        fs::create_dir_all(&content).unwrap();
        for i in 0..posts {
            write_post(
                &content,
                &format!("post-{i}.md"),
                &format!("Post {i}"),
                &format!("2024-01-{:02}", i + 1),
                "\"rust\", \"System Design\"",
            );
        }

        let mut config = SiteConfig::default();
        config.base.title = "Almanac".into();
        config.build.content = content;
        config.build.output = dir.path().join("public");
        config.build.minify = false;
        config.listing.per_page = 2;
        (dir, config)
    }

    #[test]
    fn test_build_site_layout() {
        let (_dir, config) = site(3);
        let posts = build_site(&config).unwrap();
        assert_eq!(posts.len(), 3);

        let out = &config.build.output;
        for path in [
            "index.html",
            "404.html",
            "search.json",
            "projects/index.html",
            "blog/index.html",
            "blog/page/2/index.html",
            "blog/post-0/index.html",
            "tags/index.html",
            "tags/rust/index.html",
            "tags/system-design/index.html",
        ] {
            assert!(out.join(path).exists(), "missing {path}");
        }
        assert!(!out.join("blog/page/3").exists());
        assert!(!out.join("feed.xml").exists());
    }

    #[test]
    fn test_unsluggable_tag_keeps_tag_index() {
        let (_dir, config) = site(0);
        write_post(&config.build.content, "odd.md", "Odd", "2024-02-01", "\"+++\", \"rust\"");
        build_site(&config).unwrap();

        let index = fs::read_to_string(config.build.output.join("tags/index.html")).unwrap();
        assert!(index.contains("/tags/rust"));
        assert!(index.contains("<title>Tags | Almanac</title>"));
    }

    #[test]
    fn test_search_index_contents() {
        let (_dir, config) = site(2);
        build_site(&config).unwrap();

        let json = fs::read_to_string(config.build.output.join("search.json")).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["title"], "Post 1");
        assert_eq!(entries[0]["path"], "/blog/post-1");
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let (_dir, mut config) = site(1);
        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("stale.html");
        fs::write(&stale, "old").unwrap();

        config.build.clean = true;
        build_site(&config).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_empty_content_builds_single_listing_page() {
        let (_dir, config) = site(0);
        build_site(&config).unwrap();
        let listing = fs::read_to_string(config.build.output.join("blog/index.html")).unwrap();
        assert!(listing.contains("No posts found."));
    }
}
