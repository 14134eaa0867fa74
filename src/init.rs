//! Site initialization module.
//!
//! Creates new site structure with default configuration.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::Path,
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Post written into a fresh site so the first build has something to show.
const SAMPLE_POST: &str = r#"+++
title = "Hello, Almanac"
date = 2025-01-01
summary = "The first post of a new site."
tags = ["meta"]
+++

Posts live in the content directory, one Markdown file each.

The front matter between the `+++` lines sets the title, date, summary and tags.
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `almanac init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(&config.build.content)?;
    init_default_config(&config.config_path, root)?;
    init_ignored_files(root, &[config.build.output.as_path()])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file, titled after the site directory.
fn init_default_config(config_path: &Path, root: &Path) -> Result<()> {
    let mut config = SiteConfig::default();
    config.base.title = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Almanac".to_owned());
    config.base.description = "Notes and articles".to_owned();

    let content = toml::to_string_pretty(&config)?;
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}

/// Create the content directory with a sample post
fn init_site_structure(content: &Path) -> Result<()> {
    if content.exists() {
        bail!(
            "Path `{}` already exists. Try `almanac init <SITE_NAME>` instead.",
            content.display()
        );
    }
    fs::create_dir_all(content)
        .with_context(|| format!("Failed to create {}", content.display()))?;
    fs::write(content.join("hello-almanac.md"), SAMPLE_POST)?;
    Ok(())
}

/// Append ignore patterns for build output, skipping ones already listed
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let patterns: Vec<String> = paths
        .iter()
        .map(|path| {
            let relative = path.strip_prefix(root).unwrap_or(path);
            format!("/{}/", relative.display())
        })
        .collect();

    for file in IGNORE_FILES {
        let path = root.join(file);
        let existing = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        let mut content = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            content.push('\n');
        }
        for pattern in &patterns {
            if !existing.lines().any(|line| line.trim() == pattern) {
                content.push_str(pattern);
                content.push('\n');
            }
        }
        if content.trim().is_empty() {
            continue;
        }

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        out.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::Cli,
        content::{load_posts, loader::parse_post},
    };
    use clap::Parser;
    use tempfile::TempDir;

    fn config_for(dir: &Path, name: Option<&str>) -> SiteConfig {
        let mut args = vec!["almanac".to_owned(), "-r".to_owned(), dir.display().to_string(), "init".to_owned()];
        args.extend(name.map(str::to_owned));
        let cli = Cli::parse_from(args);
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);
        config
    }

    #[test]
    fn test_sample_post_parses() {
        let post = parse_post(Path::new("hello-almanac.md"), SAMPLE_POST).unwrap().unwrap();
        assert_eq!(post.slug, "hello-almanac");
        assert_eq!(post.tags, vec!["meta"]);
    }

    #[test]
    fn test_new_site_with_name() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path(), Some("site"));
        new_site(&config, true).unwrap();

        let root = config.get_root();
        assert!(root.join("almanac.toml").is_file());
        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "/public/\n");

        let written = SiteConfig::from_path(&root.join("almanac.toml")).unwrap();
        assert_eq!(written.base.title, "site");
        assert_eq!(load_posts(&config.build.content).unwrap().len(), 1);
    }

    #[test]
    fn test_new_site_keeps_existing_gitignore() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path(), Some("site"));
        let root = config.get_root();
        fs::create_dir_all(root).unwrap();
        fs::write(root.join(".gitignore"), "target/\n*.log").unwrap();

        new_site(&config, true).unwrap();
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "target/\n*.log\n/public/\n"
        );
    }

    #[test]
    fn test_ignored_files_not_duplicated() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public");
        fs::write(dir.path().join(".gitignore"), "/public/\n").unwrap();

        init_ignored_files(dir.path(), &[output.as_path()]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(".gitignore")).unwrap(), "/public/\n");
    }

    #[test]
    fn test_new_site_rejects_non_empty_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stray.txt"), "x").unwrap();
        let config = config_for(dir.path(), None);
        assert!(new_site(&config, false).is_err());
    }

    #[test]
    fn test_is_dir_empty() {
        let dir = TempDir::new().unwrap();
        assert!(is_dir_empty(dir.path()).unwrap());
        assert!(is_dir_empty(&dir.path().join("missing")).unwrap());
        fs::write(dir.path().join("a"), "").unwrap();
        assert!(!is_dir_empty(dir.path()).unwrap());
    }
}
