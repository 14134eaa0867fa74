//! Site configuration management for `almanac.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                      |
//! |----------------|----------------------------------------------|
//! | `[base]`       | Site metadata (title, author, url)           |
//! | `[build]`      | Paths, minify, rss, search index             |
//! | `[listing]`    | Listing path and page sizes                  |
//! | `[serve]`      | Development server (port, interface)         |
//! | `[[projects]]` | Cards on the projects page                   |
//! | `[extra]`      | User-defined custom fields                   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Backend Almanac"
//! description = "Notes on backend engineering"
//! url = "https://almanac.example.com"
//!
//! [build]
//! content = "content"
//! output = "public"
//!
//! [build.rss]
//! enable = true
//!
//! [listing]
//! per_page = 10
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod listing;
mod projects;
mod serve;

pub use projects::ProjectConfig;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;
use listing::ListingConfig;
use serve::ServeConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing almanac.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Post listing settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Projects page cards
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base_root = cli
            .root
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| self.get_root().to_owned());

        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base_root.join(name),
            _ => base_root,
        };

        self.update_path_with_root(&root, cli);

        if let Some(args) = cli.build_args() {
            self.build.clean |= args.clean;
            Self::update_option(&mut self.build.minify, args.minify.as_ref());
            Self::update_option(&mut self.build.rss.enable, args.rss.as_ref());
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
        }

        if let Commands::Serve {
            interface, port, ..
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, cli: &Cli) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.build.rss.enable && self.base.url.is_none() {
            bail!(ConfigError::Validation(
                "[base.url] is required for RSS generation".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        let base = &self.listing.base;
        if base.is_empty() || base.contains('/') {
            bail!(ConfigError::Validation(
                "[listing.base] must be a single non-empty path segment".into()
            ));
        }

        if self.listing.per_page == 0 {
            bail!(ConfigError::Validation(
                "[listing.per_page] must be greater than 0".into()
            ));
        }

        Ok(())
    }
}

/// Expand a leading `~` in a CLI path.
fn expand_tilde(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

// ============================================================================
// Tests
// ============================================================================
