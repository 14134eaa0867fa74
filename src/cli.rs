//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Almanac blog generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Root directory of the site (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: almanac.toml)
    #[arg(short = 'C', long, default_value = "almanac.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful when the deployed URL differs from the one in almanac.toml.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Build the site into the output directory
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then serve the site locally
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search posts by title, summary and tags
    Search {
        /// Case-insensitive substring to look for
        #[arg(default_value = "")]
        query: String,
    },

    /// List tags with their post counts
    Tags,

    /// Print the blur placeholder data URI for an image context
    Blur {
        /// One of blog, avatar, hero, thumbnail, or `all` to list every context
        /// (anything else means blog)
        #[arg(default_value = "blog")]
        context: String,

        /// Use the dark theme gradient instead of a context
        #[arg(long, conflicts_with = "color")]
        dark: bool,

        /// Solid placeholder of a custom colour (e.g. `#e5e7eb`)
        #[arg(long)]
        color: Option<String>,
    },

    /// Compute reading progress over a sequence of scroll positions
    Progress {
        /// Pixels scrolled from the top; the first mounts the meter, each
        /// further value is one scroll event
        #[arg(long, required = true, num_args = 1.., allow_negative_numbers = true)]
        offset: Vec<f64>,

        /// Full document height
        #[arg(long, allow_negative_numbers = true)]
        document: f64,

        /// Visible viewport height
        #[arg(long, allow_negative_numbers = true)]
        viewport: f64,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }

    /// Build arguments of `build`/`serve`, if the command has them.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => {
                Some(build_args)
            }
            _ => None,
        }
    }

    /// Commands that only compute from their arguments and need no site.
    pub const fn is_standalone(&self) -> bool {
        matches!(
            self.command,
            Commands::Blur { .. } | Commands::Progress { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["almanac", "search", "cloud"]);
        match cli.command {
            Commands::Search { query } => assert_eq!(query, "cloud"),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.config, PathBuf::from("almanac.toml"));
    }

    #[test]
    fn test_parse_search_without_query() {
        let cli = Cli::parse_from(["almanac", "search"]);
        assert!(matches!(cli.command, Commands::Search { ref query } if query.is_empty()));
    }

    #[test]
    fn test_parse_build_flags() {
        let cli = Cli::parse_from(["almanac", "build", "--clean", "--minify", "false"]);
        let args = cli.build_args().unwrap();
        assert!(args.clean);
        assert_eq!(args.minify, Some(false));
        assert_eq!(args.rss, None);
    }

    #[test]
    fn test_parse_serve_port() {
        let cli = Cli::parse_from(["almanac", "serve", "-p", "8080"]);
        match cli.command {
            Commands::Serve { port, interface, .. } => {
                assert_eq!(port, Some(8080));
                assert_eq!(interface, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_progress() {
        let cli = Cli::parse_from([
            "almanac", "progress", "--offset", "100", "--document", "1200", "--viewport", "200",
        ]);
        assert!(cli.is_standalone());
        assert!(cli.build_args().is_none());
    }

    #[test]
    fn test_parse_progress_session_with_overscroll() {
        let cli = Cli::parse_from([
            "almanac", "progress", "--offset", "0", "300", "-40", "--document", "1400", "--viewport",
            "200",
        ]);
        match cli.command {
            Commands::Progress { offset, document, .. } => {
                assert_eq!(offset, vec![0.0, 300.0, -40.0]);
                assert_eq!(document, 1400.0);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_blur_color_conflicts_with_dark() {
        let cli = Cli::parse_from(["almanac", "blur", "--color", "#e5e7eb"]);
        assert!(matches!(cli.command, Commands::Blur { color: Some(ref c), .. } if c == "#e5e7eb"));

        assert!(Cli::try_parse_from(["almanac", "blur", "--dark", "--color", "#000"]).is_err());
    }

    #[test]
    fn test_parse_blur_default_context() {
        let cli = Cli::parse_from(["almanac", "blur"]);
        match cli.command {
            Commands::Blur { context, dark, color } => {
                assert_eq!(context, "blog");
                assert!(!dark);
                assert_eq!(color, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_is_init() {
        let cli = Cli::parse_from(["almanac", "init", "my-blog"]);
        assert!(cli.is_init());
        assert!(!cli.is_standalone());
    }
}
