//! Almanac - a static blog generator with search, pagination and blur placeholders.

mod blur;
mod breadcrumb;
mod build;
mod cli;
mod config;
mod content;
mod feed;
mod init;
mod logger;
mod paginate;
mod render;
mod scroll;
mod search;
mod serve;
mod tags;
mod utils;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_site;
use serve::serve_site;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_standalone() {
        return run_standalone(&cli.command);
    }

    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config).map(|_| ()),
        Commands::Serve { .. } => {
            let posts = build_site(&config)?;
            serve_site(&config, &posts)
        }
        Commands::Search { query } => {
            let posts = content::load_posts(&config.build.content)?;
            print_search(&posts, query, &config.listing.base);
            Ok(())
        }
        Commands::Tags => {
            let posts = content::load_posts(&config.build.content)?;
            print_tags(&posts);
            Ok(())
        }
        Commands::Blur { .. } | Commands::Progress { .. } => run_standalone(&cli.command),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}

/// Commands computed from their arguments alone.
fn run_standalone(command: &Commands) -> Result<()> {
    match command {
        Commands::Blur {
            context,
            dark,
            color,
        } => {
            if let Some(color) = color {
                println!("{}", blur::blur_data_url(color));
            } else if *dark {
                println!("{}", blur::theme_blur_data_url(true));
            } else if context == "all" {
                for tag in blur::ContextTag::ALL {
                    println!("{tag}\t{}", tag.blur_data_url());
                }
            } else {
                println!("{}", blur::contextual_blur_data_url(context));
            }
        }
        Commands::Progress {
            offset,
            document,
            viewport,
        } => {
            for frame in scroll::replay_session(*document, *viewport, offset) {
                println!("{:>8.1}px  {:.1}%", frame.offset, frame.progress);
                if frame.reveals_newsletter {
                    println!("          newsletter prompt shown");
                }
            }
        }
        _ => bail!("command needs a site configuration"),
    }
    Ok(())
}

fn print_search(posts: &[content::Post], query: &str, listing_base: &str) {
    let matches = search::filter_posts(posts, query);
    if matches.is_empty() {
        println!("No posts found.");
        return;
    }
    for post in matches {
        println!(
            "{}  {}  /{}",
            post.date.format("%Y-%m-%d"),
            post.title,
            post.path(listing_base)
        );
    }
}

fn print_tags(posts: &[content::Post]) {
    let tags = tags::group_by_slug(tags::tag_counts(posts));
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }
    for tag in tags {
        println!("{:>4}  {}", tag.count, utils::slug::tag_label(&tag.name));
    }
}
