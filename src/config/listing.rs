//! `[listing]` section configuration.
//!
//! Controls where the post list lives and how it is split into pages.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[listing]` section in almanac.toml.
///
/// # Example
/// ```toml
/// [listing]
/// base = "blog"       # /blog/, /blog/page/2, /blog/<slug>/
/// per_page = 10
/// recent = 5          # posts shown on the home page
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    /// First path segment of the post listing.
    #[serde(default = "defaults::listing::base")]
    #[educe(Default = defaults::listing::base())]
    pub base: String,

    /// Posts per listing page.
    #[serde(default = "defaults::listing::per_page")]
    #[educe(Default = defaults::listing::per_page())]
    pub per_page: usize,

    /// Posts shown on the home page before the "All Posts" link.
    #[serde(default = "defaults::listing::recent")]
    #[educe(Default = defaults::listing::recent())]
    pub recent: usize,
}
