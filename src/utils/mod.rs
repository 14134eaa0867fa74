//! Utility modules for the site generator.

pub mod minify;
pub mod slug;
