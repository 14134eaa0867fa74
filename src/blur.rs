//! Blur placeholders for images.
//!
//! While an image loads, a tiny inline SVG is shown in its place. Each image
//! context has its own colour scheme; the output is a fixed function of the
//! context, so the same context always produces the same data URI.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::{convert::Infallible, fmt, str::FromStr};

const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Where an image is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContextTag {
    #[default]
    Blog,
    Avatar,
    Hero,
    Thumbnail,
}

impl ContextTag {
    pub const ALL: [Self; 4] = [Self::Blog, Self::Avatar, Self::Hero, Self::Thumbnail];

    /// Parse a context name; anything unrecognised means [`ContextTag::Blog`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "avatar" => Self::Avatar,
            "hero" => Self::Hero,
            "thumbnail" => Self::Thumbnail,
            _ => Self::Blog,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Avatar => "avatar",
            Self::Hero => "hero",
            Self::Thumbnail => "thumbnail",
        }
    }

    pub const fn fill(self) -> Fill {
        match self {
            // indigo
            Self::Avatar => Fill::Gradient("#e0e7ff", "#c7d2fe"),
            // purple
            Self::Hero => Fill::Gradient("#ddd6fe", "#c4b5fd"),
            Self::Thumbnail => Fill::Solid("#f9fafb"),
            Self::Blog => Fill::Gradient("#f3f4f6", "#e5e7eb"),
        }
    }

    /// Placeholder data URI for this context.
    pub fn blur_data_url(self) -> String {
        self.fill().data_url()
    }
}

impl FromStr for ContextTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for ContextTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Placeholder colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// 10x10 square of one colour.
    Solid(&'static str),
    /// 20x20 square with a top-left to bottom-right gradient.
    Gradient(&'static str, &'static str),
}

impl Fill {
    pub fn svg(self) -> String {
        match self {
            Self::Solid(color) => solid_svg(color),
            Self::Gradient(start, end) => gradient_svg(start, end),
        }
    }

    pub fn data_url(self) -> String {
        encode_data_url(&self.svg())
    }
}

/// Solid-colour placeholder for an arbitrary colour.
pub fn blur_data_url(color: &str) -> String {
    encode_data_url(&solid_svg(color))
}

/// Gradient placeholder for an arbitrary colour pair.
pub fn gradient_blur_data_url(start: &str, end: &str) -> String {
    encode_data_url(&gradient_svg(start, end))
}

/// Neutral gradient matching the light or dark theme.
pub fn theme_blur_data_url(dark: bool) -> String {
    if dark {
        gradient_blur_data_url("#374151", "#1f2937")
    } else {
        ContextTag::Blog.blur_data_url()
    }
}

/// Placeholder for a context given by name, falling back to blog.
pub fn contextual_blur_data_url(context: &str) -> String {
    ContextTag::from_name(context).blur_data_url()
}

// Indentation is part of the output; changing it changes every data URI.
fn solid_svg(color: &str) -> String {
    format!(
        "<svg width=\"10\" height=\"10\" viewBox=\"0 0 10 10\" xmlns=\"http://www.w3.org/2000/svg\">\n      \
         <rect width=\"10\" height=\"10\" fill=\"{color}\"/>\n    \
         </svg>"
    )
}

fn gradient_svg(start: &str, end: &str) -> String {
    format!(
        "<svg width=\"20\" height=\"20\" viewBox=\"0 0 20 20\" xmlns=\"http://www.w3.org/2000/svg\">\n      \
         <defs>\n        \
         <linearGradient id=\"grad\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"100%\">\n          \
         <stop offset=\"0%\" style=\"stop-color:{start};stop-opacity:1\" />\n          \
         <stop offset=\"100%\" style=\"stop-color:{end};stop-opacity:1\" />\n        \
         </linearGradient>\n      \
         </defs>\n      \
         <rect width=\"20\" height=\"20\" fill=\"url(#grad)\"/>\n    \
         </svg>"
    )
}

fn encode_data_url(svg: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(svg))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG_URI: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAiIGhlaWdodD0iMjAiIHZpZXdCb3g9IjAgMCAyMCAyMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KICAgICAgPGRlZnM+CiAgICAgICAgPGxpbmVhckdyYWRpZW50IGlkPSJncmFkIiB4MT0iMCUiIHkxPSIwJSIgeDI9IjEwMCUiIHkyPSIxMDAlIj4KICAgICAgICAgIDxzdG9wIG9mZnNldD0iMCUiIHN0eWxlPSJzdG9wLWNvbG9yOiNmM2Y0ZjY7c3RvcC1vcGFjaXR5OjEiIC8+CiAgICAgICAgICA8c3RvcCBvZmZzZXQ9IjEwMCUiIHN0eWxlPSJzdG9wLWNvbG9yOiNlNWU3ZWI7c3RvcC1vcGFjaXR5OjEiIC8+CiAgICAgICAgPC9saW5lYXJHcmFkaWVudD4KICAgICAgPC9kZWZzPgogICAgICA8cmVjdCB3aWR0aD0iMjAiIGhlaWdodD0iMjAiIGZpbGw9InVybCgjZ3JhZCkiLz4KICAgIDwvc3ZnPg==";

    const THUMBNAIL_URI: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMTAiIGhlaWdodD0iMTAiIHZpZXdCb3g9IjAgMCAxMCAxMCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj4KICAgICAgPHJlY3Qgd2lkdGg9IjEwIiBoZWlnaHQ9IjEwIiBmaWxsPSIjZjlmYWZiIi8+CiAgICA8L3N2Zz4=";

    fn decode(uri: &str) -> String {
        let payload = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        String::from_utf8(STANDARD.decode(payload).unwrap()).unwrap()
    }

    #[test]
    fn test_blog_known_answer() {
        assert_eq!(ContextTag::Blog.blur_data_url(), BLOG_URI);
    }

    #[test]
    fn test_thumbnail_known_answer() {
        assert_eq!(ContextTag::Thumbnail.blur_data_url(), THUMBNAIL_URI);
    }

    #[test]
    fn test_deterministic() {
        for tag in ContextTag::ALL {
            assert_eq!(tag.blur_data_url(), tag.blur_data_url());
        }
    }

    #[test]
    fn test_unknown_context_falls_back_to_blog() {
        assert_eq!(contextual_blur_data_url("foo"), contextual_blur_data_url("blog"));
        assert_eq!(contextual_blur_data_url(""), BLOG_URI);
        assert_eq!("foo".parse::<ContextTag>(), Ok(ContextTag::Blog));
    }

    #[test]
    fn test_context_names_round_trip() {
        for tag in ContextTag::ALL {
            assert_eq!(ContextTag::from_name(tag.name()), tag);
        }
        assert_eq!(ContextTag::from_name(" HERO "), ContextTag::Hero);
    }

    #[test]
    fn test_contexts_are_distinct() {
        let uris: std::collections::HashSet<_> =
            ContextTag::ALL.iter().map(|t| t.blur_data_url()).collect();
        assert_eq!(uris.len(), 4);
    }

    #[test]
    fn test_avatar_colors() {
        let svg = decode(&ContextTag::Avatar.blur_data_url());
        assert!(svg.contains("stop-color:#e0e7ff"));
        assert!(svg.contains("stop-color:#c7d2fe"));
        assert!(svg.starts_with("<svg width=\"20\""));
    }

    #[test]
    fn test_hero_colors() {
        let svg = decode(&ContextTag::Hero.blur_data_url());
        assert!(svg.contains("#ddd6fe"));
        assert!(svg.contains("#c4b5fd"));
    }

    #[test]
    fn test_solid_custom_color() {
        let svg = decode(&blur_data_url("#123456"));
        assert!(svg.contains("fill=\"#123456\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_theme_variants() {
        assert_eq!(theme_blur_data_url(false), BLOG_URI);
        let dark = decode(&theme_blur_data_url(true));
        assert!(dark.contains("#374151"));
        assert!(dark.contains("#1f2937"));
    }
}
