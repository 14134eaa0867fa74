//! Breadcrumb trail derived from a request path.

use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
    /// The current page; rendered highlighted.
    pub is_last: bool,
}

/// `Home` followed by one crumb per non-empty path segment.
///
/// Each crumb links to the path up to and including its segment; labels
/// are percent-decoded.
pub fn breadcrumbs(path: &str) -> Vec<Crumb> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    crumbs.push(Crumb {
        label: "Home".into(),
        href: "/".into(),
        is_last: segments.is_empty(),
    });

    for (index, segment) in segments.iter().enumerate() {
        let label = urlencoding::decode(segment).unwrap_or(Cow::Borrowed(*segment));
        crumbs.push(Crumb {
            label: label.into_owned(),
            href: format!("/{}", segments[..=index].join("/")),
            is_last: index + 1 == segments.len(),
        });
    }

    crumbs
}
