//! URL slugification.
//!
//! Two flavours are needed:
//! - post slugs come from file names and end up as directory names, so they
//!   are transliterated to plain ASCII (`deunicode`)
//! - tag slugs follow the github-slugger rules the tag links have always used:
//!   lowercase, punctuation dropped, spaces become `-`, non-ASCII letters kept

use deunicode::deunicode;

/// Convert a file stem to an ASCII path segment.
///
/// Runs of anything that is not `[a-z0-9]` collapse into a single `-`, and
/// leading/trailing dashes are dropped.
pub fn slugify_path(text: &str) -> String {
    let ascii = deunicode(text).to_ascii_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Slug for a tag link: `/tags/{slug}`.
pub fn slugify_tag(tag: &str) -> String {
    tag.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}

/// Text shown for a tag: spaces replaced by dashes, case kept.
pub fn tag_label(tag: &str) -> String {
    tag.split(' ').collect::<Vec<_>>().join("-")
}
