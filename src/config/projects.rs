//! `[[projects]]` entries shown on the projects page.

use serde::{Deserialize, Serialize};

/// One card on the projects page.
///
/// # Example
/// ```toml
/// [[projects]]
/// title = "The Time Machine"
/// description = "Turn the knob to the desired date and press Go."
/// href = "/blog/the-time-machine"
/// img = "/static/images/time-machine.jpg"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub title: String,
    pub description: String,
    /// Link target; the card is not clickable without it.
    #[serde(default)]
    pub href: Option<String>,
    /// Cover image path.
    #[serde(default)]
    pub img: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_projects_array() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"

            [[projects]]
            title = "Gemcaps"
            description = "Revenue cycle platform"
            img = "/static/images/gemcaps.png"

            [[projects]]
            title = "The Time Machine"
            description = "Travel back in time"
            href = "/blog/the-time-machine"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.projects[0].title, "Gemcaps");
        assert!(config.projects[0].href.is_none());
        assert_eq!(config.projects[0].img.as_deref(), Some("/static/images/gemcaps.png"));
        assert_eq!(config.projects[1].href.as_deref(), Some("/blog/the-time-machine"));
    }

    #[test]
    fn test_projects_default_empty() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test blog"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert!(config.projects.is_empty());
    }
}
