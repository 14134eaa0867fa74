//! `[serve]` section configuration.
//!
//! Contains development server settings.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[serve]` section in almanac.toml - development server settings.
///
/// # Example
/// ```toml
/// [serve]
/// interface = "0.0.0.0"  # Listen on all interfaces
/// port = 3000
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    #[serde(default = "defaults::serve::interface")]
    #[educe(Default = defaults::serve::interface())]
    pub interface: String,

    /// HTTP port number (default: 5277).
    #[serde(default = "defaults::serve::port")]
    #[educe(Default = defaults::serve::port())]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(extra: &str) -> SiteConfig {
        let config = format!(
            "[base]\ntitle = \"Test\"\ndescription = \"Test blog\"\n{extra}"
        );
        toml::from_str(&config).unwrap()
    }

    #[test]
    fn test_serve_defaults() {
        let config = parse("");
        assert_eq!(config.serve.interface, "127.0.0.1");
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_cli_port_and_interface_override_file() {
        let mut config = parse("[serve]\ninterface = \"0.0.0.0\"\nport = 3000\n");
        let cli = Cli::parse_from(["almanac", "serve", "-p", "8080", "-i", "::1"]);
        config.update_with_cli(&cli);

        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.interface, "::1");
    }

    #[test]
    fn test_cli_without_flags_keeps_file_values() {
        let mut config = parse("[serve]\nport = 3000\n");
        let cli = Cli::parse_from(["almanac", "serve"]);
        config.update_with_cli(&cli);
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.serve.interface, "127.0.0.1");
    }

    #[test]
    fn test_build_command_ignores_serve_section() {
        let mut config = parse("[serve]\nport = 3000\n");
        let cli = Cli::parse_from(["almanac", "build"]);
        config.update_with_cli(&cli);
        assert_eq!(config.serve.port, 3000);
    }

    #[test]
    fn test_live_reload_option_rejected() {
        let config = "[base]\ntitle = \"T\"\ndescription = \"D\"\n[serve]\nwatch = true\n";
        let err = toml::from_str::<SiteConfig>(config).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
