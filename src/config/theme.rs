//! `[theme]` and `[analytics]` section configuration.

use super::defaults;
use crate::theme::ThemeName;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[theme]` section in marquee.toml.
///
/// # Example
/// ```toml
/// [theme]
/// default = "gray"
/// storage = "~/.local/state/marquee/storage.json"
/// storage_key = "acme-theme"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme used when nothing valid is persisted.
    #[serde(default = "defaults::theme::default")]
    #[educe(Default = defaults::theme::default())]
    pub default: ThemeName,

    /// JSON file backing the theme storage slot (`~` is expanded).
    #[serde(default = "defaults::theme::storage")]
    #[educe(Default = defaults::theme::storage())]
    pub storage: PathBuf,

    /// Key of the persisted slot inside the storage file.
    #[serde(default = "defaults::theme::storage_key")]
    #[educe(Default = defaults::theme::storage_key())]
    pub storage_key: String,
}

/// `[analytics]` section in marquee.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Log tracked events instead of dropping them.
    #[serde(default)]
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::theme::ThemeName;
    use std::path::PathBuf;

    #[test]
    fn test_theme_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"
        "#,
        )
        .unwrap();

        assert_eq!(config.theme.default, ThemeName::Light);
        assert_eq!(config.theme.storage, PathBuf::from(".marquee/storage.json"));
        assert_eq!(config.theme.storage_key, "marquee-theme");
        assert!(!config.analytics.enable);
    }

    #[test]
    fn test_theme_custom() {
        let config: SiteConfig = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [theme]
            default = "gray"
            storage_key = "acme-theme"

            [analytics]
            enable = true
        "#,
        )
        .unwrap();

        assert_eq!(config.theme.default, ThemeName::Gray);
        assert_eq!(config.theme.storage_key, "acme-theme");
        assert!(config.analytics.enable);
    }

    #[test]
    fn test_theme_unknown_default_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str(
            r#"
            [base]
            title = "Test"
            description = "Test"

            [theme]
            default = "sepia"
        "#,
        );
        assert!(result.is_err());
    }
}
