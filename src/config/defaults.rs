//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_TEAM>".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn blog_prefix() -> String {
        "blog".into()
    }

    pub fn list_limit() -> usize {
        12
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "feed.xml".into()
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [seo] Section Defaults
// ============================================================================

pub mod seo {
    pub fn excerpt_length() -> usize {
        160
    }

    pub fn words_per_minute() -> usize {
        200
    }

    pub fn domain_keywords() -> Vec<String> {
        [
            "product management",
            "product roadmap",
            "prioritization",
            "okr",
            "user research",
            "product strategy",
        ]
        .into_iter()
        .map(Into::into)
        .collect()
    }

    pub mod cta {
        pub fn heading() -> String {
            "Ready to build products your customers love?".into()
        }

        pub fn text() -> String {
            "Plan roadmaps, align stakeholders and ship with confidence.".into()
        }

        pub fn label() -> String {
            "Start free trial".into()
        }

        pub fn url() -> String {
            "/pricing/".into()
        }
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    use crate::theme::ThemeName;
    use std::path::PathBuf;

    pub fn default() -> ThemeName {
        ThemeName::Light
    }

    pub fn storage() -> PathBuf {
        ".marquee/storage.json".into()
    }

    pub fn storage_key() -> String {
        "marquee-theme".into()
    }
}
