//! Site initialization module.
//!
//! Creates a new site skeleton with a default configuration, a sample page
//! and a sample content template.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default site directory structure
const SITE_DIRS: &[&str] = &["content", "templates"];

const SAMPLE_PAGE: &str = "\
---
title: Welcome
description: Plan products your whole company understands.
keywords: [roadmap, planning]
---

# Welcome

This page lives in `content/index.md`. Edit it, then run `marquee build`.

Generated articles are listed under the blog.
";

const SAMPLE_TEMPLATE: &str = r#"id = "launch-announcement"
title = "Introducing {{product}}"
category = "announcements"
segment = "product-teams"

[seo]
keywords = ["{{product}}", "launch"]

[[sections]]
kind = "hero"
title = "Meet {{product}}"
content = "{{product}} helps **{{audience}}** ship the right thing."
variables = { product = "Acme PM", audience = "product teams" }

[[sections]]
kind = "cta"
title = "Try it today"
content = "Start a free trial in under a minute."
"#;

/// Create a new site with default structure
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // With no name the site is created in place, so the directory must be empty
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `marquee init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(&config.config_path)?;
    init_samples(root)?;

    let output = config
        .build
        .output
        .strip_prefix(root)
        .unwrap_or(config.build.output.as_path());
    let storage = config.theme_storage_path();
    let mut ignored = vec![output];
    if let Some(storage) = &storage {
        ignored.push(storage.strip_prefix(root).unwrap_or(storage.as_path()));
    }
    init_ignored_files(root, &ignored)?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let mut config = SiteConfig::default();
    config.base.title = "My Product".into();
    config.base.description = "Roadmaps your whole company understands".into();
    config.base.url = Some("https://example.com".into());
    config.variables.insert("product".into(), "My Product".into());

    let content = toml::to_string_pretty(&config)?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `marquee init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

fn init_samples(root: &Path) -> Result<()> {
    fs::write(root.join("content/index.md"), SAMPLE_PAGE)?;
    fs::write(root.join("templates/launch-announcement.toml"), SAMPLE_TEMPLATE)?;
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{}\n", p.trim_start_matches('/')))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}
