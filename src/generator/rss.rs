//! RSS feed generation for generated articles.

use crate::{
    config::SiteConfig,
    content::BlogSummary,
    log,
    utils::{
        minify::{MinifyType, minify},
        slug::url_for,
    },
};
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::fs;

/// Write the RSS feed if enabled in config.
pub fn build_rss(
    config: &SiteConfig,
    summaries: &[BlogSummary],
    built_at: DateTime<Utc>,
) -> Result<()> {
    if config.build.rss.enable {
        RssFeed::new(config, summaries, built_at).write()?;
    }
    Ok(())
}

struct RssFeed<'a> {
    config: &'a SiteConfig,
    summaries: &'a [BlogSummary],
    built_at: DateTime<Utc>,
}

impl<'a> RssFeed<'a> {
    fn new(config: &'a SiteConfig, summaries: &'a [BlogSummary], built_at: DateTime<Utc>) -> Self {
        Self {
            config,
            summaries,
            built_at,
        }
    }

    fn to_xml(&self) -> Result<String> {
        let pub_date = self.built_at.to_rfc2822();
        let items: Vec<_> = self
            .summaries
            .iter()
            .map(|summary| summary_to_item(summary, self.config, &pub_date))
            .collect();

        let base = &self.config.base;
        let channel = ChannelBuilder::default()
            .title(&base.title)
            .link(format!("{}/", base.base_url()))
            .description(&base.description)
            .language(base.language.clone())
            .generator("marquee".to_string())
            .last_build_date(pub_date)
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("rss validation failed: {e}"))?;
        Ok(channel.to_string())
    }

    fn write(&self) -> Result<()> {
        let xml = self.to_xml()?;
        let xml = minify(MinifyType::Xml(xml.as_bytes()), self.config);
        let path = self.config.build.output.join(&self.config.build.rss.path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &*xml)
            .with_context(|| format!("Failed to write feed to {}", path.display()))?;

        let name = path.file_name().unwrap_or_default().to_string_lossy();
        log!("rss"; "{name} ({} items)", self.summaries.len());
        Ok(())
    }
}

fn summary_to_item(summary: &BlogSummary, config: &SiteConfig, pub_date: &str) -> rss::Item {
    let link = url_for(
        config.base.base_url(),
        &config.build.blog_prefix,
        &summary.slug,
    );

    ItemBuilder::default()
        .title(Some(summary.title.clone()))
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(Some(summary.excerpt.clone()))
        .pub_date(Some(pub_date.to_owned()))
        .build()
}
