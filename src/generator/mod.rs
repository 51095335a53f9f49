//! Site-wide feeds written after all pages: `sitemap.xml` and the RSS feed.

pub mod rss;
pub mod sitemap;
