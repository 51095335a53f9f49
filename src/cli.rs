//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marquee marketing site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Markdown content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Config file name (default: marquee.toml)
    #[arg(short = 'C', long, default_value = "marquee.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for the Build command
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Minify the html content
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// enable rss feed generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub rss: Option<bool>,

    /// enable sitemap generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub sitemap: Option<bool>,

    /// Override base URL for the site.
    ///
    /// Useful for preview deployments whose host differs from production.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
}

/// Theme subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ThemeAction {
    /// Print the current theme
    Get,

    /// Switch to a theme and persist it
    Set {
        /// light, dark or gray
        name: String,
    },

    /// Cycle light -> dark -> gray
    Toggle,

    /// Print the style sheet for a theme
    Css {
        /// light, dark or gray
        name: String,
    },
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Init a template site
    Init {
        /// the name(path) of site directory, related to `root`
        name: Option<PathBuf>,
    },

    /// Deletes stale stylesheets and builds the site
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Inspect or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Render one content template
    Generate {
        /// Template id
        template: String,

        /// Template variable, `key=value` (repeatable)
        #[arg(long = "var", value_parser = parse_key_val)]
        vars: Vec<(String, String)>,

        /// Print the generated record as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Process one markdown file and print its HTML, excerpt and SEO data
    Process {
        /// Markdown file
        file: PathBuf,

        /// Primary SEO keyword
        #[arg(short, long)]
        keyword: Option<String>,

        /// Page URL for structured data
        #[arg(short, long)]
        url: Option<String>,
    },

    /// List blog summaries from the template registry
    List {
        /// Maximum number of summaries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Parse a `key=value` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid KEY=value: empty key in `{s}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("product=Acme PM"),
            Ok(("product".into(), "Acme PM".into()))
        );
        assert_eq!(parse_key_val("a=b=c"), Ok(("a".into(), "b=c".into())));
        assert_eq!(parse_key_val("empty="), Ok(("empty".into(), String::new())));
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=value").is_err());
    }

    #[test]
    fn test_cli_generate_vars() {
        let cli = Cli::try_parse_from([
            "marquee", "generate", "roadmap-guide", "--var", "product=Acme", "--var", "team=PMs",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate { template, vars, json } => {
                assert_eq!(template, "roadmap-guide");
                assert_eq!(vars.len(), 2);
                assert_eq!(vars[1], ("team".into(), "PMs".into()));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_theme_set() {
        let cli = Cli::try_parse_from(["marquee", "theme", "set", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Theme { action: Some(ThemeAction::Set { ref name }) } if name == "dark"
        ));
        assert!(!cli.is_init());
    }

    #[test]
    fn test_cli_build_flags() {
        let cli = Cli::try_parse_from(["marquee", "-C", "site.toml", "build", "--rss", "--minify", "false"])
            .unwrap();
        assert_eq!(cli.config, PathBuf::from("site.toml"));
        match cli.command {
            Commands::Build { build_args } => {
                assert_eq!(build_args.rss, Some(true));
                assert_eq!(build_args.minify, Some(false));
                assert_eq!(build_args.sitemap, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
