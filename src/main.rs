//! Marquee - a static generator for product marketing sites.

mod analytics;
mod build;
mod cli;
mod config;
mod content;
mod generator;
mod init;
mod layout;
mod logger;
mod markdown;
mod theme;
mod utils;

use analytics::Tracker;
use anyhow::{Context, Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands, ThemeAction};
use config::SiteConfig;
use content::{ContentFactory, TemplateRegistry, Variables};
use init::new_site;
use markdown::{Processor, generate_seo_data};
use serde_json::json;
use std::{fs, path::Path};
use theme::{Persistence, ThemeContext, scope::DocumentRoot, storage, tokens};
use utils::slug::{slugify, url_for};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let tracker = analytics::tracker(&config.analytics);

    match &cli.command {
        Commands::Init { name } => new_site(&config, name.is_some()),
        Commands::Build { .. } => build_site(&config, tracker.as_ref()).map(|_| ()),
        Commands::Theme { action } => {
            run_theme(action.as_ref().unwrap_or(&ThemeAction::Get), &config, tracker.as_ref())
        }
        Commands::Generate {
            template,
            vars,
            json,
        } => run_generate(template, vars, *json, &config, tracker.as_ref()),
        Commands::Process { file, keyword, url } => {
            run_process(file, keyword.as_deref(), url.as_deref(), &config)
        }
        Commands::List { limit } => {
            let factory = ContentFactory::new(load_registry(&config)?, &config);
            let summaries = factory.generate_blog_list(limit.unwrap_or(config.build.list_limit));
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    // Only `build` needs a site on disk; the inspection commands run on defaults
    let config_exists = config.config_path.exists();
    let is_build = matches!(cli.command, Commands::Build { .. });
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) if is_build => bail!("Config file not found."),
        _ => {}
    }

    if is_build || (!cli.is_init() && config_exists) {
        config.validate()?;
    }

    Ok(config)
}

/// Built-in templates plus any from `[build] templates`.
fn load_registry(config: &SiteConfig) -> Result<TemplateRegistry> {
    let mut registry = TemplateRegistry::builtin()?;
    registry.load_dir(&config.build.templates)?;
    Ok(registry)
}

fn run_theme(action: &ThemeAction, config: &SiteConfig, tracker: &dyn Tracker) -> Result<()> {
    let mut context = ThemeContext::load(
        storage::open(config.theme_storage_path()),
        DocumentRoot::new(),
        &config.theme,
    );

    let persistence = match action {
        ThemeAction::Get => {
            println!("{}", context.theme());
            return Ok(());
        }
        ThemeAction::Css { name } => {
            print!("{}", tokens::serialize(name)?);
            return Ok(());
        }
        ThemeAction::Set { name } => context.set_theme_str(name)?,
        ThemeAction::Toggle => context.toggle(),
    };

    let theme = context.theme();
    tracker.track(
        "theme_changed",
        &json!({ "theme": theme.as_str(), "persisted": persistence == Persistence::Saved }),
    );
    log!("theme"; "switched to {theme}");
    println!("{theme}");
    Ok(())
}

fn run_generate(
    template: &str,
    vars: &[(String, String)],
    json: bool,
    config: &SiteConfig,
    tracker: &dyn Tracker,
) -> Result<()> {
    let mut variables: Variables = config.variables.clone();
    variables.extend(vars.iter().cloned());

    let factory = ContentFactory::new(load_registry(config)?, config);
    let page = factory.generate_content(template, &variables)?;
    tracker.track(
        "content_generated",
        &json!({ "template": page.template_id, "slug": page.slug }),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", page.html);
    }
    Ok(())
}

fn run_process(
    file: &Path,
    keyword: Option<&str>,
    url: Option<&str>,
    config: &SiteConfig,
) -> Result<()> {
    let raw = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let content = Processor::new(&config.seo).process_bytes(&raw, keyword);

    let url = match url {
        Some(url) => url.to_owned(),
        None => {
            let stem = file.file_stem().unwrap_or_default().to_string_lossy();
            let slug = content.field("slug").map_or_else(|| slugify(&stem), slugify);
            url_for(config.base.base_url(), "", &slug)
        }
    };
    let seo = generate_seo_data(&content, keyword.unwrap_or_default(), &url, config);

    let output = json!({ "content": content, "seo": seo });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
