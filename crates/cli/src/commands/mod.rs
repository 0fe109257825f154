pub mod build;
pub mod init;
pub mod serve;
pub mod validate;

use anyhow::{Context, Result};
use landing_core::{SiteConfig, SiteContent, load_site_config, parse_content};
use std::path::Path;

/// Configuration and content of a site directory, loaded once
pub struct LoadedSite {
    pub config: SiteConfig,
    pub content: SiteContent,
}

/// Load site.toml (optional) and the content document of a site directory
pub fn load_site(path: &Path) -> Result<LoadedSite> {
    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'landing init {}' first",
            path.display(),
            path.display()
        );
    }

    let config = load_site_config(path).context("Failed to load site.toml")?;

    let content_path = path.join(&config.site.content);
    if !content_path.exists() {
        anyhow::bail!(
            "{} not found in {}\nRun 'landing init {}' first",
            config.site.content.display(),
            path.display(),
            path.display()
        );
    }

    let content = parse_content(&content_path)
        .with_context(|| format!("Failed to parse {}", content_path.display()))?;

    Ok(LoadedSite { config, content })
}
