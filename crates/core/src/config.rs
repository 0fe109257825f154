use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file inside a site directory
pub const CONFIG_FILE: &str = "site.toml";

/// Environment variable carrying the analytics measurement id
pub const ANALYTICS_ID_ENV: &str = "GOOGLE_ANALYTICS_ID";

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    site: RawSite,
    #[serde(default)]
    analytics: RawAnalytics,
    #[serde(default)]
    server: RawServer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSite {
    content: Option<String>,    // Convert to PathBuf
    public_dir: Option<String>, // Convert to PathBuf
    default_background: Option<String>,
    lang: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAnalytics {
    measurement_id: Option<String>,
    upstream_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawServer {
    host: Option<String>, // Parse as IpAddr
    port: Option<u16>,
}

/// Load the configuration of a site directory.
///
/// Reads `site.toml` when present (defaults otherwise) and applies the
/// `GOOGLE_ANALYTICS_ID` environment override.
pub fn load_site_config<P: AsRef<Path>>(site_dir: P) -> Result<SiteConfig> {
    let path = site_dir.as_ref().join(CONFIG_FILE);
    let config = if path.exists() {
        parse_site_toml_str(&fs::read_to_string(&path)?)?
    } else {
        SiteConfig::default()
    };

    apply_env(config, |key| std::env::var(key).ok())
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = SiteConfig::default();

    if let Some(content) = raw.site.content {
        config.site.content = validate_path(&content, "site.content")?;
    }
    if let Some(public_dir) = raw.site.public_dir {
        config.site.public_dir = validate_path(&public_dir, "site.public_dir")?;
    }
    if let Some(background) = raw.site.default_background {
        if background.trim().is_empty() {
            return Err(Error::ConfigParse(
                "Empty value in 'site.default_background' field".to_string(),
            ));
        }
        config.site.default_background = background;
    }
    if let Some(lang) = raw.site.lang {
        config.site.lang = lang;
    }

    if let Some(id) = raw.analytics.measurement_id {
        config.analytics.measurement_id = Some(validate_measurement_id(&id)?);
    }
    if let Some(url) = raw.analytics.upstream_url {
        config.analytics.upstream_url = validate_upstream_url(&url)?;
    }

    if let Some(host) = raw.server.host {
        config.server.host = host
            .parse::<IpAddr>()
            .map_err(|e| Error::ConfigParse(format!("Invalid server.host '{}': {}", host, e)))?;
    }
    if let Some(port) = raw.server.port {
        config.server.port = port;
    }

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables
pub fn apply_env<F>(mut config: SiteConfig, lookup: F) -> Result<SiteConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(id) = lookup(ANALYTICS_ID_ENV).filter(|id| !id.trim().is_empty()) {
        config.analytics.measurement_id = Some(validate_measurement_id(id.trim())?);
    }
    Ok(config)
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml can only point inside its own site directory.
///
/// ```text
/// validate_path("content.json", "site.content")  → Ok(PathBuf)
/// validate_path("/etc/passwd", "site.content")   → Err("Absolute paths not allowed...")
/// validate_path("../shared", "site.public_dir")  → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    // Reject absolute paths
    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}

/// The id ends up in a query string and an inline script, so keep it to
/// ASCII alphanumerics and '-'.
fn validate_measurement_id(id: &str) -> Result<String> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::ConfigParse(format!(
            "Invalid analytics measurement id '{}': expected letters, digits and '-'",
            id
        )));
    }
    Ok(id.to_string())
}

fn validate_upstream_url(url: &str) -> Result<String> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(Error::ConfigParse(format!(
            "Invalid analytics.upstream_url '{}': must start with http:// or https://",
            url
        )));
    }
    Ok(url.to_string())
}
