use anyhow::{Context, Result};
use landing_core::config::CONFIG_FILE;
use landing_core::{DEFAULT_BACKGROUND, DEFAULT_CONTENT_FILE, DEFAULT_PUBLIC_DIR};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

const SITE_TOML_TEMPLATE: &str = r#"# Site configuration. Every key is optional.

[site]
content = "content.json"
public_dir = "public"
# Sections using this background keep their natural height
default_background = "background.webp"
lang = "en"

[analytics]
# Also read from the GOOGLE_ANALYTICS_ID environment variable
# measurement_id = "G-XXXXXXXXXX"
upstream_url = "https://www.googletagmanager.com/gtag/js"

[server]
host = "127.0.0.1"
port = 3000
"#;

/// Scaffold a site directory: site.toml, content.json and public/
pub async fn run(path: PathBuf) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let content_path = path.join(DEFAULT_CONTENT_FILE);
    if content_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            DEFAULT_CONTENT_FILE,
            content_path.display()
        );
    }

    fs::create_dir_all(path.join(DEFAULT_PUBLIC_DIR))
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        println!("✓ Keeping existing {}", CONFIG_FILE);
    } else {
        fs::write(&config_path, SITE_TOML_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("✓ Created {}", CONFIG_FILE);
    }

    let title = site_title(&path);
    let document = sample_content(&title);
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize content")?;
    fs::write(&content_path, json)
        .with_context(|| format!("Failed to write {}", content_path.display()))?;
    println!("✓ Created {}", DEFAULT_CONTENT_FILE);

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml        ← Analytics id, server port");
    println!("  ├── content.json     ← Page sections");
    println!("  └── public/          ← Images and other static files");
    println!("\nNext steps:");
    println!("  1. Put {} (and any section images) in public/", DEFAULT_BACKGROUND);
    println!("  2. Edit content.json");
    println!("  3. Run: landing serve {}", path.display());

    Ok(())
}

/// Page title derived from the directory name
fn site_title(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && *name != ".")
        .unwrap_or("My Site")
        .to_string()
}

fn sample_content(title: &str) -> serde_json::Value {
    let background = format!("/{}", DEFAULT_BACKGROUND);
    json!({
        "metadata": {
            "title": title,
            "description": format!("{} landing page", title),
        },
        "section-1": {
            "title": title,
            "description": "Replace this text with a short introduction.",
            "background": background,
            "section-1": {
                "title": "What we do",
                "description": "Links such as https://example.com become clickable.",
                "bullet-points": {
                    "first": { "text": "A first point" },
                    "second": { "text": "A linked point", "href": "https://example.com" }
                }
            },
            "section-2": {
                "title": "Get in touch",
                "href": "mailto:hello@example.com",
                "section-1": {
                    "title": "Nested sections use smaller headings"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_core::{load_site_config, parse_content};

    #[tokio::test]
    async fn test_init_creates_loadable_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("acme");

        run(site.clone()).await.unwrap();

        assert!(site.join("public").is_dir());
        let config = load_site_config(&site).unwrap();
        assert_eq!(config.server.port, 3000);

        let content = parse_content(site.join("content.json")).unwrap();
        assert_eq!(content.metadata.title, "acme");
        assert_eq!(content.root.children.len(), 2);
        assert_eq!(content.root.children[0].title, "What we do");
        let points = content.root.children[0].bullet_points.as_ref().unwrap();
        assert_eq!(points[1].href.as_deref(), Some("https://example.com"));
        assert_eq!(content.root.depth(), 3);
    }

    #[tokio::test]
    async fn test_init_refuses_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path().to_path_buf()).await.unwrap();

        let err = run(dir.path().to_path_buf()).await.err().unwrap();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_init_keeps_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("site.toml"), "[server]\nport = 8080\n").unwrap();

        run(dir.path().to_path_buf()).await.unwrap();

        let config = fs::read_to_string(dir.path().join("site.toml")).unwrap();
        assert_eq!(config, "[server]\nport = 8080\n");
    }

    #[test]
    fn test_site_title_fallback() {
        assert_eq!(site_title(Path::new("/tmp/acme")), "acme");
        assert_eq!(site_title(Path::new(".")), "My Site");
    }
}
