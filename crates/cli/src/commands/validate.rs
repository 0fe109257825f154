use landing_validator::validate_site;
use std::path::PathBuf;

use super::load_site;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let site = load_site(&path)?;

    println!("✓ {} valid", site.config.site.content.display());
    println!("  Page: {}", site.content.metadata.title);

    let report = validate_site(&path, &site.config, &site.content);

    for line in &report.info {
        println!("  ℹ {}", line);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        println!("  ✗ {}", error);
    }

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    println!("\n✅ Site is valid ({} warning(s))", report.warnings.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_validate_passes_clean_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{"metadata":{"title":"A","description":"B"},"section-1":{"title":"Hi"}}"#,
        )
        .unwrap();
        run(dir.path().to_path_buf()).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_fails_on_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("content.json"),
            r#"{"metadata":{"title":"A","description":"B"},"section-1":{"title":" "}}"#,
        )
        .unwrap();
        let err = run(dir.path().to_path_buf()).await.err().unwrap();
        assert!(err.to_string().contains("1 error(s)"));
    }
}
