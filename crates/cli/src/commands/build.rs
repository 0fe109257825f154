use anyhow::{Context, Result};
use landing_generator::{RenderOptions, render_page};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::load_site;

/// Build the static site: public assets plus the rendered index.html
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let site = load_site(&path)?;

    println!("✓ Loaded: {}", site.content.metadata.title);
    println!("  Sections: {}", site.content.root.count());
    println!("  Depth: {}", site.content.root.depth());
    println!();

    println!("📁 Creating output directory...");
    fs::create_dir_all(&output).context("Failed to create output directory")?;
    println!("   ✓ Created {}", output.display());

    println!("🖼  Copying public assets...");
    let public_dir = path.join(&site.config.site.public_dir);
    if public_dir.is_dir() {
        let copied = copy_dir(&public_dir, &output)?;
        println!("   ✓ Copied {} files", copied);
    } else {
        eprintln!(
            "   ⚠ Warning: Public directory not found: {}",
            public_dir.display()
        );
    }

    // Written after the copy so the rendered page replaces any public/index.html
    println!("📄 Generating index.html...");
    let html = render_page(&site.content, &RenderOptions::from_config(&site.config));
    fs::write(output.join("index.html"), html).context("Failed to write index.html")?;
    println!("   ✓ Generated index.html");

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("Note: the analytics script is loaded from /gtag/js.");
    println!("   Run 'landing serve {}' or route /gtag/js to the proxy when hosting.", path.display());
    println!();

    Ok(())
}

/// Recursively copy the files of `src` into `dst`, returning the number of files copied
fn copy_dir(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("Failed to read {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .context("Walked outside the public directory")?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }
    Ok(copied)
}
