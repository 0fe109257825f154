mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "landing")]
#[command(version, about = "Content-driven landing page with a same-origin analytics proxy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory
    Init {
        /// Path to create site directory
        path: PathBuf,
    },

    /// Validate site configuration, content and assets
    Validate {
        /// Path to site directory
        path: PathBuf,
    },

    /// Serve the page and the analytics proxy
    ///
    /// Routes:
    ///   GET  /         rendered content page
    ///   GET  /gtag/js  analytics script fetched from the upstream host
    ///   GET  /*        files from the public directory
    Serve {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on (overrides server.port in site.toml)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render the page and copy public assets into a static directory
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    match cli.command {
        Command::Init { path } => commands::init::run(path).await,
        Command::Validate { path } => commands::validate::run(path).await,
        Command::Serve { path, port } => commands::serve::run(path, port).await,
        Command::Build { path, output } => commands::build::run(path, output).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "landing", &mut io::stdout());
            Ok(())
        }
    }
}
