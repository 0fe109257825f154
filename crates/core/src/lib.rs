pub mod config;
pub mod content;
pub mod error;
pub mod types;

pub use config::load_site_config;
pub use content::parse_content;
pub use error::{Error, Result};
pub use types::*;
