mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    expand_paths(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./cinemabin.toml",
        "./config.toml",
        "~/.config/cinemabin/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Expand a leading `~` in a configured path
pub fn expand_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    }
}

fn expand_paths(config: &mut Config) {
    if let Some(root) = &config.library.root {
        config.library.root = Some(expand_path(root));
    }
    config.remote.path = expand_path(&config.remote.path);
    config.output.path = expand_path(&config.output.path);
    config.output.backup_dir = expand_path(&config.output.backup_dir);
    if let Some(report) = &config.output.report_path {
        config.output.report_path = Some(expand_path(report));
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let library = &config.library;

    if library.grouping_depth == 0 {
        return Err(cb_core::Error::Validation(
            "library.grouping_depth must be at least 1".into(),
        )
        .into());
    }

    if library.video_extensions.is_empty() {
        return Err(cb_core::Error::Validation(
            "library.video_extensions cannot be empty".into(),
        )
        .into());
    }

    let normalize = |e: &String| e.trim_start_matches('.').to_lowercase();
    for ext in &library.subtitle_extensions {
        let ext = normalize(ext);
        if library.video_extensions.iter().any(|v| normalize(v) == ext) {
            return Err(cb_core::Error::Validation(format!(
                "extension '{ext}' is listed as both video and subtitle"
            ))
            .into());
        }
    }

    if let Some(root) = &library.root {
        if !root.exists() {
            tracing::warn!("Library root does not exist: {:?}", root);
        }
    }

    Ok(())
}
