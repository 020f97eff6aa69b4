/// CLI configuration
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shelf_library::EngineConfig;
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "shelf.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Library folder used when no root is given on the command line
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl ShelfConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `shelf.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. SHELF_LIBRARY__ROOT
        settings = settings.add_source(
            config::Environment::with_prefix("SHELF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Library root: the command-line value wins over the configured one
    pub fn root(&self, cli_root: Option<PathBuf>) -> Result<PathBuf> {
        cli_root
            .or_else(|| self.library.root.clone())
            .context("No library folder given; pass ROOT or set library.root in shelf.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::{AuthorPolicy, GroupingStyle};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelf.toml");
        fs::write(
            &path,
            r#"
[engine]
author_policy = "join_all"
grouping_style = "name_with_index"

[library]
root = "/audiobooks"
"#,
        )
        .unwrap();

        let config = ShelfConfig::load(Some(&path)).unwrap();
        assert_eq!(config.engine.author_policy, AuthorPolicy::JoinAll);
        assert_eq!(config.engine.grouping_style, GroupingStyle::NameWithIndex);
        assert_eq!(config.engine.sidecar_names.len(), 2);
        assert_eq!(config.library.root, Some(PathBuf::from("/audiobooks")));
    }

    #[test]
    fn cli_root_wins() {
        let config = ShelfConfig {
            library: LibrarySettings {
                root: Some(PathBuf::from("/configured")),
            },
            ..ShelfConfig::default()
        };
        assert_eq!(
            config.root(Some(PathBuf::from("/given"))).unwrap(),
            PathBuf::from("/given")
        );
        assert_eq!(config.root(None).unwrap(), PathBuf::from("/configured"));
        assert!(ShelfConfig::default().root(None).is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(ShelfConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
