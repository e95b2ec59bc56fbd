//! Store configuration via `arpm.toml`
//!
//! The configuration is an explicit value handed to [`PackageStore::open`];
//! nothing reads it from global state.
//!
//! [`PackageStore::open`]: crate::PackageStore::open

use arpm_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "arpm.toml";

fn default_root() -> PathBuf {
    PathBuf::from("/srv/arpm")
}

fn default_index_tool() -> String {
    "repo-add".to_string()
}

fn default_listen() -> String {
    "127.0.0.1:31847".to_string()
}

/// Store configuration loaded from `arpm.toml`.
///
/// # Example
///
/// ```toml
/// root = "/srv/arpm"
/// index_tool = "repo-add"
/// debug = false
/// listen = "127.0.0.1:31847"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per branch.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Program invoked as `<tool> <index-path> <archive-path>...`.
    #[serde(default = "default_index_tool")]
    pub index_tool: String,
    /// Verbose logging.
    #[serde(default)]
    pub debug: bool,
    /// Address the request layer listens on.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            index_tool: default_index_tool(),
            debug: false,
            listen: default_listen(),
        }
    }
}

impl StoreConfig {
    /// Config rooted at `root` with every other setting defaulted
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Set the index tool program
    pub fn with_index_tool(mut self, program: impl Into<String>) -> Self {
        self.index_tool = program.into();
        self
    }

    /// Enable or disable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::config("root directory cannot be empty"));
        }
        if self.index_tool.trim().is_empty() {
            return Err(Error::config("index_tool cannot be empty"));
        }
        self.listen_addr()?;
        Ok(())
    }

    /// Parsed listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            Error::config(format!("invalid listen address '{}': {}", self.listen, e))
        })
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# arpm repository configuration

# Directory holding one subdirectory per branch.
root = "/srv/arpm"

# Program that (re)writes a branch index:
#   <index_tool> <branch-dir>/<branch>.db.tar.gz <archive>...
# Must be on PATH unless given as a path.
index_tool = "repo-add"

# Verbose logging (default: false).
debug = false

# Address the HTTP layer listens on.
listen = "127.0.0.1:31847"
"#
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config(msg) => Error::config(format!("{} ('{}')", msg, path.display())),
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::io(path, e))?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}
