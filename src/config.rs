use crate::asset::DEFAULT_RELEASE_BASE_URL;
use crate::error::{InstallError, Result};
use crate::types::{PackageManager, PackageMetadata};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_INSTALL_DIR: &str = "./bin";
pub const DEFAULT_PACKAGE_JSON: &str = "./package.json";
pub const USER_AGENT_VAR: &str = "npm_config_user_agent";
pub const ARM_VERSION_VAR: &str = "npm_config_arm_version";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub install_dir: PathBuf,
    pub release_base_url: String,
    pub package_json: PathBuf,
    pub release_version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from(DEFAULT_INSTALL_DIR),
            release_base_url: DEFAULT_RELEASE_BASE_URL.to_string(),
            package_json: PathBuf::from(DEFAULT_PACKAGE_JSON),
            release_version: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with `MONOSPACE_*` overrides applied from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = lookup("MONOSPACE_INSTALL_DIR") {
            settings.install_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup("MONOSPACE_RELEASE_BASE_URL") {
            settings.release_base_url = url;
        }
        if let Some(path) = lookup("MONOSPACE_PACKAGE_JSON") {
            settings.package_json = PathBuf::from(path);
        }
        if let Some(version) = lookup("MONOSPACE_RELEASE_VERSION") {
            settings.release_version = Some(version);
        }

        settings
    }

    /// Version to download: the explicit override, else the package metadata's.
    pub fn release_version(&self) -> Result<String> {
        let version = match &self.release_version {
            Some(version) => version.clone(),
            None => load_package_metadata(&self.package_json)?.version,
        };
        Ok(normalize_version(&version))
    }
}

pub fn load_package_metadata(path: &Path) -> Result<PackageMetadata> {
    let metadata_error = |message: String| InstallError::Metadata {
        path: path.to_path_buf(),
        message,
    };

    let content = fs::read_to_string(path).map_err(|e| metadata_error(e.to_string()))?;
    let metadata: PackageMetadata =
        serde_json::from_str(&content).map_err(|e| metadata_error(e.to_string()))?;

    tracing::debug!(
        "Read version {} of {} from {}",
        metadata.version,
        metadata.name.as_deref().unwrap_or("package"),
        path.display()
    );
    Ok(metadata)
}

pub fn normalize_version(version: &str) -> String {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .to_string()
}

/// Parse a `name/version rest...` package manager user agent.
pub fn parse_user_agent(user_agent: &str) -> Option<PackageManager> {
    let re = Regex::new(r"^(?P<name>[^/]+)/(?P<version>[\d.]+)\s+.*$").ok()?;
    let caps = re.captures(user_agent)?;
    Some(PackageManager {
        name: caps["name"].to_string(),
        version: caps["version"].to_string(),
    })
}

/// The installer only runs on behalf of a package manager.
pub fn detect_package_manager(user_agent: Option<&str>) -> Result<PackageManager> {
    let pm = user_agent
        .and_then(parse_user_agent)
        .ok_or(InstallError::MissingInvoker)?;
    tracing::debug!("Invoked by {} {}", pm.name, pm.version);
    Ok(pm)
}
