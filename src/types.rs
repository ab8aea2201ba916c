use serde::Deserialize;
use std::fmt;

/// Raw host identifiers, as reported by the environment the installer runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformKey {
    pub os: String,
    pub arch: String,
    pub arm_version: Option<String>,
}

/// Canonical `<OS>_<Arch>[ArmVersion]` name of a release asset variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionTag {
    pub os: &'static str,
    pub arch: String,
}

impl DistributionTag {
    pub fn is_windows(&self) -> bool {
        self.os == "Windows"
    }

    pub fn archive_format(&self) -> ArchiveFormat {
        if self.is_windows() {
            ArchiveFormat::Zip
        } else {
            ArchiveFormat::TarGzip
        }
    }
}

impl fmt::Display for DistributionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGzip,
    Zip,
}

impl ArchiveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarGzip => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }

    /// Name of the executable carried inside archives of this format.
    pub fn binary_name(&self) -> &'static str {
        match self {
            ArchiveFormat::TarGzip => "monospace",
            ArchiveFormat::Zip => "monospace.exe",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::TarGzip => write!(f, "tar+gzip"),
            ArchiveFormat::Zip => write!(f, "zip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub asset_name: String,
    pub format: ArchiveFormat,
}

/// Package manager that launched the installer, parsed from its user agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    pub name: String,
    pub version: String,
}

/// The subset of `package.json` the installer reads.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageMetadata {
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
}
