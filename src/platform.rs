use crate::error::{InstallError, Result};
use crate::types::{DistributionTag, PlatformKey};

// Only go first class targets are published.
const OPERATING_SYSTEMS: &[(&str, &str)] = &[
    ("darwin", "Darwin"),
    ("freebsd", "Freebsd"),
    ("linux", "Linux"),
    ("openbsd", "Openbsd"),
    ("win32", "Windows"),
];

const ARCHITECTURES: &[(&str, &str)] = &[
    ("arm", "arm"),
    ("arm64", "arm64"),
    ("ia32", "i386"),
    ("x64", "x86_64"),
];

pub const SUPPORTED_DISTRIBUTIONS: &[&str] = &[
    "Darwin_arm64",
    "Darwin_x86_64",
    "Freebsd_arm64",
    "Freebsd_armv6",
    "Freebsd_armv7",
    "Freebsd_i386",
    "Freebsd_x86_64",
    "Linux_arm64",
    "Linux_armv6",
    "Linux_armv7",
    "Linux_i386",
    "Linux_x86_64",
    "Openbsd_arm64",
    "Openbsd_armv6",
    "Openbsd_armv7",
    "Openbsd_i386",
    "Openbsd_x86_64",
    "Windows_i386",
    "Windows_x86_64",
];

fn lookup(table: &[(&str, &'static str)], raw: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == raw)
        .map(|(_, canonical)| *canonical)
}

pub fn canonical_os(raw: &str) -> Option<&'static str> {
    lookup(OPERATING_SYSTEMS, raw)
}

pub fn canonical_arch(raw: &str) -> Option<&'static str> {
    lookup(ARCHITECTURES, raw)
}

impl PlatformKey {
    pub fn new(os: impl Into<String>, arch: impl Into<String>, arm_version: Option<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
            arm_version,
        }
    }

    /// Describes the running process in the identifiers the lookup tables use.
    pub fn host() -> Self {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            "windows" => "win32",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "x64",
            "x86" => "ia32",
            "aarch64" => "arm64",
            other => other,
        };
        let arm_version = (arch == "arm").then(|| {
            if cfg!(target_feature = "v7") {
                "7".to_string()
            } else {
                "6".to_string()
            }
        });

        Self::new(os, arch, arm_version)
    }
}

/// Turns raw host identifiers into a published distribution tag.
///
/// The ARM sub-version is only consulted for 32-bit ARM. Anything that does not
/// land in [`SUPPORTED_DISTRIBUTIONS`] is rejected, since no asset exists for it.
pub fn resolve(key: &PlatformKey) -> Result<DistributionTag> {
    let os = canonical_os(&key.os);
    let arch = canonical_arch(&key.arch);

    let (os, arch) = match (os, arch) {
        (Some(os), Some(arch)) => (os, arch),
        _ => {
            return Err(InstallError::UnsupportedPlatform {
                tag: format!(
                    "{}_{}",
                    os.unwrap_or(key.os.as_str()),
                    arch.unwrap_or(key.arch.as_str())
                ),
            })
        }
    };

    let arch = if arch == "arm" {
        let version = key.arm_version.as_deref().unwrap_or_default();
        format!("{}v{}", arch, version.trim_start_matches('v'))
    } else {
        arch.to_string()
    };

    let tag = DistributionTag { os, arch };
    let name = tag.to_string();
    if !SUPPORTED_DISTRIBUTIONS.contains(&name.as_str()) {
        return Err(InstallError::UnsupportedPlatform { tag: name });
    }

    tracing::debug!("Resolved {}/{} to {}", key.os, key.arch, name);
    Ok(tag)
}
