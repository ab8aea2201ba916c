use crate::types::{DistributionTag, DownloadTarget};

pub const DEFAULT_RELEASE_BASE_URL: &str =
    "https://github.com/software-t-rex/monospace/releases/download";

pub fn asset_name(tag: &DistributionTag) -> String {
    format!("monospace_{}.{}", tag, tag.archive_format().extension())
}

/// Build the release download URL for a resolved distribution
///
/// # Arguments
/// * `base_url` - Release host path, without the version segment
/// * `tag` - Distribution resolved for the host
/// * `version` - Release version, interpolated as-is after a `v` prefix
pub fn locate(base_url: &str, tag: &DistributionTag, version: &str) -> DownloadTarget {
    let asset_name = asset_name(tag);
    let url = format!(
        "{}/v{}/{}",
        base_url.trim_end_matches('/'),
        version,
        asset_name
    );

    DownloadTarget {
        url,
        asset_name,
        format: tag.archive_format(),
    }
}
