//! Archive installation
//!
//! This module provides functionality for:
//! - Choosing the extraction strategy for an archive format
//! - Extracting the monospace executable from a downloaded archive
//! - Running the download-then-extract pipeline into the install directory

pub mod tarball;
pub mod zipfile;

pub use tarball::TarGzUnpacker;
pub use zipfile::ZipUnpacker;

use crate::download::{fetch, read_body};
use crate::error::Result;
use crate::types::{ArchiveFormat, DownloadTarget};
use reqwest::Client;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Turns a fully buffered archive into the installed executable.
pub trait Unpacker {
    /// File name of the executable, both inside the archive and once installed.
    fn binary_name(&self) -> &'static str;

    /// Writes the executable into `install_dir` and returns its path.
    fn unpack(&self, body: &[u8], install_dir: &Path) -> Result<PathBuf>;
}

pub fn unpacker_for(format: ArchiveFormat) -> &'static dyn Unpacker {
    match format {
        ArchiveFormat::TarGzip => &TarGzUnpacker,
        ArchiveFormat::Zip => &ZipUnpacker,
    }
}

pub fn install(body: &[u8], format: ArchiveFormat, install_dir: &Path) -> Result<PathBuf> {
    unpacker_for(format).unpack(body, install_dir)
}

/// Download the release archive and install the binary it carries.
///
/// The whole body is buffered before extraction starts. A previous binary at
/// the same path is replaced.
pub async fn install_release(
    client: &Client,
    target: &DownloadTarget,
    install_dir: &Path,
) -> Result<PathBuf> {
    fs::create_dir_all(install_dir)?;
    tracing::info!("will install binary at {}", install_dir.display());

    tracing::info!("Download binary archive from {}", target.url);
    let response = fetch(client, &target.url).await?;
    let body = read_body(response).await?;

    tracing::info!("Extracting archive {} ({} bytes)", target.asset_name, body.len());
    let executable_path = install(&body, target.format, install_dir)?;

    tracing::info!("monospace installed to {}", install_dir.display());
    Ok(executable_path)
}

pub(crate) fn remove_existing(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed previous binary at {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

pub(crate) fn make_executable(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstallError;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use mockito::Server;
    use tempfile::TempDir;

    fn tarball(content: &[u8]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::fast()));
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, "monospace", content).unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    fn target(url: String, format: ArchiveFormat) -> DownloadTarget {
        DownloadTarget {
            asset_name: url.rsplit('/').next().unwrap_or_default().to_string(),
            url,
            format,
        }
    }

    #[test]
    fn test_unpacker_selection() {
        assert_eq!(unpacker_for(ArchiveFormat::TarGzip).binary_name(), "monospace");
        assert_eq!(unpacker_for(ArchiveFormat::Zip).binary_name(), "monospace.exe");
        for format in [ArchiveFormat::TarGzip, ArchiveFormat::Zip] {
            assert_eq!(unpacker_for(format).binary_name(), format.binary_name());
        }
    }

    #[tokio::test]
    async fn test_install_release_end_to_end() {
        let mut server = Server::new_async().await;
        let asset = "/v1.2.3/monospace_Linux_x86_64.tar.gz";
        let _redirect = server
            .mock("GET", asset)
            .with_status(302)
            .with_header("location", "/objects/abc123")
            .create_async()
            .await;
        let _object = server
            .mock("GET", "/objects/abc123")
            .with_status(200)
            .with_body(tarball(b"monospace 1.2.3"))
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let install_dir = dir.path().join("bin");
        let client = crate::download::build_client().unwrap();
        let target = target(format!("{}{}", server.url(), asset), ArchiveFormat::TarGzip);

        let first = install_release(&client, &target, &install_dir).await.unwrap();
        let second = install_release(&client, &target, &install_dir).await.unwrap();

        assert_eq!(first, install_dir.join("monospace"));
        assert_eq!(first, second);
        assert_eq!(fs::read(&first).unwrap(), b"monospace 1.2.3");
    }

    #[tokio::test]
    async fn test_install_release_http_failure_skips_extraction() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/v9.9.9/monospace_Windows_x86_64.zip")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let client = crate::download::build_client().unwrap();
        let target = target(
            format!("{}/v9.9.9/monospace_Windows_x86_64.zip", server.url()),
            ArchiveFormat::Zip,
        );

        let err = install_release(&client, &target, dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, InstallError::HttpFailure { status: 404, .. }));
        assert!(!dir.path().join("monospace.exe").exists());
    }
}
