use super::{make_executable, remove_existing, Unpacker};
use crate::error::{InstallError, Result};
use crate::types::ArchiveFormat;
use flate2::read::GzDecoder;
use std::io;
use std::path::{Component, Path, PathBuf};
use tar::{Archive, EntryType};

/// Extracts the single `monospace` entry of a gzip-compressed tarball.
#[derive(Debug, Default, Clone, Copy)]
pub struct TarGzUnpacker;

impl Unpacker for TarGzUnpacker {
    fn binary_name(&self) -> &'static str {
        ArchiveFormat::TarGzip.binary_name()
    }

    fn unpack(&self, body: &[u8], install_dir: &Path) -> Result<PathBuf> {
        let name = self.binary_name();
        let target = install_dir.join(name);
        let mut archive = Archive::new(GzDecoder::new(body));

        let mut found = false;
        for entry in archive.entries().map_err(InstallError::archive)? {
            let mut entry = entry.map_err(InstallError::archive)?;
            let path = entry.path().map_err(InstallError::archive)?.into_owned();
            if !is_entry_named(&path, name) {
                continue;
            }

            // Anything but a plain file would leave no usable binary behind.
            let kind = entry.header().entry_type();
            if kind != EntryType::Regular {
                return Err(InstallError::Archive(format!(
                    "entry '{}' is not a regular file ({:?})",
                    path.display(),
                    kind
                )));
            }

            remove_existing(&target)?;
            if let Err(e) = entry.unpack(&target) {
                discard(&target);
                return Err(InstallError::archive(e));
            }
            found = true;
            break;
        }

        if !found {
            return Err(InstallError::Archive(format!("{} not found in archive", name)));
        }

        // The gzip checksum and length trailer are only checked at end of stream.
        if let Err(e) = io::copy(&mut archive.into_inner(), &mut io::sink()) {
            discard(&target);
            return Err(InstallError::archive(e));
        }

        make_executable(&target)?;
        tracing::info!("Done extracting {}", name);
        Ok(target)
    }
}

fn discard(path: &Path) {
    if let Err(e) = remove_existing(path) {
        tracing::warn!("Could not remove {}: {}", path.display(), e);
    }
}

fn is_entry_named(path: &Path, name: &str) -> bool {
    let mut parts = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir));
    matches!(
        (parts.next(), parts.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}
