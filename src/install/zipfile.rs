use super::{make_executable, Unpacker};
use crate::error::{InstallError, Result};
use crate::types::ArchiveFormat;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// Reads `monospace.exe` out of an in-memory zip archive.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipUnpacker;

impl Unpacker for ZipUnpacker {
    fn binary_name(&self) -> &'static str {
        ArchiveFormat::Zip.binary_name()
    }

    fn unpack(&self, body: &[u8], install_dir: &Path) -> Result<PathBuf> {
        let name = self.binary_name();
        let mut archive = ZipArchive::new(Cursor::new(body)).map_err(InstallError::archive)?;

        let mut file = match archive.by_name(name) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => {
                return Err(InstallError::Archive("empty archive".to_string()))
            }
            Err(e) => return Err(InstallError::archive(e)),
        };

        // Read fully before touching the install dir so a bad entry writes nothing.
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(InstallError::archive)?;

        let target = install_dir.join(name);
        fs::write(&target, &content)?;
        make_executable(&target)?;

        tracing::info!("Done extracting {}", name);
        Ok(target)
    }
}
