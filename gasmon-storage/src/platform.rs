//! Plataforma do cartão SD
//!
//! O firmware real fala FAT sobre SPI; no host o cartão é um diretório.

use std::fs;
use std::path::{Path, PathBuf};

use gasmon_core::PinId;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::spi::SpiConfig;

/// Operações que o [`SdCard`](crate::SdCard) pede à plataforma
pub trait SdPlatform {
    /// Conecta o cartão no barramento e monta o sistema de arquivos
    fn connect_sd(&mut self, spi: &SpiConfig, cs: &PinId) -> StorageResult<()>;

    /// Desmonta o sistema de arquivos
    fn unmount_sd(&mut self) -> StorageResult<()>;

    /// Nomes das entradas na raiz do cartão
    fn read_dir(&self) -> StorageResult<Vec<String>>;
}

impl<P: SdPlatform + ?Sized> SdPlatform for Box<P> {
    fn connect_sd(&mut self, spi: &SpiConfig, cs: &PinId) -> StorageResult<()> {
        (**self).connect_sd(spi, cs)
    }

    fn unmount_sd(&mut self) -> StorageResult<()> {
        (**self).unmount_sd()
    }

    fn read_dir(&self) -> StorageResult<Vec<String>> {
        (**self).read_dir()
    }
}

/// Cartão mapeado em um diretório do host
#[derive(Debug, Clone)]
pub struct HostSdPlatform {
    root: PathBuf,
    connected: bool,
}

impl HostSdPlatform {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            connected: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl SdPlatform for HostSdPlatform {
    fn connect_sd(&mut self, spi: &SpiConfig, cs: &PinId) -> StorageResult<()> {
        if !self.root.is_dir() {
            return Err(StorageError::Platform(format!(
                "no card at {}",
                self.root.display()
            )));
        }
        self.connected = true;
        debug!(bus = %spi.bus, %cs, root = %self.root.display(), "host SD connected");
        Ok(())
    }

    fn unmount_sd(&mut self) -> StorageResult<()> {
        self.connected = false;
        Ok(())
    }

    /// Listagem ordenada por nome
    fn read_dir(&self) -> StorageResult<Vec<String>> {
        let mut names = fs::read_dir(&self.root)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, _>>()?;
        names.sort();
        Ok(names)
    }
}
