//! Wrapper do cartão SD
//!
//! Monta no construtor. `mount()` e `unmount()` são idempotentes; acessos ao
//! sistema de arquivos com o cartão desmontado falham com
//! [`StorageError::Unmounted`].

use gasmon_core::{Component, PinId};
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::platform::SdPlatform;
use crate::spi::SpiConfig;

#[derive(Debug)]
pub struct SdCard<P> {
    spi: SpiConfig,
    cs: PinId,
    platform: P,
    mounted: bool,
}

impl<P: SdPlatform> SdCard<P> {
    /// Valida os argumentos e monta o cartão
    pub fn new(spi: SpiConfig, cs: impl Into<PinId>, platform: P) -> StorageResult<Self> {
        let cs = cs.into();
        if cs.is_empty() {
            return Err(StorageError::InvalidArgument(
                "chip-select pin is not specified".into(),
            ));
        }
        spi.validate()?;

        let mut card = Self {
            spi,
            cs,
            platform,
            mounted: false,
        };
        card.mount()?;
        Ok(card)
    }

    pub fn mount(&mut self) -> StorageResult<()> {
        if self.mounted {
            return Ok(());
        }
        self.platform.connect_sd(&self.spi, &self.cs)?;
        self.mounted = true;
        info!(bus = %self.spi.bus, cs = %self.cs, "SD card mounted");
        Ok(())
    }

    /// Desmonta o cartão; se a plataforma falhar, continua montado
    pub fn unmount(&mut self) -> StorageResult<()> {
        if !self.mounted {
            debug!("unmount ignored, SD card not mounted");
            return Ok(());
        }
        self.platform.unmount_sd()?;
        self.mounted = false;
        info!(cs = %self.cs, "SD card unmounted");
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Entradas na raiz do cartão
    pub fn list_files(&self) -> StorageResult<Vec<String>> {
        if !self.mounted {
            return Err(StorageError::Unmounted);
        }
        self.platform.read_dir()
    }

    pub fn spi(&self) -> &SpiConfig {
        &self.spi
    }

    pub fn cs(&self) -> &PinId {
        &self.cs
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

impl<P: SdPlatform + std::fmt::Debug> Component for SdCard<P> {
    fn name(&self) -> &str {
        "SdCard"
    }

    fn is_ready(&self) -> bool {
        self.mounted
    }
}
