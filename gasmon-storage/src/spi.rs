//! Configuração do barramento SPI
//!
//! Passada explicitamente ao construtor do cartão; não existe container
//! global de barramentos.

use gasmon_core::PinId;
use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Baud padrão do barramento do cartão
pub const DEFAULT_BAUD: u32 = 4_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiConfig {
    /// Nome do periférico (ex.: `"SPI2"`)
    pub bus: String,
    pub sck: PinId,
    pub miso: PinId,
    pub mosi: PinId,
    #[serde(default = "default_baud")]
    pub baud: u32,
}

fn default_baud() -> u32 {
    DEFAULT_BAUD
}

impl SpiConfig {
    pub fn new(
        bus: impl Into<String>,
        sck: impl Into<PinId>,
        miso: impl Into<PinId>,
        mosi: impl Into<PinId>,
    ) -> Self {
        Self {
            bus: bus.into(),
            sck: sck.into(),
            miso: miso.into(),
            mosi: mosi.into(),
            baud: DEFAULT_BAUD,
        }
    }

    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    /// Rejeita pinos vazios e baud zero
    pub fn validate(&self) -> StorageResult<()> {
        for (field, pin) in [("sck", &self.sck), ("miso", &self.miso), ("mosi", &self.mosi)] {
            if pin.is_empty() {
                return Err(StorageError::InvalidArgument(format!(
                    "SPI {field} pin is not specified"
                )));
            }
        }
        if self.baud == 0 {
            return Err(StorageError::InvalidArgument(
                "SPI baud rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spi_defaults() {
        let spi = SpiConfig::new("SPI2", "B13", "B14", "B15");
        assert_eq!(spi.baud, DEFAULT_BAUD);
        assert!(spi.validate().is_ok());
    }

    #[test]
    fn test_spi_rejects_blank_pin() {
        let spi = SpiConfig::new("SPI2", "B13", "  ", "B15");
        let err = spi.validate().unwrap_err();
        assert_eq!(err.code(), 10);
        assert!(err.to_string().contains("miso"));
    }

    #[test]
    fn test_spi_rejects_zero_baud() {
        let spi = SpiConfig::new("SPI2", "B13", "B14", "B15").with_baud(0);
        assert!(spi.validate().is_err());
    }
}
