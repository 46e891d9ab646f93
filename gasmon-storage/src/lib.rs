//! # gasmon-storage
//!
//! Cartão SD sobre SPI: montagem, desmontagem e listagem de arquivos.
//!
//! A configuração do barramento ([`SpiConfig`]) e o pino de chip-select são
//! injetados no construtor; o acesso ao hardware fica atrás de
//! [`SdPlatform`].
//!
//! ## Exemplo
//!
//! ```
//! use gasmon_storage::{HostSdPlatform, SdCard, SpiConfig};
//!
//! let dir = std::env::temp_dir();
//! let spi = SpiConfig::new("SPI2", "B13", "B14", "B15");
//! let mut card = SdCard::new(spi, "B1", HostSdPlatform::new(dir)).unwrap();
//! assert!(card.is_mounted());
//!
//! card.unmount().unwrap();
//! assert_eq!(card.list_files().unwrap_err().code(), 11);
//! ```

pub mod error;
pub mod platform;
pub mod sdcard;
pub mod spi;

pub use error::{StorageError, StorageErrorKind, StorageResult};
pub use platform::{HostSdPlatform, SdPlatform};
pub use sdcard::SdCard;
pub use spi::{DEFAULT_BAUD, SpiConfig};
