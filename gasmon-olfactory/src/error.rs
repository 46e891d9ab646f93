//! Erros específicos do monitor de gás
//!
//! Cada variante expõe `{kind, code, message}`: [`GasMonitorError::kind`],
//! [`GasMonitorError::code`] e `Display`.

use gasmon_core::DriverError;
use thiserror::Error;

pub type GasMonitorResult<T> = Result<T, GasMonitorError>;

/// Categoria do erro, sem payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotWarmedUp,
    NotSampling,
    InvalidConfiguration,
    Driver,
    MonitorClosed,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GasMonitorError {
    /// Leitura pedida durante o aquecimento
    #[error("Heating is not completed")]
    NotWarmedUp,

    /// Leitura pedida com o monitor parado
    #[error("Data reading stopped")]
    NotSampling,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Sensor driver error: {0}")]
    Driver(#[from] DriverError),

    /// A task dona do monitor já terminou
    #[error("Monitor task is not running")]
    MonitorClosed,
}

impl GasMonitorError {
    pub const CODE_NOT_WARMED_UP: u16 = 10;
    pub const CODE_NOT_SAMPLING: u16 = 11;
    pub const CODE_INVALID_CONFIGURATION: u16 = 12;
    pub const CODE_DRIVER: u16 = 13;
    pub const CODE_MONITOR_CLOSED: u16 = 14;

    pub fn kind(&self) -> ErrorKind {
        match self {
            GasMonitorError::NotWarmedUp => ErrorKind::NotWarmedUp,
            GasMonitorError::NotSampling => ErrorKind::NotSampling,
            GasMonitorError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            GasMonitorError::Driver(_) => ErrorKind::Driver,
            GasMonitorError::MonitorClosed => ErrorKind::MonitorClosed,
        }
    }

    /// Código numérico estável
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotWarmedUp => Self::CODE_NOT_WARMED_UP,
            ErrorKind::NotSampling => Self::CODE_NOT_SAMPLING,
            ErrorKind::InvalidConfiguration => Self::CODE_INVALID_CONFIGURATION,
            ErrorKind::Driver => Self::CODE_DRIVER,
            ErrorKind::MonitorClosed => Self::CODE_MONITOR_CLOSED,
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        GasMonitorError::InvalidConfiguration(format!("the {field} argument is not specified"))
    }
}
