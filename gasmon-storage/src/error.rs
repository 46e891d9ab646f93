//! Erros do cartão SD

use gasmon_core::DriverError;
use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

/// Categoria do erro, sem payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    InvalidArgument,
    Unmounted,
    Platform,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Argumento de construção ausente ou inválido
    #[error("Error -> invalid arguments the constructor: {0}")]
    InvalidArgument(String),

    /// Acesso ao sistema de arquivos com o cartão desmontado
    #[error("Error -> accessing the unmounted SD")]
    Unmounted,

    #[error("SD platform error: {0}")]
    Platform(String),
}

impl StorageError {
    pub const CODE_INVALID_ARGUMENT: u16 = 10;
    pub const CODE_UNMOUNTED: u16 = 11;
    pub const CODE_PLATFORM: u16 = 12;

    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::InvalidArgument(_) => StorageErrorKind::InvalidArgument,
            StorageError::Unmounted => StorageErrorKind::Unmounted,
            StorageError::Platform(_) => StorageErrorKind::Platform,
        }
    }

    pub fn code(&self) -> u16 {
        match self.kind() {
            StorageErrorKind::InvalidArgument => Self::CODE_INVALID_ARGUMENT,
            StorageErrorKind::Unmounted => Self::CODE_UNMOUNTED,
            StorageErrorKind::Platform => Self::CODE_PLATFORM,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Platform(err.to_string())
    }
}

impl From<DriverError> for StorageError {
    fn from(err: DriverError) -> Self {
        StorageError::Platform(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StorageError::InvalidArgument("cs".into()).code(), 10);
        assert_eq!(StorageError::Unmounted.code(), 11);
        assert_eq!(StorageError::Platform("bus".into()).code(), 12);
    }

    #[test]
    fn test_unmounted_message() {
        let err = StorageError::Unmounted;
        assert_eq!(err.kind(), StorageErrorKind::Unmounted);
        assert_eq!(err.to_string(), "Error -> accessing the unmounted SD");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no card");
        let err: StorageError = io_err.into();
        assert_eq!(err.kind(), StorageErrorKind::Platform);
        assert!(err.to_string().contains("no card"));
    }

    #[test]
    fn test_error_from_driver() {
        let err: StorageError = DriverError::NotConnected.into();
        assert_eq!(err.code(), StorageError::CODE_PLATFORM);
    }
}
