//! # 🎯 Traits - Abstrações Fundamentais do gasmon
//!
//! Todo driver do workspace (monitor de gás, cartão SD) implementa
//! [`Component`]. Os colaboradores externos (driver do sensor, plataforma de
//! arquivos) reportam falhas de hardware via [`DriverError`].
//!
//! ## Princípio de Design
//!
//! > *"Trait no core, implementação no módulo."*
//!
//! As implementações concretas vivem nos crates específicos
//! (`gasmon-olfactory`, `gasmon-storage`).

use std::fmt;

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// TIPOS COMUNS
// ═══════════════════════════════════════════════════════════════════════════════

/// Handle de um pino da placa (ex.: `"A3"`, `"P11"`)
///
/// Substitui os containers globais de barramento: quem constrói o driver
/// passa o handle explicitamente.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(String);

impl PinId {
    /// Cria handle a partir do nome do pino
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().trim().to_string())
    }

    /// Nome do pino
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Pino sem nome (inválido para qualquer driver)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PinId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PinId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE - Todo componente gasmon
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base para qualquer driver do workspace.
///
/// # Exemplo
///
/// ```
/// use gasmon_core::traits::Component;
///
/// #[derive(Debug)]
/// struct Led;
///
/// impl Component for Led {
///     fn name(&self) -> &str { "led" }
/// }
///
/// assert!(Led.is_ready());
/// ```
pub trait Component: fmt::Debug {
    /// Nome único do componente (para logs e debug)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERROS DE DRIVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro reportado por um colaborador de hardware
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("Driver not connected")]
    NotConnected,
    #[error("Driver read failed: {0}")]
    ReadFailed(String),
    #[error("Unsupported measurement: {0}")]
    Unsupported(String),
    #[error("Hardware error: {0}")]
    Hardware(String),
}
