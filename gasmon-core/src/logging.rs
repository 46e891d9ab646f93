//! Instalação do subscriber de tracing
//!
//! Bibliotecas só emitem eventos (`tracing::{debug, info, warn}`); quem
//! executa (binário, teste de integração) chama [`init_tracing`] uma vez.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Diretiva usada quando `RUST_LOG` não está definida
pub const DEFAULT_DIRECTIVE: &str = "gasmon_core=info,gasmon_olfactory=info,gasmon_storage=info";

/// Instala registry + `EnvFilter` + camada fmt.
///
/// Retorna `false` se já havia um subscriber global (chamadas repetidas são
/// inofensivas).
pub fn init_tracing(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}
