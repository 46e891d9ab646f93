//! # gasmon-core
//!
//! Abstrações compartilhadas pelos drivers gasmon.
//!
//! ## Módulos
//!
//! - [`traits`]: [`Component`], [`PinId`] e [`DriverError`]
//! - [`timer`]: contrato de timers da plataforma e event loop virtual
//! - [`config`]: defaults carregados de `.env` / variáveis de ambiente
//! - [`logging`]: instalação do subscriber de tracing
//!
//! ## Exemplo
//!
//! ```
//! use gasmon_core::prelude::*;
//! use std::time::Duration;
//!
//! let mut sched = VirtualScheduler::new();
//! let id = sched.schedule_once(Duration::from_millis(30_000));
//! assert!(sched.is_scheduled(id));
//! ```

pub mod config;
pub mod logging;
pub mod prelude;
pub mod timer;
pub mod traits;

pub use timer::{Scheduler, TimerId, TimerTarget, VirtualScheduler};
pub use traits::{Component, DriverError, PinId};
