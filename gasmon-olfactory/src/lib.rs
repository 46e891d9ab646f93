//! # gasmon-olfactory - Monitor de gás MQ
//!
//! Amostragem periódica de concentração de gás sobre um driver de sensor da
//! série MQ: aquecimento obrigatório, leitura a intervalo fixo e média móvel
//! das N leituras mais recentes.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ GasMonitor                               │
//! │   Stopped → Warming → Sampling           │
//! │  ┌────────────────┐  ┌────────────────┐  │
//! │  │ RollingAverage │  │ GasSensorDriver│  │
//! │  └────────────────┘  └────────────────┘  │
//! └──────────────────▲───────────────────────┘
//!                    │ on_timer(id)
//!          Scheduler (VirtualScheduler | TokioScheduler)
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use gasmon_core::prelude::*;
//! use gasmon_olfactory::*;
//!
//! let config = GasMonitorOptions::new()
//!     .data_pin("A3")
//!     .heater_pin("P11")
//!     .model(SensorModel::Mq6)
//!     .build_with(MonitorDefaults::BUILTIN)?;
//!
//! let mut sched = VirtualScheduler::new();
//! let mut monitor = GasMonitor::new(config, SimulatedMqDriver::new(SensorModel::Mq6, [120.0]));
//!
//! monitor.start(&mut sched)?;
//! assert!(monitor.current_value().is_err());
//!
//! sched.advance_ms(30_200, &mut monitor);
//! assert_eq!(monitor.current_value()?, 120.0);
//! # Ok::<(), GasMonitorError>(())
//! ```

pub mod actor;
pub mod config;
pub mod driver;
pub mod error;
pub mod monitor;
pub mod rolling;
pub mod types;

pub use actor::{MonitorHandle, TokioScheduler, spawn_monitor};
pub use config::{GasMonitorConfig, GasMonitorOptions, MonitorDefaults};
pub use driver::{
    ConnectOptions, DriverProbe, GasSensorDriver, SensorConnector, SimulatedConnector,
    SimulatedMqDriver,
};
pub use error::{ErrorKind, GasMonitorError, GasMonitorResult};
pub use monitor::{GasMonitor, StartOutcome, StopOutcome};
pub use rolling::RollingAverage;
pub use types::{GasKind, MonitorState, SensorModel, ppm_to_percent};
