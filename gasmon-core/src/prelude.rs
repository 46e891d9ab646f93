//! # Prelude - Re-exportações Convenientes
//!
//! ```
//! use gasmon_core::prelude::*;
//! ```

pub use crate::timer::{Scheduler, TimerId, TimerTarget, VirtualScheduler};
pub use crate::traits::{Component, DriverError, PinId};
