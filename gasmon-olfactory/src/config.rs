//! Configuração do monitor de gás
//!
//! [`GasMonitorOptions`] aceita campos ausentes (TOML, builder) e
//! [`GasMonitorOptions::build`] valida tudo de uma vez, produzindo um
//! [`GasMonitorConfig`] completo ou `InvalidConfiguration`.

use std::time::Duration;

use gasmon_core::{PinId, config as env_config};
use serde::{Deserialize, Serialize};

use crate::driver::ConnectOptions;
use crate::error::{GasMonitorError, GasMonitorResult};
use crate::types::{GasKind, SensorModel};

/// Valores usados para campos opcionais não informados
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorDefaults {
    pub warmup_ms: u64,
    pub sample_interval_ms: u64,
    pub buffer_len: usize,
    pub start_value: f32,
    pub vref: f32,
}

impl MonitorDefaults {
    /// Defaults de fábrica (aquecimento de 30 s, amostra a cada 200 ms)
    pub const BUILTIN: Self = Self {
        warmup_ms: 30_000,
        sample_interval_ms: 200,
        buffer_len: 8,
        start_value: 0.0,
        vref: 3.3,
    };

    /// Defaults lidos de `.env` / `GASMON_*`
    pub fn from_env() -> Self {
        Self {
            warmup_ms: env_config::warmup_ms(),
            sample_interval_ms: env_config::sample_interval_ms(),
            buffer_len: env_config::buffer_len(),
            start_value: env_config::start_value(),
            vref: env_config::vref(),
        }
    }
}

impl Default for MonitorDefaults {
    fn default() -> Self {
        Self::BUILTIN
    }
}

/// Configuração parcial, como chega de um arquivo ou do chamador
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GasMonitorOptions {
    /// Pino de dados (ADC) (obrigatório)
    pub data_pin: Option<PinId>,
    /// Pino do aquecedor (obrigatório)
    pub heater_pin: Option<PinId>,
    /// Modelo do sensor (obrigatório)
    pub model: Option<SensorModel>,
    /// Gás medido (default: gás principal do modelo)
    pub gas: Option<GasKind>,
    pub warmup_ms: Option<u64>,
    pub sample_interval_ms: Option<u64>,
    pub vref: Option<f32>,
    /// Valor de preenchimento inicial do buffer
    pub start_value: Option<f32>,
    pub buffer_len: Option<usize>,
}

impl GasMonitorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrega opções de um documento TOML
    pub fn from_toml_str(source: &str) -> GasMonitorResult<Self> {
        toml::from_str(source).map_err(|e| GasMonitorError::InvalidConfiguration(e.to_string()))
    }

    pub fn data_pin(mut self, pin: impl Into<PinId>) -> Self {
        self.data_pin = Some(pin.into());
        self
    }

    pub fn heater_pin(mut self, pin: impl Into<PinId>) -> Self {
        self.heater_pin = Some(pin.into());
        self
    }

    pub fn model(mut self, model: SensorModel) -> Self {
        self.model = Some(model);
        self
    }

    pub fn gas(mut self, gas: GasKind) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn warmup_ms(mut self, ms: u64) -> Self {
        self.warmup_ms = Some(ms);
        self
    }

    pub fn sample_interval_ms(mut self, ms: u64) -> Self {
        self.sample_interval_ms = Some(ms);
        self
    }

    pub fn vref(mut self, vref: f32) -> Self {
        self.vref = Some(vref);
        self
    }

    pub fn start_value(mut self, value: f32) -> Self {
        self.start_value = Some(value);
        self
    }

    pub fn buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = Some(len);
        self
    }

    /// Valida usando os defaults do ambiente
    pub fn build(self) -> GasMonitorResult<GasMonitorConfig> {
        self.build_with(MonitorDefaults::from_env())
    }

    pub fn build_with(self, defaults: MonitorDefaults) -> GasMonitorResult<GasMonitorConfig> {
        let data_pin = required_pin(self.data_pin, "data_pin")?;
        let heater_pin = required_pin(self.heater_pin, "heater_pin")?;
        let model = self.model.ok_or_else(|| GasMonitorError::missing("model"))?;

        let gas = self.gas.unwrap_or_else(|| model.default_gas());
        if !model.supports(gas) {
            return Err(GasMonitorError::InvalidConfiguration(format!(
                "{model} cannot measure {gas}"
            )));
        }

        let vref = self.vref.unwrap_or(defaults.vref);
        if !vref.is_finite() || vref <= 0.0 {
            return Err(GasMonitorError::InvalidConfiguration(format!(
                "vref must be a positive voltage, got {vref}"
            )));
        }

        let buffer_len = self.buffer_len.unwrap_or(defaults.buffer_len);
        if buffer_len == 0 {
            return Err(GasMonitorError::InvalidConfiguration(
                "buffer_len must be at least 1".into(),
            ));
        }

        let start_value = self.start_value.unwrap_or(defaults.start_value);
        if !start_value.is_finite() {
            return Err(GasMonitorError::InvalidConfiguration(
                "start_value must be a finite number".into(),
            ));
        }

        let warmup_ms = self.warmup_ms.unwrap_or(defaults.warmup_ms);

        let sample_interval_ms = self.sample_interval_ms.unwrap_or(defaults.sample_interval_ms);
        if sample_interval_ms == 0 {
            return Err(GasMonitorError::InvalidConfiguration(
                "sample_interval_ms must be greater than zero".into(),
            ));
        }

        Ok(GasMonitorConfig {
            data_pin,
            heater_pin,
            model,
            gas,
            warmup: Duration::from_millis(warmup_ms),
            sample_interval: Duration::from_millis(sample_interval_ms),
            vref,
            start_value,
            buffer_len,
        })
    }
}

fn required_pin(pin: Option<PinId>, field: &str) -> GasMonitorResult<PinId> {
    match pin {
        Some(pin) if !pin.is_empty() => Ok(pin),
        _ => Err(GasMonitorError::missing(field)),
    }
}

/// Configuração validada do monitor
///
/// Só existe via [`GasMonitorOptions::build`] / [`GasMonitorOptions::build_with`];
/// os campos são somente leitura fora do crate.
///
/// ```compile_fail
/// use gasmon_olfactory::GasMonitorConfig;
///
/// fn zero_buffer(cfg: GasMonitorConfig) -> GasMonitorConfig {
///     GasMonitorConfig { buffer_len: 0, ..cfg }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GasMonitorConfig {
    pub(crate) data_pin: PinId,
    pub(crate) heater_pin: PinId,
    pub(crate) model: SensorModel,
    pub(crate) gas: GasKind,
    pub(crate) warmup: Duration,
    pub(crate) sample_interval: Duration,
    pub(crate) vref: f32,
    pub(crate) start_value: f32,
    pub(crate) buffer_len: usize,
}

impl GasMonitorConfig {
    pub fn data_pin(&self) -> &PinId {
        &self.data_pin
    }

    pub fn heater_pin(&self) -> &PinId {
        &self.heater_pin
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn gas(&self) -> GasKind {
        self.gas
    }

    /// Tempo de aquecimento antes da primeira leitura
    pub fn warmup(&self) -> Duration {
        self.warmup
    }

    /// Intervalo entre leituras
    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }

    pub fn vref(&self) -> f32 {
        self.vref
    }

    pub fn start_value(&self) -> f32 {
        self.start_value
    }

    /// Tamanho fixo do buffer de média (sempre >= 1)
    pub fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Parâmetros repassados ao `connect` do driver
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            data_pin: self.data_pin.clone(),
            heater_pin: self.heater_pin.clone(),
            model: self.model,
            vref: self.vref,
        }
    }
}
