//! Contrato do driver de sensor MQ e implementação simulada
//!
//! O driver real (leitura de ADC, curva do elemento sensor, PWM do
//! aquecedor) é externo. O monitor só depende de [`GasSensorDriver`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use gasmon_core::{DriverError, PinId};
use serde::{Deserialize, Serialize};

use crate::types::{GasKind, SensorModel};

/// Driver conectado a um sensor físico
pub trait GasSensorDriver {
    /// Lê a concentração atual do gás (ppm)
    fn read(&mut self, gas: GasKind) -> Result<f32, DriverError>;

    /// Liga/desliga o aquecedor do elemento sensor
    fn heat(&mut self, on: bool) -> Result<(), DriverError>;
}

impl<D: GasSensorDriver + ?Sized> GasSensorDriver for Box<D> {
    fn read(&mut self, gas: GasKind) -> Result<f32, DriverError> {
        (**self).read(gas)
    }

    fn heat(&mut self, on: bool) -> Result<(), DriverError> {
        (**self).heat(on)
    }
}

/// Parâmetros de conexão do driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectOptions {
    /// Pino de dados (ADC)
    pub data_pin: PinId,
    /// Pino de controle do aquecedor (PWM)
    pub heater_pin: PinId,
    pub model: SensorModel,
    /// Tensão de referência do ADC (V)
    pub vref: f32,
}

/// `connect(config) -> handle`
pub trait SensorConnector {
    type Driver: GasSensorDriver;

    fn connect(&mut self, options: &ConnectOptions) -> Result<Self::Driver, DriverError>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// DRIVER SIMULADO
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct ProbeState {
    heating: AtomicBool,
    reads: AtomicU64,
    fail_reads: AtomicBool,
    fail_heat: AtomicBool,
}

/// Visão compartilhada do driver simulado
///
/// Permite observar o aquecedor e injetar falhas mesmo depois que o driver
/// foi movido para dentro do monitor (ou para outra task).
#[derive(Debug, Clone, Default)]
pub struct DriverProbe {
    inner: Arc<ProbeState>,
}

impl DriverProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_heating(&self) -> bool {
        self.inner.heating.load(Ordering::SeqCst)
    }

    /// Leituras bem-sucedidas até agora
    pub fn reads(&self) -> u64 {
        self.inner.reads.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_heat(&self, fail: bool) {
        self.inner.fail_heat.store(fail, Ordering::SeqCst);
    }
}

/// Driver MQ determinístico: devolve as leituras roteirizadas em ciclo
#[derive(Debug, Clone)]
pub struct SimulatedMqDriver {
    model: SensorModel,
    script: Vec<f32>,
    cursor: usize,
    probe: DriverProbe,
}

impl SimulatedMqDriver {
    /// Cria driver com as leituras a devolver (em ciclo).
    ///
    /// Roteiro vazio devolve sempre 0.0.
    pub fn new(model: SensorModel, readings: impl IntoIterator<Item = f32>) -> Self {
        Self::with_probe(model, readings, DriverProbe::new())
    }

    pub fn with_probe(
        model: SensorModel,
        readings: impl IntoIterator<Item = f32>,
        probe: DriverProbe,
    ) -> Self {
        let mut script: Vec<f32> = readings.into_iter().collect();
        if script.is_empty() {
            script.push(0.0);
        }
        Self {
            model,
            script,
            cursor: 0,
            probe,
        }
    }

    pub fn model(&self) -> SensorModel {
        self.model
    }

    pub fn probe(&self) -> DriverProbe {
        self.probe.clone()
    }
}

impl GasSensorDriver for SimulatedMqDriver {
    fn read(&mut self, gas: GasKind) -> Result<f32, DriverError> {
        if !self.model.supports(gas) {
            return Err(DriverError::Unsupported(format!(
                "{} cannot measure {}",
                self.model, gas
            )));
        }
        if self.probe.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(DriverError::ReadFailed("simulated ADC failure".into()));
        }

        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        self.probe.inner.reads.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    fn heat(&mut self, on: bool) -> Result<(), DriverError> {
        if self.probe.inner.fail_heat.load(Ordering::SeqCst) {
            return Err(DriverError::Hardware("heater PWM not responding".into()));
        }
        self.probe.inner.heating.store(on, Ordering::SeqCst);
        Ok(())
    }
}

/// Conector que produz [`SimulatedMqDriver`]s com o mesmo roteiro e probe
#[derive(Debug, Clone, Default)]
pub struct SimulatedConnector {
    readings: Vec<f32>,
    probe: DriverProbe,
}

impl SimulatedConnector {
    pub fn new(readings: impl IntoIterator<Item = f32>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            probe: DriverProbe::new(),
        }
    }

    pub fn probe(&self) -> DriverProbe {
        self.probe.clone()
    }
}

impl SensorConnector for SimulatedConnector {
    type Driver = SimulatedMqDriver;

    fn connect(&mut self, options: &ConnectOptions) -> Result<Self::Driver, DriverError> {
        if options.data_pin.is_empty() || options.heater_pin.is_empty() {
            return Err(DriverError::NotConnected);
        }
        Ok(SimulatedMqDriver::with_probe(
            options.model,
            self.readings.iter().copied(),
            self.probe.clone(),
        ))
    }
}
