//! Monitor de concentração de gás (sensores MQ)
//!
//! Máquina de estados:
//!
//! ```text
//!            start()                 aquecimento expira
//! Stopped ───────────► Warming ─────────────────────► Sampling
//!    ▲                    │                              │
//!    └────────────────────┴──────────── stop() ──────────┘
//! ```
//!
//! `start()` só agenda o timer de aquecimento; nada bloqueia. Cada expiração
//! do timer repetitivo em `Sampling` faz uma leitura e a grava no buffer
//! circular.

use gasmon_core::{Component, Scheduler, TimerId, TimerTarget};
use tracing::{debug, info, trace, warn};

use crate::config::GasMonitorConfig;
use crate::driver::{GasSensorDriver, SensorConnector};
use crate::error::{GasMonitorError, GasMonitorResult};
use crate::rolling::RollingAverage;
use crate::types::MonitorState;

/// Resultado de [`GasMonitor::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// O monitor já estava aquecendo ou amostrando; nada mudou
    AlreadyRunning,
}

/// Resultado de [`GasMonitor::stop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped,
    /// O monitor já estava parado; nada mudou
    AlreadyStopped,
}

/// Monitor de gás de um sensor físico
#[derive(Debug)]
pub struct GasMonitor<D> {
    config: GasMonitorConfig,
    driver: D,
    state: MonitorState,
    /// Última leitura; `None` quando parado
    value: Option<f32>,
    buffer: RollingAverage,
    warmup_timer: Option<TimerId>,
    sample_timer: Option<TimerId>,
    samples_taken: u64,
    failed_reads: u64,
}

impl<D: GasSensorDriver> GasMonitor<D> {
    /// Cria monitor parado com um driver já conectado
    pub fn new(config: GasMonitorConfig, driver: D) -> Self {
        let buffer = RollingAverage::new(config.buffer_len, config.start_value);
        Self {
            config,
            driver,
            state: MonitorState::Stopped,
            value: None,
            buffer,
            warmup_timer: None,
            sample_timer: None,
            samples_taken: 0,
            failed_reads: 0,
        }
    }

    /// Conecta o driver via `connector` e cria o monitor
    pub fn connect<C>(config: GasMonitorConfig, connector: &mut C) -> GasMonitorResult<Self>
    where
        C: SensorConnector<Driver = D>,
    {
        let driver = connector.connect(&config.connect_options())?;
        debug!(
            model = %config.model,
            data_pin = %config.data_pin,
            heater_pin = %config.heater_pin,
            "gas sensor connected"
        );
        Ok(Self::new(config, driver))
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn config(&self) -> &GasMonitorConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Conteúdo do buffer, do mais antigo ao mais recente (sem checar estado)
    pub fn samples(&self) -> Vec<f32> {
        self.buffer.to_vec()
    }

    /// Leituras gravadas desde a criação
    pub fn samples_taken(&self) -> u64 {
        self.samples_taken
    }

    /// Ticks em que o driver falhou
    pub fn failed_reads(&self) -> u64 {
        self.failed_reads
    }

    /// Inicia aquecimento e agenda o início da amostragem.
    ///
    /// Se o aquecedor não liga, o monitor continua parado.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> GasMonitorResult<StartOutcome> {
        if self.state.is_running() {
            debug!(state = %self.state, "start ignored, monitor already running");
            return Ok(StartOutcome::AlreadyRunning);
        }

        self.driver.heat(true)?;

        self.buffer.fill(self.config.start_value);
        self.value = Some(self.config.start_value);
        self.warmup_timer = Some(scheduler.schedule_once(self.config.warmup));
        self.state = MonitorState::Warming;

        info!(
            model = %self.config.model,
            warmup_ms = self.config.warmup.as_millis() as u64,
            "gas monitor warming up"
        );
        Ok(StartOutcome::Started)
    }

    /// Desliga o aquecedor, cancela os timers e limpa o valor atual.
    ///
    /// A desmontagem sempre completa; falha do aquecedor é devolvida depois.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) -> GasMonitorResult<StopOutcome> {
        if !self.state.is_running() {
            debug!("stop ignored, monitor already stopped");
            return Ok(StopOutcome::AlreadyStopped);
        }

        if let Some(id) = self.warmup_timer.take() {
            scheduler.cancel(id);
        }
        if let Some(id) = self.sample_timer.take() {
            scheduler.cancel(id);
        }
        self.state = MonitorState::Stopped;
        self.value = None;

        let heater = self.driver.heat(false);
        info!(samples = self.samples_taken, "gas monitor stopped");
        heater?;
        Ok(StopOutcome::Stopped)
    }

    /// Valor mais recente
    pub fn current_value(&self) -> GasMonitorResult<f32> {
        self.ensure_sampling()?;
        self.value.ok_or(GasMonitorError::NotSampling)
    }

    /// Média do buffer circular
    pub fn average_value(&self) -> GasMonitorResult<f32> {
        self.ensure_sampling()?;
        Ok(self.buffer.mean())
    }

    pub fn heater_on(&mut self) -> GasMonitorResult<()> {
        self.driver.heat(true)?;
        Ok(())
    }

    pub fn heater_off(&mut self) -> GasMonitorResult<()> {
        self.driver.heat(false)?;
        Ok(())
    }

    /// Despacha a expiração de um timer do monitor.
    ///
    /// IDs que não pertencem ao ciclo atual (expirações atrasadas de antes
    /// de um `stop`) são ignorados.
    pub fn handle_timer(&mut self, id: TimerId, scheduler: &mut dyn Scheduler) {
        if self.warmup_timer == Some(id) {
            self.warmup_timer = None;
            self.sample_timer = Some(scheduler.schedule_repeating(self.config.sample_interval));
            self.state = MonitorState::Sampling;
            info!(
                interval_ms = self.config.sample_interval.as_millis() as u64,
                "warm-up complete, sampling"
            );
        } else if self.sample_timer == Some(id) {
            self.read_value();
        } else {
            trace!(%id, "stale timer ignored");
        }
    }

    fn read_value(&mut self) {
        match self.driver.read(self.config.gas) {
            Ok(value) => {
                self.value = Some(value);
                self.buffer.push(value);
                self.samples_taken += 1;
                trace!(value, gas = %self.config.gas, "sample");
            }
            Err(err) => {
                self.failed_reads += 1;
                warn!(error = %err, gas = %self.config.gas, "gas sensor read failed");
            }
        }
    }

    fn ensure_sampling(&self) -> GasMonitorResult<()> {
        match self.state {
            MonitorState::Stopped => Err(GasMonitorError::NotSampling),
            MonitorState::Warming => Err(GasMonitorError::NotWarmedUp),
            MonitorState::Sampling => Ok(()),
        }
    }
}

impl<D: GasSensorDriver> TimerTarget for GasMonitor<D> {
    fn on_timer(&mut self, id: TimerId, scheduler: &mut dyn Scheduler) {
        self.handle_timer(id, scheduler);
    }
}

impl<D: GasSensorDriver + std::fmt::Debug> Component for GasMonitor<D> {
    fn name(&self) -> &str {
        "GasMonitor"
    }

    fn is_ready(&self) -> bool {
        self.state == MonitorState::Sampling
    }
}
