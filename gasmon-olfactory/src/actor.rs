//! Monitor em task própria (tokio)
//!
//! Em runtimes com timers paralelos, leituras do sensor e acessos do
//! chamador não podem se intercalar. Aqui uma única task é dona do
//! [`GasMonitor`]: comandos e expirações de timer chegam por canais e são
//! processados um por vez.

use std::collections::HashMap;
use std::time::Duration;

use gasmon_core::{Scheduler, TimerId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::driver::GasSensorDriver;
use crate::error::{GasMonitorError, GasMonitorResult};
use crate::monitor::{GasMonitor, StartOutcome, StopOutcome};
use crate::types::MonitorState;

struct TimerTask {
    handle: JoinHandle<()>,
    repeating: bool,
}

/// [`Scheduler`] sobre timers do tokio
///
/// Cada timer é uma task que devolve seu ID pelo canal `fired` quando
/// expira; cancelar aborta a task.
pub struct TokioScheduler {
    next_id: u64,
    fired: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, TimerTask>,
}

impl TokioScheduler {
    pub fn new(fired: mpsc::UnboundedSender<TimerId>) -> Self {
        Self {
            next_id: 0,
            fired,
            tasks: HashMap::new(),
        }
    }

    /// Timers ainda ativos
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Registra a entrega de uma expiração; one-shots deixam de existir
    pub fn delivered(&mut self, id: TimerId) {
        if self.tasks.get(&id).is_some_and(|task| !task.repeating) {
            self.tasks.remove(&id);
        }
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::new(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = self.allocate();
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = fired.send(id);
        });
        self.tasks.insert(
            id,
            TimerTask {
                handle,
                repeating: false,
            },
        );
        id
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        let id = self.allocate();
        let fired = self.fired.clone();
        let interval = interval.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if fired.send(id).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(
            id,
            TimerTask {
                handle,
                repeating: true,
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(task) = self.tasks.remove(&id) {
            task.handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }
}

enum Command {
    Start(oneshot::Sender<GasMonitorResult<StartOutcome>>),
    Stop(oneshot::Sender<GasMonitorResult<StopOutcome>>),
    CurrentValue(oneshot::Sender<GasMonitorResult<f32>>),
    AverageValue(oneshot::Sender<GasMonitorResult<f32>>),
    State(oneshot::Sender<MonitorState>),
    Samples(oneshot::Sender<Vec<f32>>),
    Heater(bool, oneshot::Sender<GasMonitorResult<()>>),
    Shutdown,
}

/// Handle clonável para um monitor rodando em task própria
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    commands: mpsc::UnboundedSender<Command>,
}

/// Move o monitor para uma task e devolve o handle.
///
/// A task termina em [`MonitorHandle::shutdown`] ou quando todos os handles
/// são descartados; o `JoinHandle` devolve o monitor (já parado).
pub fn spawn_monitor<D>(monitor: GasMonitor<D>) -> (MonitorHandle, JoinHandle<GasMonitor<D>>)
where
    D: GasSensorDriver + Send + 'static,
{
    let (commands, command_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(monitor, command_rx));
    (MonitorHandle { commands }, task)
}

async fn run<D>(
    mut monitor: GasMonitor<D>,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> GasMonitor<D>
where
    D: GasSensorDriver,
{
    let (fired_tx, mut fired_rx) = mpsc::unbounded_channel();
    let mut scheduler = TokioScheduler::new(fired_tx);

    loop {
        tokio::select! {
            biased;

            Some(id) = fired_rx.recv() => {
                scheduler.delivered(id);
                monitor.handle_timer(id, &mut scheduler);
            }
            command = commands.recv() => {
                match command {
                    None | Some(Command::Shutdown) => break,
                    Some(command) => dispatch(&mut monitor, &mut scheduler, command),
                }
            }
        }
    }

    if let Err(err) = monitor.stop(&mut scheduler) {
        warn!(error = %err, "failed to stop gas monitor on shutdown");
    }
    debug!("gas monitor task finished");
    monitor
}

fn dispatch<D: GasSensorDriver>(
    monitor: &mut GasMonitor<D>,
    scheduler: &mut TokioScheduler,
    command: Command,
) {
    // Resposta descartada = chamador desistiu; não é erro
    match command {
        Command::Start(reply) => {
            let _ = reply.send(monitor.start(scheduler));
        }
        Command::Stop(reply) => {
            let _ = reply.send(monitor.stop(scheduler));
        }
        Command::CurrentValue(reply) => {
            let _ = reply.send(monitor.current_value());
        }
        Command::AverageValue(reply) => {
            let _ = reply.send(monitor.average_value());
        }
        Command::State(reply) => {
            let _ = reply.send(monitor.state());
        }
        Command::Samples(reply) => {
            let _ = reply.send(monitor.samples());
        }
        Command::Heater(on, reply) => {
            let result = if on {
                monitor.heater_on()
            } else {
                monitor.heater_off()
            };
            let _ = reply.send(result);
        }
        Command::Shutdown => {}
    }
}

impl MonitorHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> GasMonitorResult<T> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .map_err(|_| GasMonitorError::MonitorClosed)?;
        rx.await.map_err(|_| GasMonitorError::MonitorClosed)
    }

    pub async fn start(&self) -> GasMonitorResult<StartOutcome> {
        self.request(Command::Start).await?
    }

    pub async fn stop(&self) -> GasMonitorResult<StopOutcome> {
        self.request(Command::Stop).await?
    }

    pub async fn current_value(&self) -> GasMonitorResult<f32> {
        self.request(Command::CurrentValue).await?
    }

    pub async fn average_value(&self) -> GasMonitorResult<f32> {
        self.request(Command::AverageValue).await?
    }

    pub async fn state(&self) -> GasMonitorResult<MonitorState> {
        self.request(Command::State).await
    }

    pub async fn samples(&self) -> GasMonitorResult<Vec<f32>> {
        self.request(Command::Samples).await
    }

    pub async fn heater_on(&self) -> GasMonitorResult<()> {
        self.request(|tx| Command::Heater(true, tx)).await?
    }

    pub async fn heater_off(&self) -> GasMonitorResult<()> {
        self.request(|tx| Command::Heater(false, tx)).await?
    }

    /// Pede o encerramento da task (o monitor é parado antes)
    pub fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}
