//! Primitivas de timer da plataforma
//!
//! O runtime alvo é cooperativo e single-thread: um event loop com timers
//! one-shot e repetitivos. Os drivers agendam transições via [`Scheduler`] e
//! recebem a expiração em [`TimerTarget::on_timer`], identificada pelo
//! [`TimerId`] devolvido no agendamento.
//!
//! [`VirtualScheduler`] reproduz esse event loop sobre tempo virtual, de forma
//! determinística.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use tracing::trace;

/// Identificador de timer agendado
///
/// IDs são monotônicos e nunca reutilizados por um mesmo scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Contrato de timers da plataforma
pub trait Scheduler {
    /// Agenda uma única expiração após `delay`
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Agenda expirações a cada `interval` (a primeira após `interval`)
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancela o timer. Cancelar um ID desconhecido não faz nada.
    fn cancel(&mut self, id: TimerId);
}

/// Destino das expirações de timer
pub trait TimerTarget {
    fn on_timer(&mut self, id: TimerId, scheduler: &mut dyn Scheduler);
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    due: Duration,
    interval: Option<Duration>,
}

/// Event loop cooperativo sobre tempo virtual
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, TimerEntry>,
    fired: u64,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tempo virtual decorrido desde a criação
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Número de timers ativos
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Total de expirações despachadas
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Avança o relógio em `by`, despachando os timers vencidos em ordem.
    ///
    /// Empates no vencimento são resolvidos pela ordem de criação. Timers
    /// repetitivos são rearmados antes do despacho, então o callback pode
    /// cancelá-los.
    pub fn advance(&mut self, by: Duration, target: &mut dyn TimerTarget) {
        let deadline = self.now + by;

        while let Some((id, entry)) = self.next_due(deadline) {
            self.now = entry.due;

            match entry.interval {
                Some(interval) => {
                    self.timers.insert(
                        id,
                        TimerEntry {
                            due: entry.due + interval,
                            interval: Some(interval),
                        },
                    );
                }
                None => {
                    self.timers.remove(&id);
                }
            }

            self.fired += 1;
            trace!(%id, at_ms = self.now.as_millis() as u64, "timer fired");
            target.on_timer(id, self);
        }

        self.now = deadline;
    }

    /// Avança `by` em milissegundos
    pub fn advance_ms(&mut self, by: u64, target: &mut dyn TimerTarget) {
        self.advance(Duration::from_millis(by), target);
    }

    fn next_due(&self, deadline: Duration) -> Option<(TimerId, TimerEntry)> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, entry)| (*id, *entry))
    }

    fn insert(&mut self, delay: Duration, interval: Option<Duration>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            TimerEntry {
                due: self.now + delay,
                interval,
            },
        );
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        self.insert(delay, None)
    }

    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        // Intervalo zero travaria o loop no mesmo instante
        let interval = interval.max(Duration::from_millis(1));
        self.insert(interval, Some(interval))
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        fired: Vec<TimerId>,
        cancel_after: Option<(TimerId, usize)>,
    }

    impl TimerTarget for Recorder {
        fn on_timer(&mut self, id: TimerId, scheduler: &mut dyn Scheduler) {
            self.fired.push(id);
            if let Some((target, limit)) = self.cancel_after {
                if target == id && self.fired.iter().filter(|f| **f == id).count() >= limit {
                    scheduler.cancel(id);
                }
            }
        }
    }

    #[test]
    fn test_once_fires_a_single_time() {
        let mut sched = VirtualScheduler::new();
        let mut rec = Recorder::default();
        let id = sched.schedule_once(Duration::from_millis(100));

        sched.advance_ms(99, &mut rec);
        assert!(rec.fired.is_empty());
        assert!(sched.is_scheduled(id));

        sched.advance_ms(1, &mut rec);
        assert_eq!(rec.fired.len(), 1);
        assert!(!sched.is_scheduled(id));

        sched.advance_ms(1000, &mut rec);
        assert_eq!(rec.fired.len(), 1);
        assert_eq!(sched.now(), Duration::from_millis(1100));
    }

    #[test]
    fn test_repeating_fires_each_interval() {
        let mut sched = VirtualScheduler::new();
        let mut rec = Recorder::default();
        sched.schedule_repeating(Duration::from_millis(200));

        sched.advance_ms(1000, &mut rec);
        assert_eq!(rec.fired.len(), 5);
        assert_eq!(sched.fired(), 5);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn test_callback_can_cancel_repeating() {
        let mut sched = VirtualScheduler::new();
        let id = sched.schedule_repeating(Duration::from_millis(10));
        let mut rec = Recorder {
            cancel_after: Some((id, 3)),
            ..Default::default()
        };

        sched.advance_ms(1000, &mut rec);
        assert_eq!(rec.fired.len(), 3);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_ties_follow_creation_order() {
        let mut sched = VirtualScheduler::new();
        let mut rec = Recorder::default();
        let first = sched.schedule_once(Duration::from_millis(50));
        let second = sched.schedule_once(Duration::from_millis(50));

        sched.advance_ms(50, &mut rec);
        assert_eq!(rec.fired, vec![first, second]);
    }

    #[test]
    fn test_cancel_unknown_id_is_noop() {
        let mut sched = VirtualScheduler::new();
        sched.cancel(TimerId::new(42));
        assert_eq!(sched.pending(), 0);
    }
}
