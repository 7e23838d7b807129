use std::sync::{Arc, Mutex};

use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, info};

use super::phase::{BreathingConfig, Phase, PhaseCycle};

/// Receives vibration patterns (alternating on/off durations in ms).
///
/// Devices without vibration should ignore the call.
pub trait HapticSink: Send + Sync {
    /// Plays `pattern`.
    fn vibrate(&self, pattern: &[u32]);
}

/// Sink for devices without haptics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn vibrate(&self, _pattern: &[u32]) {}
}

/// Events emitted by [`BreathingTimer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreathEvent {
    /// A phase began.
    Phase {
        /// Phase now running.
        phase: Phase,
        /// How long it will run.
        duration_ms: u64,
    },
    /// The cycle was stopped; no further phases follow.
    Stopped,
}

struct Running {
    live: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

/// Runs the breathing cycle on a single tokio task that sleeps for each
/// phase's duration before announcing the next one.
pub struct BreathingTimer {
    config: BreathingConfig,
    haptics: Arc<dyn HapticSink>,
    events_tx: broadcast::Sender<BreathEvent>,
    running: Option<Running>,
}

impl BreathingTimer {
    /// Timer that fires cues into `haptics`.
    pub fn new(config: BreathingConfig, haptics: Arc<dyn HapticSink>) -> Self {
        let (events_tx, _) = broadcast::channel(64);
        Self {
            config,
            haptics,
            events_tx,
            running: None,
        }
    }

    /// Phase timings in use.
    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    /// Subscribes to phase changes.
    pub fn subscribe(&self) -> broadcast::Receiver<BreathEvent> {
        self.events_tx.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<BreathEvent> {
        self.events_tx.clone()
    }

    /// True between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Announces Inhale immediately, then keeps cycling until [`Self::stop`].
    /// A running cycle is stopped and restarted from Inhale.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let mut cycle = PhaseCycle::new(self.config.clone());
        let live = Arc::new(Mutex::new(true));
        announce(&cycle, self.haptics.as_ref(), &self.events_tx);

        let haptics = Arc::clone(&self.haptics);
        let events_tx = self.events_tx.clone();
        let task_live = Arc::clone(&live);
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(cycle.duration()).await;
                cycle.advance();

                let announced = {
                    let live = task_live.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    if *live {
                        announce(&cycle, haptics.as_ref(), &events_tx);
                    }
                    *live
                };
                if !announced {
                    return;
                }
            }
        });

        self.running = Some(Running { live, task });
        info!("breathing started");
    }

    /// Cancels the pending phase change. No phase is announced after this
    /// returns. Returns `false`, and does nothing, when not running.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return false;
        };

        *running.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = false;
        running.task.abort();
        let _ = self.events_tx.send(BreathEvent::Stopped);
        info!("breathing stopped");
        true
    }
}

impl Drop for BreathingTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn announce(cycle: &PhaseCycle, haptics: &dyn HapticSink, events_tx: &broadcast::Sender<BreathEvent>) {
    let phase = cycle.current();
    let pattern = cycle.haptic();
    if !pattern.is_empty() {
        haptics.vibrate(pattern);
    }
    debug!(phase = phase.label(), "breathing phase");
    let _ = events_tx.send(BreathEvent::Phase {
        phase,
        duration_ms: cycle.duration().as_millis() as u64,
    });
}
