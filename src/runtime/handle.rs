use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, warn};

use crate::{
    breathing::timer::{BreathEvent, BreathingTimer},
    core::store::DayRecord,
    day::Clock,
    garden::{
        session::{Screen, Session, WelcomeAction},
        surface::GardenSurface,
        view::{GardenError, GardenView},
    },
    persist::KvStore,
    types::{DayOffset, MoodId, PlantedToken},
};

use super::events::GardenEvent;

/// Failures surfaced through [`GardenHandle`].
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The garden view rejected the command.
    #[error(transparent)]
    Garden(#[from] GardenError),
    /// The runtime loop has shut down.
    #[error("garden runtime is not running")]
    ChannelClosed,
}

/// Channel sizing for the runtime loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Commands that may queue before senders wait.
    pub command_queue_bound: usize,
    /// Events buffered per subscriber before lagging ones drop events.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front end to a garden view running on its own task.
///
/// Commands are applied one at a time in arrival order, so input events
/// never interleave.
#[derive(Clone)]
pub struct GardenHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<GardenEvent>,
    breath_tx: Option<broadcast::Sender<BreathEvent>>,
}

enum Command {
    SelectMood {
        mood: MoodId,
        resp: oneshot::Sender<()>,
    },
    Click {
        x: f64,
        y: f64,
        resp: oneshot::Sender<Result<Option<PlantedToken>, RuntimeError>>,
    },
    EditJournal {
        text: String,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    LetGo {
        resp: oneshot::Sender<Result<Option<PlantedToken>, RuntimeError>>,
    },
    RenderDay {
        offset: DayOffset,
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    PrevDay {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    NextDay {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
    Choose {
        action: WelcomeAction,
        resp: oneshot::Sender<Option<Screen>>,
    },
    BackToWelcome {
        resp: oneshot::Sender<()>,
    },
    ExitBreathing {
        resp: oneshot::Sender<bool>,
    },
    Session {
        resp: oneshot::Sender<Session>,
    },
    Record {
        resp: oneshot::Sender<Result<DayRecord, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `view` onto a tokio task and returns a handle to drive it.
///
/// When `breathing` is given, choosing the breathing card starts it and
/// leaving the breathing screen stops it.
pub fn spawn_garden<K, C, S>(
    view: GardenView<K, C, S>,
    breathing: Option<BreathingTimer>,
    config: RuntimeConfig,
) -> GardenHandle
where
    K: KvStore + 'static,
    C: Clock + Send + 'static,
    S: GardenSurface + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<GardenEvent>(config.event_capacity.max(1));
    let breath_tx = breathing.as_ref().map(BreathingTimer::event_sender);

    let events_tx_loop = events_tx.clone();
    tokio::spawn(async move {
        let mut view = view;
        let mut breathing = breathing;

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(cmd, &mut view, breathing.as_mut(), &events_tx_loop);
            if done {
                break;
            }
        }

        if let Some(timer) = breathing.as_mut() {
            timer.stop();
        }
        debug!("garden runtime stopped");
    });

    GardenHandle {
        cmd_tx,
        events_tx,
        breath_tx,
    }
}

impl GardenHandle {
    /// Subscribes to garden events.
    pub fn subscribe(&self) -> broadcast::Receiver<GardenEvent> {
        self.events_tx.subscribe()
    }

    /// Subscribes to breathing phase events; `None` without a timer.
    pub fn subscribe_breathing(&self) -> Option<broadcast::Receiver<BreathEvent>> {
        self.breath_tx.as_ref().map(broadcast::Sender::subscribe)
    }

    /// See [`GardenView::select_mood`].
    pub async fn select_mood(&self, mood: MoodId) -> Result<(), RuntimeError> {
        self.request(|resp| Command::SelectMood { mood, resp }).await
    }

    /// Garden click at pointer position `(x, y)`.
    pub async fn click(&self, x: f64, y: f64) -> Result<Option<PlantedToken>, RuntimeError> {
        self.request(|resp| Command::Click { x, y, resp }).await?
    }

    /// Journal text-input event.
    pub async fn edit_journal(&self, text: impl Into<String>) -> Result<(), RuntimeError> {
        let text = text.into();
        self.request(|resp| Command::EditJournal { text, resp }).await?
    }

    /// See [`GardenView::let_go`].
    pub async fn let_go(&self) -> Result<Option<PlantedToken>, RuntimeError> {
        self.request(|resp| Command::LetGo { resp }).await?
    }

    /// See [`GardenView::render_day`].
    pub async fn render_day(&self, offset: DayOffset) -> Result<(), RuntimeError> {
        self.request(|resp| Command::RenderDay { offset, resp }).await?
    }

    /// Shows the previous day.
    pub async fn prev_day(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::PrevDay { resp }).await?
    }

    /// Shows the next day.
    pub async fn next_day(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::NextDay { resp }).await?
    }

    /// Applies a welcome card.
    pub async fn choose(&self, action: WelcomeAction) -> Result<Option<Screen>, RuntimeError> {
        self.request(|resp| Command::Choose { action, resp }).await
    }

    /// Returns to the welcome screen, stopping any breathing cycle.
    pub async fn back_to_welcome(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::BackToWelcome { resp }).await
    }

    /// Leaves the breathing screen for the welcome screen.
    pub async fn exit_breathing(&self) -> Result<bool, RuntimeError> {
        self.request(|resp| Command::ExitBreathing { resp }).await
    }

    /// Snapshot of the session state.
    pub async fn session(&self) -> Result<Session, RuntimeError> {
        self.request(|resp| Command::Session { resp }).await
    }

    /// Persisted record of the day being shown.
    pub async fn record(&self) -> Result<DayRecord, RuntimeError> {
        self.request(|resp| Command::Record { resp }).await?
    }

    /// Stops the loop (and any running breathing cycle) after queued
    /// commands have been applied.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

fn handle_command<K, C, S>(
    cmd: Command,
    view: &mut GardenView<K, C, S>,
    breathing: Option<&mut BreathingTimer>,
    events_tx: &broadcast::Sender<GardenEvent>,
) -> bool
where
    K: KvStore,
    C: Clock,
    S: GardenSurface,
{
    match cmd {
        Command::SelectMood { mood, resp } => {
            view.select_mood(mood);
            let _ = events_tx.send(GardenEvent::MoodSelected { mood });
            let _ = resp.send(());
        }
        Command::Click { x, y, resp } => {
            let res = view
                .handle_garden_click(x, y)
                .and_then(|planted| {
                    if let Some(token) = planted {
                        let day = view.current_key()?;
                        let _ = events_tx.send(GardenEvent::Planted { day, token });
                    }
                    Ok(planted)
                })
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::EditJournal { text, resp } => {
            let res = view
                .edit_journal(&text)
                .and_then(|()| view.current_key())
                .map(|day| {
                    let _ = events_tx.send(GardenEvent::JournalSaved { day });
                })
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::LetGo { resp } => {
            let res = view
                .let_go()
                .and_then(|removed| {
                    if let Some(token) = removed {
                        let day = view.current_key()?;
                        let _ = events_tx.send(GardenEvent::LetGo { day, token });
                    }
                    Ok(removed)
                })
                .map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::RenderDay { offset, resp } => {
            let res = view.render_day(offset);
            let _ = resp.send(announce_day(view, res, events_tx));
        }
        Command::PrevDay { resp } => {
            let res = view.prev_day();
            let _ = resp.send(announce_day(view, res, events_tx));
        }
        Command::NextDay { resp } => {
            let res = view.next_day();
            let _ = resp.send(announce_day(view, res, events_tx));
        }
        Command::Choose { action, resp } => {
            let screen = view.choose(action);
            if let Some(screen) = screen {
                if screen == Screen::Breathing {
                    match breathing {
                        Some(timer) => timer.start(),
                        None => warn!("breathing chosen without a timer"),
                    }
                }
                let _ = events_tx.send(GardenEvent::ScreenChanged { screen });
            }
            let _ = resp.send(screen);
        }
        Command::BackToWelcome { resp } => {
            if let Some(timer) = breathing {
                timer.stop();
            }
            view.back_to_welcome();
            let _ = events_tx.send(GardenEvent::ScreenChanged {
                screen: Screen::Welcome,
            });
            let _ = resp.send(());
        }
        Command::ExitBreathing { resp } => {
            let exited = view.exit_breathing();
            if exited {
                if let Some(timer) = breathing {
                    timer.stop();
                }
                let _ = events_tx.send(GardenEvent::ScreenChanged {
                    screen: Screen::Welcome,
                });
            }
            let _ = resp.send(exited);
        }
        Command::Session { resp } => {
            let _ = resp.send(view.session().clone());
        }
        Command::Record { resp } => {
            let _ = resp.send(view.current_record().map_err(RuntimeError::from));
        }
        Command::Shutdown { resp } => {
            if let Some(timer) = breathing {
                timer.stop();
            }
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn announce_day<K, C, S>(
    view: &GardenView<K, C, S>,
    res: Result<(), GardenError>,
    events_tx: &broadcast::Sender<GardenEvent>,
) -> Result<(), RuntimeError>
where
    K: KvStore,
    C: Clock,
    S: GardenSurface,
{
    res?;
    let day = view.current_key()?;
    let offset = view.session().day_offset();
    let _ = events_tx.send(GardenEvent::DayRendered { day, offset });
    Ok(())
}
