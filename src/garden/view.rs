use tracing::{debug, info};

use crate::{
    core::store::{DayRecord, DayStore, StoreError},
    day::{self, Clock, DayKey},
    garden::{
        session::{Screen, Session, WelcomeAction},
        surface::{GardenSurface, Marker},
    },
    persist::KvStore,
    types::{DayOffset, MoodId, PlantedToken},
};

/// Failures raised while handling garden input.
#[derive(Debug, thiserror::Error)]
pub enum GardenError {
    /// The day store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for view operations.
pub type GardenResult<T> = Result<T, GardenError>;

/// Routes pointer, mood, and journal input into a [`DayStore`] and keeps a
/// [`GardenSurface`] showing the current day.
///
/// The view never writes storage itself; every mutation goes through the
/// store. It only owns the transient [`Session`].
pub struct GardenView<K, C, S> {
    store: DayStore<K, C>,
    surface: S,
    session: Session,
}

impl<K: KvStore, C: Clock, S: GardenSurface> GardenView<K, C, S> {
    /// Wraps `store` and `surface` without drawing anything.
    pub fn new(store: DayStore<K, C>, surface: S) -> Self {
        Self {
            store,
            surface,
            session: Session::new(),
        }
    }

    /// Builds a view and renders today on the welcome screen.
    pub fn open(store: DayStore<K, C>, surface: S) -> GardenResult<Self> {
        let mut view = Self::new(store, surface);
        view.surface.show_screen(Screen::Welcome, false);
        view.render_day(0)?;
        Ok(view)
    }

    /// Transient UI state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Backing store.
    pub fn store(&self) -> &DayStore<K, C> {
        &self.store
    }

    /// Rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable rendering surface, e.g. to move the canvas.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Key of the day being shown.
    pub fn current_key(&self) -> GardenResult<DayKey> {
        Ok(self.store.key_for(self.session.day_offset())?)
    }

    /// Persisted record of the day being shown.
    pub fn current_record(&self) -> GardenResult<DayRecord> {
        let key = self.current_key()?;
        Ok(self.store.load_record(&key)?)
    }

    /// Makes `mood` the one new tokens are planted with.
    pub fn select_mood(&mut self, mood: MoodId) {
        self.session.select_mood(mood);
        self.surface.show_active_mood(Some(mood));
        self.surface.show_screen(self.session.screen(), false);
        debug!(%mood, "mood selected");
    }

    /// Plants a token at the pointer position with the active mood.
    ///
    /// Does nothing and returns `None` until a mood has been selected.
    pub fn handle_garden_click(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
    ) -> GardenResult<Option<PlantedToken>> {
        let Some(mood) = self.session.active_mood() else {
            debug!("garden click ignored, no active mood");
            return Ok(None);
        };

        let (left, top) = self.surface.origin();
        let token = PlantedToken::new(pointer_x - left, pointer_y - top, mood);
        let key = self.current_key()?;

        self.store.append_plant(&key, token)?;
        self.surface.place_marker(Marker::from(&token));
        Ok(Some(token))
    }

    /// Shows the day at `offset`: label, journal text, then every token in
    /// the order it was planted.
    pub fn render_day(&mut self, offset: DayOffset) -> GardenResult<()> {
        let key = self.store.key_for(offset)?;
        let record = self.store.load_record(&key)?;

        self.session.set_day_offset(offset);
        self.surface.set_day_label(&day::label(&key, offset));
        self.surface.set_journal_text(&record.journal);
        self.surface.clear_markers();
        for token in &record.plants {
            self.surface.place_marker(Marker::from(token));
        }

        debug!(day = %key, offset, plants = record.plants.len(), "day rendered");
        Ok(())
    }

    /// Stores the journal field contents for the current day.
    pub fn edit_journal(&mut self, text: &str) -> GardenResult<()> {
        let key = self.current_key()?;
        self.store.save_journal(&key, text)?;
        Ok(())
    }

    /// Removes the most recently planted token of the current day, from
    /// storage and from the surface. Single step; there is no redo.
    pub fn let_go(&mut self) -> GardenResult<Option<PlantedToken>> {
        let key = self.current_key()?;
        let removed = self.store.remove_last_plant(&key)?;
        if removed.is_some() {
            self.surface.remove_last_marker();
        }
        Ok(removed)
    }

    /// Shows the previous day.
    pub fn prev_day(&mut self) -> GardenResult<()> {
        let offset = self.session.day_offset();
        let prev = offset
            .checked_sub(1)
            .ok_or(StoreError::OffsetOutOfRange(offset))?;
        self.render_day(prev)
    }

    /// Shows the next day.
    pub fn next_day(&mut self) -> GardenResult<()> {
        let offset = self.session.day_offset();
        let next = offset
            .checked_add(1)
            .ok_or(StoreError::OffsetOutOfRange(offset))?;
        self.render_day(next)
    }

    /// Applies a welcome card. Returns the new screen, or `None` when not on
    /// the welcome screen.
    pub fn choose(&mut self, action: WelcomeAction) -> Option<Screen> {
        let screen = self.session.choose(action)?;
        if action == WelcomeAction::Plant {
            self.surface.show_active_mood(self.session.active_mood());
        }
        self.surface.show_screen(screen, self.session.is_writing());
        info!(?action, ?screen, "welcome action");
        Some(screen)
    }

    /// Returns to the welcome screen and forgets the active mood.
    pub fn back_to_welcome(&mut self) {
        self.session.back_to_welcome();
        self.surface.show_active_mood(None);
        self.surface.show_screen(Screen::Welcome, false);
        info!("back to welcome");
    }

    /// Leaves the breathing screen for the welcome screen.
    pub fn exit_breathing(&mut self) -> bool {
        if !self.session.exit_breathing() {
            return false;
        }
        self.surface.show_active_mood(None);
        self.surface.show_screen(Screen::Welcome, false);
        info!("breathing exited");
        true
    }
}
