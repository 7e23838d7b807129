//! Runtime event stream payloads.

use crate::{
    day::DayKey,
    garden::session::Screen,
    types::{DayOffset, MoodId, PlantedToken},
};

/// Events emitted from the single-writer garden loop.
#[derive(Debug, Clone, PartialEq)]
pub enum GardenEvent {
    /// The active mood changed.
    MoodSelected {
        /// Newly active mood.
        mood: MoodId,
    },
    /// A token was planted and persisted.
    Planted {
        /// Day it belongs to.
        day: DayKey,
        /// Planted token.
        token: PlantedToken,
    },
    /// The most recent token of a day was removed.
    LetGo {
        /// Day it was removed from.
        day: DayKey,
        /// Removed token.
        token: PlantedToken,
    },
    /// A day was replayed onto the surface.
    DayRendered {
        /// Day shown.
        day: DayKey,
        /// Its offset from today.
        offset: DayOffset,
    },
    /// Journal text of a day was saved.
    JournalSaved {
        /// Day written.
        day: DayKey,
    },
    /// The visible screen changed.
    ScreenChanged {
        /// Screen now showing.
        screen: Screen,
    },
}
