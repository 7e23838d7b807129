use std::str::FromStr;

use crate::types::{DayOffset, MoodId};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Entry screen with the action cards.
    Welcome,
    /// Garden canvas plus journal.
    Garden,
    /// Guided breathing exercise.
    Breathing,
}

/// Action cards offered on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WelcomeAction {
    /// Open the garden with `calm` preselected.
    Plant,
    /// Open the garden in writing mode.
    Journal,
    /// Start the breathing exercise.
    Breathe,
}

/// Returned when a string names no welcome action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown welcome action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for WelcomeAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plant" => Ok(Self::Plant),
            "journal" => Ok(Self::Journal),
            "breathe" => Ok(Self::Breathe),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Transient UI state. Never persisted.
///
/// The active mood survives day switches but is cleared whenever the user
/// returns to the welcome screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    screen: Screen,
    active_mood: Option<MoodId>,
    day_offset: DayOffset,
    writing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session on the welcome screen, today, no mood.
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            active_mood: None,
            day_offset: 0,
            writing: false,
        }
    }

    /// Visible screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Mood new tokens are planted with, if any.
    pub fn active_mood(&self) -> Option<MoodId> {
        self.active_mood
    }

    /// Offset of the day being shown.
    pub fn day_offset(&self) -> DayOffset {
        self.day_offset
    }

    /// True while the journal has focus.
    pub fn is_writing(&self) -> bool {
        self.writing
    }

    /// Activates `mood` and leaves writing mode.
    pub fn select_mood(&mut self, mood: MoodId) {
        self.active_mood = Some(mood);
        self.writing = false;
    }

    /// Moves to another day. The active mood is kept.
    pub fn set_day_offset(&mut self, offset: DayOffset) {
        self.day_offset = offset;
    }

    /// Applies a welcome card. Ignored (returns `None`) off the welcome screen.
    pub fn choose(&mut self, action: WelcomeAction) -> Option<Screen> {
        if self.screen != Screen::Welcome {
            return None;
        }
        match action {
            WelcomeAction::Plant => {
                self.screen = Screen::Garden;
                self.select_mood(MoodId::Calm);
            }
            WelcomeAction::Journal => {
                self.screen = Screen::Garden;
                self.writing = true;
            }
            WelcomeAction::Breathe => {
                self.screen = Screen::Breathing;
            }
        }
        Some(self.screen)
    }

    /// Returns to the welcome screen, clearing the mood and writing mode.
    pub fn back_to_welcome(&mut self) {
        self.screen = Screen::Welcome;
        self.active_mood = None;
        self.writing = false;
    }

    /// Leaves the breathing screen; always lands on the welcome screen.
    /// Returns `false` when breathing was not showing.
    pub fn exit_breathing(&mut self) -> bool {
        if self.screen != Screen::Breathing {
            return false;
        }
        self.back_to_welcome();
        true
    }
}
