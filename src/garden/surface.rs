use crate::{
    garden::session::Screen,
    types::{MoodId, PlantedToken, Shape},
};

/// A token resolved to what the surface draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Horizontal offset from the canvas top-left.
    pub x: f64,
    /// Vertical offset from the canvas top-left.
    pub y: f64,
    /// Fill color.
    pub color: &'static str,
    /// Outline.
    pub shape: Shape,
}

impl From<&PlantedToken> for Marker {
    fn from(token: &PlantedToken) -> Self {
        let style = token.mood.style();
        Self {
            x: token.x,
            y: token.y,
            color: style.color,
            shape: style.shape,
        }
    }
}

/// Everything the garden view draws onto.
///
/// Markers are positioned absolutely, so the order they are placed in only
/// matters for [`GardenSurface::remove_last_marker`].
pub trait GardenSurface {
    /// Canvas top-left in pointer coordinates.
    fn origin(&self) -> (f64, f64);
    /// Draws one marker on top of the existing ones.
    fn place_marker(&mut self, marker: Marker);
    /// Removes the most recently placed marker, if any.
    fn remove_last_marker(&mut self);
    /// Removes every marker.
    fn clear_markers(&mut self);
    /// Replaces the journal text field contents.
    fn set_journal_text(&mut self, text: &str);
    /// Replaces the day navigation label.
    fn set_day_label(&mut self, label: &str);
    /// Highlights `mood` in the picker, or nothing.
    fn show_active_mood(&mut self, mood: Option<MoodId>);
    /// Switches the visible screen.
    fn show_screen(&mut self, screen: Screen, writing: bool);
}

/// In-memory surface that records what would be on screen.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    origin: (f64, f64),
    markers: Vec<Marker>,
    journal_text: String,
    day_label: String,
    active_mood: Option<MoodId>,
    screen: Screen,
    writing: bool,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// Surface whose canvas sits at the pointer origin.
    pub fn new() -> Self {
        Self::with_origin(0.0, 0.0)
    }

    /// Surface whose canvas top-left is at `(left, top)`.
    pub fn with_origin(left: f64, top: f64) -> Self {
        Self {
            origin: (left, top),
            markers: Vec::new(),
            journal_text: String::new(),
            day_label: String::new(),
            active_mood: None,
            screen: Screen::Welcome,
            writing: false,
        }
    }

    /// Moves the canvas, as a resize or scroll would.
    pub fn set_origin(&mut self, left: f64, top: f64) {
        self.origin = (left, top);
    }

    /// Markers in placement order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Journal field contents.
    pub fn journal_text(&self) -> &str {
        &self.journal_text
    }

    /// Day navigation label.
    pub fn day_label(&self) -> &str {
        &self.day_label
    }

    /// Highlighted mood.
    pub fn active_mood(&self) -> Option<MoodId> {
        self.active_mood
    }

    /// Visible screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Whether the journal is focused.
    pub fn writing(&self) -> bool {
        self.writing
    }
}

impl GardenSurface for HeadlessSurface {
    fn origin(&self) -> (f64, f64) {
        self.origin
    }

    fn place_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn remove_last_marker(&mut self) {
        self.markers.pop();
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn set_journal_text(&mut self, text: &str) {
        self.journal_text = text.to_string();
    }

    fn set_day_label(&mut self, label: &str) {
        self.day_label = label.to_string();
    }

    fn show_active_mood(&mut self, mood: Option<MoodId>) {
        self.active_mood = mood;
    }

    fn show_screen(&mut self, screen: Screen, writing: bool) {
        self.screen = screen;
        self.writing = writing;
    }
}
