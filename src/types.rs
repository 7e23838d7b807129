//! Shared primitive types: moods, their styles, and planted tokens.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Signed count of days relative to today.
pub type DayOffset = i64;

/// Closed set of moods a token can be planted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodId {
    /// Quiet, settled.
    Calm,
    /// Bright, upbeat.
    Happy,
    /// Weighed down.
    Heavy,
    /// Warm, affectionate.
    Love,
}

impl MoodId {
    /// Every mood in picker order.
    pub const ALL: [MoodId; 4] = [MoodId::Calm, MoodId::Happy, MoodId::Heavy, MoodId::Love];

    /// Lowercase identifier, as stored and as used by the mood picker.
    pub fn as_str(self) -> &'static str {
        match self {
            MoodId::Calm => "calm",
            MoodId::Happy => "happy",
            MoodId::Heavy => "heavy",
            MoodId::Love => "love",
        }
    }

    /// Rendering style for this mood.
    pub fn style(self) -> MoodStyle {
        match self {
            MoodId::Calm => MoodStyle {
                color: "#f2a8c9",
                shape: Shape::Flower,
            },
            MoodId::Happy => MoodStyle {
                color: "#f7b267",
                shape: Shape::Tulip,
            },
            MoodId::Heavy => MoodStyle {
                color: "#a8d5ba",
                shape: Shape::Leaf,
            },
            MoodId::Love => MoodStyle {
                color: "#e68aa4",
                shape: Shape::Heart,
            },
        }
    }
}

impl fmt::Display for MoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known mood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl FromStr for MoodId {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMood(s.to_string()))
    }
}

/// Marker outline drawn for a mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Round petals.
    Flower,
    /// Cupped bloom.
    Tulip,
    /// Single leaf.
    Leaf,
    /// Heart.
    Heart,
}

impl Shape {
    /// CSS-style class name of the shape.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Flower => "flower",
            Shape::Tulip => "tulip",
            Shape::Leaf => "leaf",
            Shape::Heart => "heart",
        }
    }
}

/// Color and shape a mood renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodStyle {
    /// Hex fill color.
    pub color: &'static str,
    /// Marker shape.
    pub shape: Shape,
}

/// A single garden marking, positioned relative to the canvas top-left at
/// the time it was planted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantedToken {
    /// Horizontal offset in canvas pixels.
    pub x: f64,
    /// Vertical offset in canvas pixels.
    pub y: f64,
    /// Mood the token was planted with.
    pub mood: MoodId,
}

impl PlantedToken {
    /// Builds a token at `(x, y)`.
    pub fn new(x: f64, y: f64, mood: MoodId) -> Self {
        Self { x, y, mood }
    }
}
