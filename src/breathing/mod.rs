//! Guided breathing exercise: a fixed phase cycle with haptic cues.

/// Phase model and timing configuration.
pub mod phase;
/// Cancellable phase timer.
pub mod timer;
