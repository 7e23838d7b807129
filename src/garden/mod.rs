//! Garden and journal screen: session state, rendering surface, and the
//! view that routes input into the [`crate::core::store::DayStore`].

/// Screen-level session state machine.
pub mod session;
/// Rendering surface abstraction and a headless implementation.
pub mod surface;
/// Input handling and day replay.
pub mod view;
