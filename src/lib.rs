//! Day-keyed mood garden and journal, with a guided breathing timer.
//!
//! Each calendar day owns a journal text and an ordered list of planted
//! mood tokens, persisted in a string key-value medium under
//! `journal-<YYYY-MM-DD>` and `garden-<YYYY-MM-DD>`.
//!
//! # Examples
//!
//! Store usage with [`persist::MemoryKv`]:
//! ```
//! use chrono::NaiveDate;
//! use moodgarden::{
//!     core::store::DayStore,
//!     day::FixedClock,
//!     persist::MemoryKv,
//!     types::{MoodId, PlantedToken},
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("date");
//! let mut store = DayStore::new(MemoryKv::new(), FixedClock(today));
//! let key = store.key_for(0).expect("key");
//! assert_eq!(key.to_string(), "2026-10-16");
//!
//! store.append_plant(&key, PlantedToken::new(50.0, 80.0, MoodId::Happy)).expect("append");
//! assert_eq!(store.load_plants(&key).expect("load").len(), 1);
//! assert_eq!(store.remove_last_plant(&key).expect("pop").map(|t| t.mood), Some(MoodId::Happy));
//! assert!(store.remove_last_plant(&key).expect("pop").is_none());
//! ```
//!
//! Driving a garden view through the runtime handle:
//! ```no_run
//! use moodgarden::{
//!     config::load_config,
//!     garden::{session::WelcomeAction, surface::HeadlessSurface, view::GardenView},
//!     logging::init_tracing,
//!     runtime::handle::spawn_garden,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = load_config().expect("config");
//! init_tracing(&config.logging.filter);
//! let store = config.open_store().expect("open store");
//! let view = GardenView::open(store, HeadlessSurface::new()).expect("open view");
//! let handle = spawn_garden(view, None, config.runtime.clone());
//! handle.choose(WelcomeAction::Plant).await.expect("choose");
//! let _token = handle.click(120.0, 64.0).await.expect("click");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Guided breathing phases and timer.
pub mod breathing;
/// Layered configuration.
pub mod config;
/// Day-keyed journal and garden store.
pub mod core;
/// Day keys, labels, and clocks.
pub mod day;
/// Session state, surfaces, and the garden view.
pub mod garden;
/// Tracing subscriber setup.
pub mod logging;
/// Persistence abstraction and SQLite implementation.
pub mod persist;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
