//! # heatwatch Core Library
//!
//! Decides whether a heater should be running right now, based on
//! calendar events. Each event requests heat from `preheat_minutes` before
//! it starts until `cooloff_minutes` before it ends; events whose
//! description carries a configured no-heat tag are ignored.
//!
//! ## Architecture
//!
//! - **Window**: derives the range to query from `now` and the margins
//! - **Filter**: classifies each candidate event (unnamed, tagged,
//!   cooloff elapsed, or qualifying)
//! - **Decision**: queries an [`EventSource`] and aggregates verdicts
//! - **Storage**: TOML configuration with environment overrides
//!
//! The crate never fetches calendars, retries failed queries or keeps
//! state between evaluations.
//!
//! ## Key Components
//!
//! - [`HeatNeededIndicator`]: `is_needed` / `evaluate_all`
//! - [`EventSource`]: collaborator contract for calendar backends
//! - [`Diagnostics`]: optional human-readable decision trace
//! - [`Config`]: application configuration management

pub mod config;
pub mod decision;
pub mod diagnostics;
pub mod error;
pub mod event;
pub mod filter;
pub mod source;
pub mod storage;
pub mod window;

pub use config::HeatConfig;
pub use decision::{evaluate_window, HeatNeededIndicator};
pub use diagnostics::{CollectingDiagnostics, Diagnostics, TextWrapper, WrappedWriter};
pub use error::{ConfigError, CoreError, SourceError, ValidationError};
pub use event::CalendarEvent;
pub use filter::{EventFilter, Exclusion, Verdict};
pub use source::{EventSource, MemoryCalendar};
pub use storage::{Config, DiagnosticsConfig};
pub use window::{boundary_epsilon, SearchWindow};
