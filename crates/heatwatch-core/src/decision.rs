//! Heating-need decision over an event source.
//!
//! Every call is an independent evaluation of `(now, HeatConfig, events)`.
//! Margins are applied to each event on its own; overlapping or adjacent
//! events are never merged first. Two events whose raw intervals touch can
//! therefore leave a gap in which no heat is requested.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::HeatConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::event::CalendarEvent;
use crate::filter::EventFilter;
use crate::source::EventSource;
use crate::window::SearchWindow;

/// Decides whether heat is needed at a given instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeatNeededIndicator {
    config: HeatConfig,
}

impl HeatNeededIndicator {
    pub fn new(config: HeatConfig) -> Self {
        Self { config }
    }

    /// Replace the margins between evaluations.
    pub fn set_config(&mut self, config: HeatConfig) {
        self.config = config;
    }

    /// All qualifying events for `now`, in source order.
    ///
    /// # Errors
    /// Source failures are returned unchanged as [`CoreError::Source`](crate::CoreError::Source).
    /// A `now` whose margins overflow `DateTime<Utc>` is a
    /// [`CoreError::Validation`](crate::CoreError::Validation).
    pub fn evaluate_all<S: EventSource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Utc>,
        diagnostics: Option<&dyn Diagnostics>,
    ) -> Result<Vec<CalendarEvent>> {
        let window = SearchWindow::for_instant(now, &self.config)?;
        let qualifying = evaluate_window(&self.config, &window, source, diagnostics)?;
        report(qualifying.len(), now, diagnostics);
        Ok(qualifying)
    }

    /// Whether any event requests heat at `now`.
    ///
    /// Stops at the first qualifying event; remaining candidates are not
    /// classified.
    pub fn is_needed<S: EventSource + ?Sized>(
        &self,
        source: &S,
        now: DateTime<Utc>,
        diagnostics: Option<&dyn Diagnostics>,
    ) -> Result<bool> {
        let window = SearchWindow::for_instant(now, &self.config)?;
        let needed = qualifying(&self.config, &window, source, diagnostics)?
            .next()
            .is_some();

        report(usize::from(needed), now, diagnostics);
        Ok(needed)
    }
}

impl fmt::Display for HeatNeededIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeatNeededIndicator({})", self.config)
    }
}

/// Query `source` over `window` and keep the qualifying events.
///
/// Exposed so callers can replay an evaluation with a window of their
/// choosing, e.g. [`SearchWindow::exhaustive`].
pub fn evaluate_window<S: EventSource + ?Sized>(
    config: &HeatConfig,
    window: &SearchWindow,
    source: &S,
    diagnostics: Option<&dyn Diagnostics>,
) -> Result<Vec<CalendarEvent>> {
    Ok(qualifying(config, window, source, diagnostics)?.collect())
}

/// Query once, then classify lazily so callers may stop early.
fn qualifying<'a, S: EventSource + ?Sized>(
    config: &'a HeatConfig,
    window: &'a SearchWindow,
    source: &S,
    diagnostics: Option<&'a dyn Diagnostics>,
) -> Result<impl Iterator<Item = CalendarEvent> + 'a> {
    tracing::debug!(?window, config = %config, "querying events");

    let candidates = source.query_events(window.begin, window.end)?;
    let filter = EventFilter::new(config, window, diagnostics);

    Ok(candidates
        .into_iter()
        .filter(move |event| filter.classify(event).is_qualifying()))
}

fn report(qualifying: usize, now: DateTime<Utc>, diagnostics: Option<&dyn Diagnostics>) {
    let needed = qualifying > 0;
    tracing::info!(%now, needed, qualifying, "heating decision");
    if let Some(sink) = diagnostics {
        sink.emit(if needed { "Heating needed" } else { "No heating needed" });
    }
}
