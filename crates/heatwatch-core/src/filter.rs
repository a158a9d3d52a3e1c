//! Per-event classification.
//!
//! Rules are applied in order and the first match wins:
//! unnamed event, opt-out tag, elapsed cooloff, otherwise qualifying.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::HeatConfig;
use crate::diagnostics::Diagnostics;
use crate::event::CalendarEvent;
use crate::window::SearchWindow;

/// Why an event does not request heat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Exclusion {
    /// The event has no summary.
    Unnamed,
    /// The description carries the configured no-heat tag.
    NoHeatTag { tag: String },
    /// The event ends at or before `now + cooloff`.
    CooloffElapsed,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::Unnamed => write!(f, "unnamed"),
            Exclusion::NoHeatTag { tag } => write!(f, "tagged {tag}"),
            Exclusion::CooloffElapsed => write!(f, "cooloff elapsed"),
        }
    }
}

/// Outcome of classifying one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Qualifying,
    Excluded(Exclusion),
}

impl Verdict {
    pub fn is_qualifying(&self) -> bool {
        matches!(self, Verdict::Qualifying)
    }
}

/// Classifies candidate events against one config and one window.
pub struct EventFilter<'a> {
    config: &'a HeatConfig,
    window: &'a SearchWindow,
    diagnostics: Option<&'a dyn Diagnostics>,
}

impl<'a> EventFilter<'a> {
    pub fn new(
        config: &'a HeatConfig,
        window: &'a SearchWindow,
        diagnostics: Option<&'a dyn Diagnostics>,
    ) -> Self {
        Self {
            config,
            window,
            diagnostics,
        }
    }

    /// Classify `event`, emitting one diagnostic message for the verdict.
    pub fn classify(&self, event: &CalendarEvent) -> Verdict {
        let Some(summary) = event.summary.as_deref() else {
            tracing::debug!(start = %event.start, "skipping unnamed event");
            self.emit("skipping unnamed event");
            return Verdict::Excluded(Exclusion::Unnamed);
        };

        if let Some(tag) = self.config.no_heat_tag.as_deref().filter(|tag| event.has_tag(tag)) {
            let description = event.description.as_deref().unwrap_or_default();
            tracing::debug!(summary, tag, "event opted out of heating");
            self.emit(&format!(
                "Found event {summary} with {tag} in description:\n{description}"
            ));
            return Verdict::Excluded(Exclusion::NoHeatTag {
                tag: tag.to_string(),
            });
        }

        if self.window.cooloff_elapsed(event.end) {
            tracing::debug!(summary, end = %event.end, "cooloff already begun");
            self.emit(&format!("Cooloff already begun for event: {summary}"));
            return Verdict::Excluded(Exclusion::CooloffElapsed);
        }

        tracing::debug!(summary, "event needs heating");
        self.emit(&format!("Found event that needs heating: {summary}"));
        Verdict::Qualifying
    }

    fn emit(&self, message: &str) {
        if let Some(sink) = self.diagnostics {
            sink.emit(message);
        }
    }
}
