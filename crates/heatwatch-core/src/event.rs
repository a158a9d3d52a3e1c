//! Calendar events as seen by the heating decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A calendar-derived time interval.
///
/// Both text fields are optional: calendars routinely contain events
/// without a description, and occasionally without a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CalendarEvent {
    /// Create a named event without description.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTimeRange`] if `end < start`.
    /// Zero-length events are accepted.
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let event = Self {
            summary: Some(summary.into()),
            description: None,
            start,
            end,
        };
        event.validate()?;
        Ok(event)
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the time range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.end < self.start {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Half-open overlap test used by event sources:
    /// `start < end_bound && end >= begin_bound`.
    ///
    /// An event whose end touches `begin_bound` is still included.
    pub fn overlaps(&self, begin_bound: DateTime<Utc>, end_bound: DateTime<Utc>) -> bool {
        self.start < end_bound && self.end >= begin_bound
    }

    /// Whether the description contains `tag`. No description never matches.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.description
            .as_deref()
            .is_some_and(|description| description.contains(tag))
    }
}
