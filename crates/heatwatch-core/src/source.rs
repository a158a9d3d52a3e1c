//! Event sources.
//!
//! The decision never fetches events on its own; it asks an
//! [`EventSource`] for the events overlapping a search window. Remote
//! calendars live outside this crate and plug in through the trait.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::SourceError;
use crate::event::CalendarEvent;

/// Every calendar backend implements this trait.
pub trait EventSource: Send + Sync {
    /// Return every stored event with `start < end && event.end >= begin`,
    /// in source order.
    ///
    /// Implementations own their timeout and retry policy; the caller
    /// propagates any error unchanged.
    fn query_events(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, SourceError>;
}

impl<T: EventSource + ?Sized> EventSource for &T {
    fn query_events(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, SourceError> {
        (**self).query_events(begin, end)
    }
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn query_events(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, SourceError> {
        (**self).query_events(begin, end)
    }
}

/// An ordered, in-memory list of events.
#[derive(Debug, Clone, Default)]
pub struct MemoryCalendar {
    events: Vec<CalendarEvent>,
}

impl MemoryCalendar {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn push(&mut self, event: CalendarEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Parse a JSON array of events.
    ///
    /// # Errors
    /// Returns [`SourceError::Parse`] for malformed JSON and
    /// [`SourceError::Invalid`] for an event ending before it starts.
    pub fn from_json_str(json: &str) -> Result<Self, SourceError> {
        Self::parse(json, Path::new("<inline>"))
    }

    /// Load a JSON array of events from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    fn parse(json: &str, origin: &Path) -> Result<Self, SourceError> {
        let events: Vec<CalendarEvent> =
            serde_json::from_str(json).map_err(|e| SourceError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;
        for event in &events {
            event.validate()?;
        }
        tracing::debug!(count = events.len(), origin = %origin.display(), "loaded events");
        Ok(Self::new(events))
    }
}

impl From<Vec<CalendarEvent>> for MemoryCalendar {
    fn from(events: Vec<CalendarEvent>) -> Self {
        Self::new(events)
    }
}

impl EventSource for MemoryCalendar {
    fn query_events(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<CalendarEvent>, SourceError> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.overlaps(begin, end))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1980, 1, 1, hour, minute, 0).unwrap()
    }

    fn calendar() -> MemoryCalendar {
        MemoryCalendar::new(vec![
            CalendarEvent::new("Late", at(16, 15), at(18, 0)).unwrap(),
            CalendarEvent::new("Noon", at(12, 0), at(14, 0)).unwrap(),
            CalendarEvent::new("Borderline", at(20, 0), at(20, 0)).unwrap(),
        ])
    }

    #[test]
    fn query_preserves_source_order() {
        let found = calendar().query_events(at(0, 0), at(23, 0)).unwrap();
        let names: Vec<_> = found.iter().filter_map(|e| e.summary.as_deref()).collect();
        assert_eq!(names, vec!["Late", "Noon", "Borderline"]);
    }

    #[test]
    fn query_uses_half_open_rule() {
        let cal = calendar();
        // Ends exactly at begin: included.
        assert_eq!(cal.query_events(at(14, 0), at(15, 0)).unwrap().len(), 1);
        // Starts exactly at end: excluded.
        assert!(cal.query_events(at(15, 0), at(16, 15)).unwrap().is_empty());
        // Zero-length event at the window start is included.
        assert_eq!(cal.query_events(at(20, 0), at(21, 0)).unwrap().len(), 1);
    }

    #[test]
    fn parses_json_events() {
        let json = r#"[
            {"summary": "Noon", "start": "1980-01-01T12:00:00Z", "end": "1980-01-01T14:00:00Z"},
            {"description": "no summary", "start": "1980-01-01T15:00:00Z", "end": "1980-01-01T16:00:00Z"}
        ]"#;
        let cal = MemoryCalendar::from_json_str(json).unwrap();
        assert_eq!(cal.len(), 2);
        assert!(cal.events()[1].summary.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        let result = MemoryCalendar::from_json_str("{not json");
        assert!(matches!(result, Err(SourceError::Parse { .. })));
    }

    #[test]
    fn rejects_inverted_event() {
        let json = r#"[{"summary": "Backwards", "start": "1980-01-01T14:00:00Z", "end": "1980-01-01T12:00:00Z"}]"#;
        let result = MemoryCalendar::from_json_str(json);
        assert!(matches!(result, Err(SourceError::Invalid(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"summary": "Noon", "start": "1980-01-01T12:00:00Z", "end": "1980-01-01T14:00:00Z"}}]"#
        )
        .unwrap();
        let cal = MemoryCalendar::from_json_file(file.path()).unwrap();
        assert_eq!(cal.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MemoryCalendar::from_json_file("/nonexistent/heatwatch/events.json");
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
