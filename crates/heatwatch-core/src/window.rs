//! Search window derivation.
//!
//! The window is recomputed from `(now, HeatConfig)` on every evaluation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HeatConfig;
use crate::error::ValidationError;

/// Offset added to both margin instants so that an event boundary lying
/// exactly on `now + N minutes` counts as already passed.
///
/// Must stay below the resolution of caller timestamps.
pub fn boundary_epsilon() -> Duration {
    Duration::microseconds(1)
}

/// Half-open range to query from the event source, plus the optional
/// instant at or before which an event's end disqualifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchWindow {
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub cooloff_cutoff: Option<DateTime<Utc>>,
}

impl SearchWindow {
    /// Window used for evaluation.
    ///
    /// With `cooloff < preheat` the query itself starts at the cooloff
    /// instant, so no returned event can need the per-event cooloff check
    /// and `cooloff_cutoff` is `None`. Otherwise this equals
    /// [`SearchWindow::exhaustive`].
    ///
    /// # Errors
    /// [`ValidationError::InstantOutOfRange`] when a margin instant does not
    /// fit in `DateTime<Utc>`.
    pub fn for_instant(now: DateTime<Utc>, config: &HeatConfig) -> Result<Self, ValidationError> {
        let (cooloff_ts, preheat_ts) = margin_instants(now, config)?;

        Ok(if config.uses_narrowed_window() {
            Self {
                begin: cooloff_ts,
                end: preheat_ts,
                cooloff_cutoff: None,
            }
        } else {
            Self {
                begin: now,
                end: preheat_ts,
                cooloff_cutoff: Some(cooloff_ts),
            }
        })
    }

    /// Window that always starts at `now` and always carries the cooloff
    /// cutoff, whatever the margin ordering.
    ///
    /// # Errors
    /// Same as [`SearchWindow::for_instant`].
    pub fn exhaustive(now: DateTime<Utc>, config: &HeatConfig) -> Result<Self, ValidationError> {
        let (cooloff_ts, preheat_ts) = margin_instants(now, config)?;
        Ok(Self {
            begin: now,
            end: preheat_ts,
            cooloff_cutoff: Some(cooloff_ts),
        })
    }

    /// Whether an event ending at `end` has already passed its cooloff.
    ///
    /// Without a cutoff, `begin` is the cooloff instant: the source still
    /// returns events ending exactly there, and they count as passed.
    pub fn cooloff_elapsed(&self, end: DateTime<Utc>) -> bool {
        end <= self.cooloff_cutoff.unwrap_or(self.begin)
    }
}

fn margin_instants(
    now: DateTime<Utc>,
    config: &HeatConfig,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let offset = |minutes: u32| {
        now.checked_add_signed(Duration::minutes(i64::from(minutes)))
            .and_then(|ts| ts.checked_add_signed(boundary_epsilon()))
            .ok_or(ValidationError::InstantOutOfRange { now, minutes })
    };
    Ok((offset(config.cooloff_minutes)?, offset(config.preheat_minutes)?))
}
