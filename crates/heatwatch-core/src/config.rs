//! Heating margins and opt-out tag.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Margins applied around every event.
///
/// `preheat_minutes` and `cooloff_minutes` are independent; any ordering
/// of the two is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatConfig {
    /// Minutes before an event starts during which heat is already needed.
    #[serde(default)]
    pub preheat_minutes: u32,
    /// Minutes before an event ends at which heat is no longer needed.
    #[serde(default)]
    pub cooloff_minutes: u32,
    /// Events whose description contains this text never request heat.
    #[serde(default)]
    pub no_heat_tag: Option<String>,
}

impl HeatConfig {
    pub fn new(preheat_minutes: u32, cooloff_minutes: u32) -> Self {
        Self {
            preheat_minutes,
            cooloff_minutes,
            no_heat_tag: None,
        }
    }

    pub fn with_no_heat_tag(mut self, tag: impl Into<String>) -> Self {
        self.no_heat_tag = Some(tag.into());
        self
    }

    /// True when the narrowed search window applies (cooloff < preheat).
    pub fn uses_narrowed_window(&self) -> bool {
        self.cooloff_minutes < self.preheat_minutes
    }
}

impl fmt::Display for HeatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.no_heat_tag {
            Some(tag) => write!(
                f,
                "{}, {}, \"{}\"",
                self.preheat_minutes, self.cooloff_minutes, tag
            ),
            None => write!(f, "{}, {}", self.preheat_minutes, self.cooloff_minutes),
        }
    }
}
