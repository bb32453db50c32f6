//! Time-of-day enum shared by feature estimation and scoring.
//!
//! Only two parts of the day matter to the recommender: at night lighting is
//! weighted more heavily and the default lighting estimate is higher (routes
//! are assumed to run along lit streets until lamp data says otherwise).

use std::str::FromStr;

/// When the user intends to run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    #[inline]
    pub fn is_night(self) -> bool {
        matches!(self, TimeOfDay::Night)
    }

    /// Map a free-form time label from query parsing.  Only `"night"`
    /// (case-insensitive) selects night mode; anything else, including a
    /// missing label, is daytime.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("night") => TimeOfDay::Night,
            _ => TimeOfDay::Day,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Day   => "day",
            TimeOfDay::Night => "night",
        }
    }
}

impl From<bool> for TimeOfDay {
    /// `true` means night.
    fn from(is_night: bool) -> Self {
        if is_night { TimeOfDay::Night } else { TimeOfDay::Day }
    }
}

impl FromStr for TimeOfDay {
    type Err = crate::LwError;

    /// Strict parse: accepts exactly `"day"` or `"night"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day"   => Ok(TimeOfDay::Day),
            "night" => Ok(TimeOfDay::Night),
            other   => Err(crate::LwError::Parse(format!(
                "invalid time of day {other:?}: expected \"day\" or \"night\""
            ))),
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
