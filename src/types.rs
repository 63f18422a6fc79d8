use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::LeasingError;

/// unique identifier for a synchronizer session
pub type SessionId = Uuid;

/// vehicle condition, selects the applicable annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    New,
    Used,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::New, Condition::Used];

    /// value as it appears in the condition selector
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = LeasingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            other => Err(LeasingError::invalid_argument(
                "condition",
                format!("unknown condition '{other}', expected 'new' or 'used'"),
            )),
        }
    }
}

/// which of the two price controls produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceSource {
    /// the slider
    Range,
    /// the numeric entry field
    Field,
}

/// discrete change events delivered by the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlEvent {
    ConditionChanged,
    PriceRangeChanged,
    PriceFieldChanged,
    TermChanged,
    DownPaymentChanged,
}

impl ControlEvent {
    pub fn price_source(&self) -> Option<PriceSource> {
        match self {
            ControlEvent::PriceRangeChanged => Some(PriceSource::Range),
            ControlEvent::PriceFieldChanged => Some(PriceSource::Field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_parsing() {
        assert_eq!("new".parse::<Condition>().unwrap(), Condition::New);
        assert_eq!(" Used ".parse::<Condition>().unwrap(), Condition::Used);
        assert!("leased".parse::<Condition>().is_err());
        assert!("".parse::<Condition>().is_err());
    }

    #[test]
    fn test_condition_round_trips_through_selector_text() {
        for condition in Condition::ALL {
            assert_eq!(condition.as_str().parse::<Condition>().unwrap(), condition);
        }
    }

    #[test]
    fn test_condition_serde_uses_lowercase() {
        let json = serde_json::to_string(&Condition::Used).unwrap();
        assert_eq!(json, "\"used\"");
    }

    #[test]
    fn test_price_source_of_event() {
        assert_eq!(ControlEvent::PriceRangeChanged.price_source(), Some(PriceSource::Range));
        assert_eq!(ControlEvent::PriceFieldChanged.price_source(), Some(PriceSource::Field));
        assert_eq!(ControlEvent::TermChanged.price_source(), None);
    }
}
