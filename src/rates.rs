use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LeasingError, Result};
use crate::types::Condition;

/// annual interest rate per vehicle condition
///
/// Every [`Condition`] has an entry, so a lookup cannot fail once the table exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RateTableEntries", into = "RateTableEntries")]
pub struct RateTable {
    new: Rate,
    used: Rate,
}

impl RateTable {
    pub fn new(new: Rate, used: Rate) -> Result<Self> {
        for (condition, rate) in [(Condition::New, new), (Condition::Used, used)] {
            if rate.is_negative() {
                return Err(LeasingError::InvalidConfiguration {
                    message: format!("annual rate for {condition} vehicles is negative: {rate}"),
                });
            }
        }
        Ok(Self { new, used })
    }

    /// annual rate for the given condition
    pub fn rate_for(&self, condition: Condition) -> Rate {
        match condition {
            Condition::New => self.new,
            Condition::Used => self.used,
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            new: Rate::from_percentage(dec!(2.99)),
            used: Rate::from_percentage(dec!(3.70)),
        }
    }
}

/// wire form of the table, rates written as percentages
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RateTableEntries {
    new_percent: rust_decimal::Decimal,
    used_percent: rust_decimal::Decimal,
}

impl TryFrom<RateTableEntries> for RateTable {
    type Error = LeasingError;

    fn try_from(entries: RateTableEntries) -> Result<Self> {
        RateTable::new(
            Rate::from_percentage(entries.new_percent),
            Rate::from_percentage(entries.used_percent),
        )
    }
}

impl From<RateTable> for RateTableEntries {
    fn from(table: RateTable) -> Self {
        Self {
            new_percent: table.new.as_percentage(),
            used_percent: table.used.as_percentage(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_default_rates() {
        let table = RateTable::default();
        assert_eq!(table.rate_for(Condition::New).as_percentage(), dec!(2.99));
        assert_eq!(table.rate_for(Condition::Used).as_percentage(), dec!(3.70));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = RateTable::new(Rate::from_percentage(dec!(-1)), Rate::ZERO);
        assert!(matches!(result, Err(LeasingError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_zero_rate_allowed() {
        let table = RateTable::new(Rate::ZERO, Rate::ZERO).unwrap();
        assert!(table.rate_for(Condition::Used).is_zero());
    }

    #[test]
    fn test_serde_uses_percentages() {
        let json = r#"{"new_percent":"1.5","used_percent":"4"}"#;
        let table: RateTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.rate_for(Condition::New).as_decimal(), dec!(0.015));
        assert_eq!(table.rate_for(Condition::Used).as_percentage(), Decimal::from(4));

        let bad = r#"{"new_percent":"-2","used_percent":"4"}"#;
        assert!(serde_json::from_str::<RateTable>(bad).is_err());
    }
}
