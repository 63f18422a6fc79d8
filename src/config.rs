use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculator::CalculationInput;
use crate::decimal::Money;
use crate::errors::{LeasingError, Result};
use crate::rates::RateTable;
use crate::types::Condition;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    pub rates: RateTable,
    pub defaults: InputDefaults,
    pub price_bounds: PriceBounds,
}

/// values written into the inputs on startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    pub price: Money,
    pub condition: Condition,
    pub term_periods: u32,
    pub down_payment_percent: Decimal,
}

/// clamp range for the numeric price field; either end may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: Option<Money>,
    pub max: Option<Money>,
}

impl PriceBounds {
    pub fn new(min: Option<Money>, max: Option<Money>) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    pub fn is_bounded(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// clamp a price into the bounds
    pub fn clamp(&self, price: Money) -> Money {
        let mut clamped = price;
        if let Some(min) = self.min {
            clamped = clamped.max(min);
        }
        if let Some(max) = self.max {
            clamped = clamped.min(max);
        }
        clamped
    }

    pub fn contains(&self, price: Money) -> bool {
        self.clamp(price) == price
    }

    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(LeasingError::InvalidConfiguration {
                    message: format!("price bounds inverted: min {min} > max {max}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self {
            min: Some(Money::from_major(10_000)),
            max: Some(Money::from_major(200_000)),
        }
    }
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            price: Money::from_major(10_000),
            condition: Condition::New,
            term_periods: 12,
            down_payment_percent: dec!(10),
        }
    }
}

impl InputDefaults {
    pub fn to_input(&self) -> Result<CalculationInput> {
        CalculationInput::new(
            self.price,
            self.condition,
            self.term_periods,
            self.down_payment_percent,
        )
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            rates: RateTable::default(),
            defaults: InputDefaults::default(),
            price_bounds: PriceBounds::default(),
        }
    }
}

impl CalculatorConfig {
    /// configuration without price clamping
    pub fn unbounded() -> Self {
        Self {
            price_bounds: PriceBounds::unbounded(),
            ..Self::default()
        }
    }

    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_price_bounds(mut self, bounds: PriceBounds) -> Self {
        self.price_bounds = bounds;
        self
    }

    pub fn with_defaults(mut self, defaults: InputDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.price_bounds.validate()?;

        self.defaults.to_input().map_err(|e| LeasingError::InvalidConfiguration {
            message: format!("default inputs are not usable: {e}"),
        })?;

        if !self.price_bounds.contains(self.defaults.price) {
            return Err(LeasingError::InvalidConfiguration {
                message: format!(
                    "default price {} lies outside the price bounds",
                    self.defaults.price
                ),
            });
        }

        Ok(())
    }

    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
