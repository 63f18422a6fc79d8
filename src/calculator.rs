use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{LeasingError, Result};
use crate::rates::RateTable;
use crate::schedule::AmortizationSchedule;
use crate::types::Condition;

/// longest accepted term, 50 years of monthly payments
pub const MAX_TERM_MONTHS: u32 = 600;

/// term must be in `1..=MAX_TERM_MONTHS`
pub fn validate_term(term_periods: u32) -> Result<()> {
    if term_periods == 0 {
        return Err(LeasingError::invalid_argument(
            "term",
            "must be at least 1 month",
        ));
    }
    if term_periods > MAX_TERM_MONTHS {
        return Err(LeasingError::invalid_argument(
            "term",
            format!("must be at most {MAX_TERM_MONTHS} months, got {term_periods}"),
        ));
    }
    Ok(())
}

/// inputs for one leasing calculation
///
/// `term_periods` is always a number of months; the periodic rate is the annual
/// rate divided by 12.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub price: Money,
    pub condition: Condition,
    pub term_periods: u32,
    pub down_payment_percent: Decimal,
}

impl CalculationInput {
    /// create validated input
    pub fn new(
        price: Money,
        condition: Condition,
        term_periods: u32,
        down_payment_percent: Decimal,
    ) -> Result<Self> {
        let input = Self {
            price,
            condition,
            term_periods,
            down_payment_percent,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn builder() -> CalculationInputBuilder {
        CalculationInputBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.price.is_positive() {
            return Err(LeasingError::invalid_argument(
                "price",
                format!("must be greater than zero, got {}", self.price),
            ));
        }

        validate_term(self.term_periods)?;

        if self.down_payment_percent < Decimal::ZERO
            || self.down_payment_percent > Decimal::ONE_HUNDRED
        {
            return Err(LeasingError::invalid_argument(
                "down payment percent",
                format!("must be between 0 and 100, got {}", self.down_payment_percent),
            ));
        }

        Ok(())
    }
}

/// builder for calculation input
#[derive(Debug, Default)]
pub struct CalculationInputBuilder {
    price: Option<Money>,
    condition: Option<Condition>,
    term_periods: Option<u32>,
    down_payment_percent: Option<Decimal>,
}

impl CalculationInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn term_periods(mut self, months: u32) -> Self {
        self.term_periods = Some(months);
        self
    }

    pub fn down_payment_percent(mut self, percent: Decimal) -> Self {
        self.down_payment_percent = Some(percent);
        self
    }

    /// condition defaults to new, down payment to zero
    pub fn build(self) -> Result<CalculationInput> {
        let price = self
            .price
            .ok_or_else(|| LeasingError::invalid_argument("price", "required"))?;

        let term_periods = self
            .term_periods
            .ok_or_else(|| LeasingError::invalid_argument("term", "required"))?;

        CalculationInput::new(
            price,
            self.condition.unwrap_or_default(),
            term_periods,
            self.down_payment_percent.unwrap_or(Decimal::ZERO),
        )
    }
}

/// outcome of one leasing calculation, at full precision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub down_payment: Money,
    pub down_payment_percent: Decimal,
    pub amount_financed: Money,
    pub periodic_installment: Money,
    pub total_cost: Money,
    pub total_interest: Money,
    pub annual_rate_percent: Decimal,
    pub periodic_rate: Rate,
    pub term_periods: u32,
}

impl CalculationResult {
    /// per-month breakdown of the financed amount
    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(
            self.amount_financed,
            Rate::from_percentage(self.annual_rate_percent),
            self.term_periods,
        )
    }
}

/// leasing calculator bound to a rate table
#[derive(Debug, Clone, Default)]
pub struct LeasingCalculator {
    rates: RateTable,
}

impl LeasingCalculator {
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// compute down payment, installment and total cost
    pub fn compute(&self, input: &CalculationInput) -> Result<CalculationResult> {
        input.validate()?;

        let annual_rate = self.rates.rate_for(input.condition);
        let periodic_rate = annual_rate.monthly_rate();
        let periods = Decimal::from(input.term_periods);

        let down_payment = input
            .price
            .percentage(input.down_payment_percent)
            .ok_or_else(|| overflow("down payment"))?;
        let amount_financed = input
            .price
            .checked_sub(down_payment)
            .ok_or_else(|| overflow("amount financed"))?;

        let periodic_installment =
            periodic_installment(amount_financed, periodic_rate, input.term_periods)?;

        let total_cost = periodic_installment
            .checked_mul(periods)
            .and_then(|paid| down_payment.checked_add(paid))
            .ok_or_else(|| overflow("total cost"))?;
        let total_interest = total_cost
            .checked_sub(input.price)
            .ok_or_else(|| overflow("total interest"))?;

        debug!(
            price = %input.price,
            condition = %input.condition,
            term = input.term_periods,
            down_payment_percent = %input.down_payment_percent,
            installment = %periodic_installment,
            total_cost = %total_cost,
            "leasing cost computed"
        );

        Ok(CalculationResult {
            down_payment,
            down_payment_percent: input.down_payment_percent,
            amount_financed,
            periodic_installment,
            total_cost,
            total_interest,
            annual_rate_percent: annual_rate.as_percentage(),
            periodic_rate,
            term_periods: input.term_periods,
        })
    }
}

/// compute with an explicit rate table
pub fn compute(input: &CalculationInput, rates: &RateTable) -> Result<CalculationResult> {
    LeasingCalculator::new(*rates).compute(input)
}

/// equal periodic installment that amortizes `principal` over `periods`
///
/// installment = P * r / (1 - (1 + r)^-n). The discount factor (1 + r)^-n stays
/// in (0, 1], so the power cannot overflow. A zero rate splits the principal evenly.
pub fn periodic_installment(principal: Money, periodic_rate: Rate, periods: u32) -> Result<Money> {
    validate_term(periods)?;

    let n = Decimal::from(periods);
    let r = periodic_rate.as_decimal();

    if r.is_zero() {
        return principal.checked_div(n).ok_or_else(|| overflow("installment"));
    }

    let denominator = Decimal::ONE - discount_factor(r, periods)?;

    // rate too small to register at 28 digits
    if denominator.is_zero() {
        return principal.checked_div(n).ok_or_else(|| overflow("installment"));
    }

    principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_div(denominator))
        .map(Money::from_decimal)
        .ok_or_else(|| overflow("installment"))
}

/// (1 + r)^-n
fn discount_factor(r: Decimal, periods: u32) -> Result<Decimal> {
    let base = Decimal::ONE
        .checked_add(r)
        .and_then(|growth| Decimal::ONE.checked_div(growth))
        .ok_or_else(|| overflow("discount factor"))?;
    let mut discount = Decimal::ONE;
    for _ in 0..periods {
        discount = discount
            .checked_mul(base)
            .ok_or_else(|| overflow("discount factor"))?;
    }
    Ok(discount)
}

fn overflow(what: &str) -> LeasingError {
    LeasingError::CalculationError {
        message: format!("{what} overflowed"),
    }
}
