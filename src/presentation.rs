use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::bindings::OutputBindings;
use crate::calculator::CalculationResult;
use crate::errors::{LeasingError, Result};

/// display strings for one result, two decimal places each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultView {
    pub leasing_cost: String,
    pub down_payment_amount: String,
    pub down_payment_percent: String,
    pub periodic_installment: String,
    pub interest_rate: String,
}

impl ResultView {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            leasing_cost: fixed2(result.total_cost.as_decimal()),
            down_payment_amount: fixed2(result.down_payment.as_decimal()),
            down_payment_percent: fixed2(result.down_payment_percent),
            periodic_installment: fixed2(result.periodic_installment.as_decimal()),
            interest_rate: fixed2(result.annual_rate_percent),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(LeasingError::from)
    }
}

/// format with exactly two decimal places, halves rounded away from zero
pub fn fixed2(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}

/// writes calculation results and errors into the output bindings
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter;

impl Presenter {
    pub fn render(&self, result: &CalculationResult, outputs: &mut OutputBindings) -> ResultView {
        let view = ResultView::from_result(result);

        outputs.leasing_cost.set_text(&view.leasing_cost);
        outputs.down_payment_amount.set_text(&view.down_payment_amount);
        outputs.down_payment_percent.set_text(&view.down_payment_percent);
        outputs.periodic_installment.set_text(&view.periodic_installment);
        outputs.interest_rate.set_text(&view.interest_rate);
        if let Some(status) = outputs.status.as_mut() {
            status.set_text("");
        }

        view
    }

    /// show the error on the status line; result fields keep their last good values
    pub fn render_error(&self, error: &LeasingError, outputs: &mut OutputBindings) {
        if let Some(status) = outputs.status.as_mut() {
            status.set_text(&error.to_string());
        }
    }
}
