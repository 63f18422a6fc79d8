use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{periodic_installment, validate_term};
use crate::decimal::{Money, Rate};
use crate::errors::{LeasingError, Result};

/// one month in the amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

/// amortization schedule for the financed part of a lease
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub installment: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate equal-installment schedule
    pub fn generate(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        if principal.is_negative() {
            return Err(LeasingError::invalid_argument(
                "amount financed",
                format!("must not be negative, got {principal}"),
            ));
        }

        validate_term(term_months)?;

        let monthly_rate = annual_rate.monthly_rate().as_decimal();
        let installment = periodic_installment(principal, annual_rate.monthly_rate(), term_months)?;

        let mut payments = Vec::with_capacity(term_months as usize);
        let mut balance = principal;
        let mut cumulative_interest = Money::ZERO;

        for i in 1..=term_months {
            let interest_portion = balance * monthly_rate;
            let mut principal_portion = installment - interest_portion;
            let mut payment_amount = installment;

            // last payment absorbs what rounding left over
            if i == term_months {
                principal_portion = balance;
                payment_amount = balance + interest_portion;
            }

            cumulative_interest += interest_portion;
            let ending_balance = (balance - principal_portion).max(Money::ZERO);

            payments.push(ScheduledPayment {
                payment_number: i,
                beginning_balance: balance,
                payment_amount,
                principal_portion,
                interest_portion,
                ending_balance,
                cumulative_interest,
            });

            balance = ending_balance;
        }

        let total_payment = payments
            .iter()
            .map(|p| p.payment_amount)
            .fold(Money::ZERO, |acc, x| acc + x);

        Ok(Self {
            principal,
            annual_rate,
            term_months,
            installment,
            payments,
            total_interest: cumulative_interest,
            total_payment,
        })
    }

    /// get payment for specific month, numbered from 1
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        payment_number
            .checked_sub(1)
            .and_then(|index| self.payments.get(index as usize))
    }

    /// remaining balance after the given payment
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        self.get_payment(payment_number)
            .map(|p| p.ending_balance)
            .unwrap_or(self.principal)
    }

    /// share of the total payment that is interest
    pub fn interest_share(&self) -> Decimal {
        if self.total_payment.is_zero() {
            return Decimal::ZERO;
        }
        self.total_interest.as_decimal() / self.total_payment.as_decimal()
    }
}
