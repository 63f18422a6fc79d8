/// quick start - compute a lease and print its schedule
use leasing_calculator_rs::{CalculationInput, Condition, LeasingCalculator, Money, ResultView};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    leasing_calculator_rs::logging::init_logging(false);

    // a used car at 50,000 with 20% down over three years
    let input = CalculationInput::builder()
        .price(Money::from_major(50_000))
        .condition(Condition::Used)
        .term_periods(36)
        .down_payment_percent(dec!(20))
        .build()?;

    let result = LeasingCalculator::default().compute(&input)?;
    println!("{}", ResultView::from_result(&result).to_json_pretty()?);

    let schedule = result.schedule()?;
    for payment in schedule.payments.iter().take(3) {
        println!(
            "month {:>2}: pay {} (interest {}, principal {}), balance {}",
            payment.payment_number,
            payment.payment_amount.to_cents(),
            payment.interest_portion.to_cents(),
            payment.principal_portion.to_cents(),
            payment.ending_balance.to_cents(),
        );
    }
    println!("total interest: {}", schedule.total_interest.to_cents());

    Ok(())
}
