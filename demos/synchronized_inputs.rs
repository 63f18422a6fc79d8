/// drive the synchronizer the way a UI host would
use leasing_calculator_rs::{
    CalculatorConfig, ControlEvent, InputSynchronizer, LeasingBindings, OutputBindings,
};

fn print_outputs(outputs: &OutputBindings) {
    println!(
        "cost {} | down {} ({}%) | monthly {} | rate {}%",
        outputs.leasing_cost.text(),
        outputs.down_payment_amount.text(),
        outputs.down_payment_percent.text(),
        outputs.periodic_installment.text(),
        outputs.interest_rate.text(),
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    leasing_calculator_rs::logging::init_logging(true);

    let mut sync = InputSynchronizer::new(LeasingBindings::in_memory(), CalculatorConfig::default())?;
    sync.initialize()?;
    print_outputs(&sync.bindings().outputs);

    // user drags the price slider
    sync.bindings_mut().price_range.set_value("35000");
    sync.handle(ControlEvent::PriceRangeChanged)?;
    println!("price field now {}", sync.bindings().price_field.value());
    print_outputs(&sync.bindings().outputs);

    // user types a price above the slider's maximum
    sync.bindings_mut().price_field.set_value("450000");
    sync.handle(ControlEvent::PriceFieldChanged)?;
    println!("price clamped to {}", sync.bindings().price_range.value());

    // user types garbage; the status line explains, outputs stay readable
    sync.bindings_mut().price_field.set_value("lots");
    if let Err(e) = sync.handle(ControlEvent::PriceFieldChanged) {
        println!("rejected: {e}");
    }
    print_outputs(&sync.bindings().outputs);

    println!("{} events recorded", sync.events().len());
    Ok(())
}
