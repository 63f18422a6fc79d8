use hourglass_rs::{SafeTimeProvider, TimeSource};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::bindings::LeasingBindings;
use crate::calculator::{CalculationInput, CalculationResult, LeasingCalculator};
use crate::config::CalculatorConfig;
use crate::errors::{LeasingError, Result};
use crate::events::{Event, EventStore};
use crate::decimal::Money;
use crate::parsing::{
    format_number, parse_condition, parse_decimal, parse_percent, parse_price, parse_term,
};
use crate::presentation::Presenter;
use crate::types::{ControlEvent, PriceSource, SessionId};

/// keeps the paired price controls in step and recomputes on every change
///
/// Each call to [`InputSynchronizer::handle`] runs synchronously to completion:
/// at most one recomputation per event, nothing buffered, nothing cached. Inputs
/// are read fresh from the bindings every time.
pub struct InputSynchronizer {
    session_id: SessionId,
    config: CalculatorConfig,
    calculator: LeasingCalculator,
    presenter: Presenter,
    bindings: LeasingBindings,
    time: SafeTimeProvider,
    events: EventStore,
}

impl InputSynchronizer {
    /// create synchronizer over constructed bindings
    pub fn new(bindings: LeasingBindings, config: CalculatorConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            session_id: Uuid::new_v4(),
            calculator: LeasingCalculator::new(config.rates),
            config,
            presenter: Presenter,
            bindings,
            time: SafeTimeProvider::new(TimeSource::System),
            events: EventStore::new(),
        })
    }

    /// use a specific time source for event timestamps
    pub fn with_time(mut self, time: SafeTimeProvider) -> Self {
        self.time = time;
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn bindings(&self) -> &LeasingBindings {
        &self.bindings
    }

    /// host access to the controls, e.g. to apply what the user typed
    pub fn bindings_mut(&mut self) -> &mut LeasingBindings {
        &mut self.bindings
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// write defaults into every input and compute once
    pub fn initialize(&mut self) -> Result<CalculationResult> {
        let defaults = self.config.defaults;
        let price = format_number(defaults.price.as_decimal());
        let percent = format_number(defaults.down_payment_percent);

        self.bindings.condition.set_value(defaults.condition.as_str());
        self.bindings.price_range.set_value(&price);
        self.bindings.price_field.set_value(&price);
        self.bindings.term.set_value(&defaults.term_periods.to_string());
        self.bindings.down_payment_range.set_value(&percent);
        self.bindings.down_payment_echo.set_value(&percent);

        info!(
            session = %self.session_id,
            price = %defaults.price,
            term = defaults.term_periods,
            down_payment_percent = %defaults.down_payment_percent,
            "leasing inputs initialized"
        );

        self.events.emit(Event::SessionInitialized {
            session_id: self.session_id,
            price: defaults.price,
            term_periods: defaults.term_periods,
            down_payment_percent: defaults.down_payment_percent,
            timestamp: self.time.now(),
        });

        self.recalculate(None)
    }

    /// react to one change event from the host
    pub fn handle(&mut self, event: ControlEvent) -> Result<CalculationResult> {
        debug!(session = %self.session_id, ?event, "control event");

        let synced = match event {
            ControlEvent::PriceRangeChanged => self.sync_price(PriceSource::Range),
            ControlEvent::PriceFieldChanged => self.sync_price(PriceSource::Field),
            ControlEvent::DownPaymentChanged => {
                self.echo_down_payment();
                Ok(())
            }
            ControlEvent::ConditionChanged | ControlEvent::TermChanged => Ok(()),
        };

        if let Err(error) = synced {
            return Err(self.reject(Some(event), error));
        }

        self.recalculate(Some(event))
    }

    /// recompute from the current control values without a change event
    pub fn refresh(&mut self) -> Result<CalculationResult> {
        self.recalculate(None)
    }

    /// copy the changed price control into its partner, clamped to the bounds
    fn sync_price(&mut self, source: PriceSource) -> Result<()> {
        let raw = match source {
            PriceSource::Range => self.bindings.price_range.value(),
            PriceSource::Field => self.bindings.price_field.value(),
        };

        // clamp first: a lower bound lifts "0" or "-5"
        let requested = Money::from_decimal(parse_decimal("price", &raw)?);
        let applied = self.config.price_bounds.clamp(requested);
        if !applied.is_positive() {
            return Err(LeasingError::invalid_argument(
                "price",
                format!("must be greater than zero, got {applied}"),
            ));
        }

        let clamped = applied != requested;
        if clamped {
            debug!(%requested, %applied, "price clamped into bounds");
        }

        let text = format_number(applied.as_decimal());
        self.bindings.price_field.set_value(&text);
        self.bindings.price_range.set_value(&text);

        self.events.emit(Event::PriceSynchronized {
            session_id: self.session_id,
            source,
            requested,
            applied,
            clamped,
            timestamp: self.time.now(),
        });

        Ok(())
    }

    /// one-way: slider to display
    fn echo_down_payment(&mut self) {
        let percent = self.bindings.down_payment_range.value();
        self.bindings.down_payment_echo.set_value(&percent);

        self.events.emit(Event::DownPaymentEchoed {
            session_id: self.session_id,
            percent,
            timestamp: self.time.now(),
        });
    }

    fn read_input(&self) -> Result<CalculationInput> {
        let condition = parse_condition(&self.bindings.condition.value())?;
        let price = parse_price(&self.bindings.price_field.value())?;
        let term = parse_term(&self.bindings.term.value())?;
        let percent = parse_percent(&self.bindings.down_payment_range.value())?;

        CalculationInput::new(price, condition, term, percent)
    }

    fn recalculate(&mut self, trigger: Option<ControlEvent>) -> Result<CalculationResult> {
        let outcome = self
            .read_input()
            .and_then(|input| self.calculator.compute(&input));

        match outcome {
            Ok(result) => {
                self.presenter.render(&result, &mut self.bindings.outputs);
                self.events.emit(Event::CalculationCompleted {
                    session_id: self.session_id,
                    trigger,
                    result: result.clone(),
                    timestamp: self.time.now(),
                });
                Ok(result)
            }
            Err(error) => Err(self.reject(trigger, error)),
        }
    }

    fn reject(&mut self, trigger: Option<ControlEvent>, error: LeasingError) -> LeasingError {
        warn!(session = %self.session_id, ?trigger, %error, "calculation rejected");

        self.presenter.render_error(&error, &mut self.bindings.outputs);
        self.events.emit(Event::CalculationRejected {
            session_id: self.session_id,
            trigger,
            reason: error.to_string(),
            timestamp: self.time.now(),
        });

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriceBounds;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn synchronizer(config: CalculatorConfig) -> InputSynchronizer {
        let mut sync = InputSynchronizer::new(LeasingBindings::in_memory(), config).unwrap();
        sync.initialize().unwrap();
        sync
    }

    fn price_pair(sync: &InputSynchronizer) -> (String, String) {
        (
            sync.bindings().price_range.value(),
            sync.bindings().price_field.value(),
        )
    }

    #[test]
    fn test_initialize_fills_defaults_and_outputs() {
        let sync = synchronizer(CalculatorConfig::default());
        let bindings = sync.bindings();

        assert_eq!(bindings.condition.value(), "new");
        assert_eq!(price_pair(&sync), ("10000".to_string(), "10000".to_string()));
        assert_eq!(bindings.term.value(), "12");
        assert_eq!(bindings.down_payment_range.value(), "10");
        assert_eq!(bindings.down_payment_echo.value(), "10");

        assert_eq!(bindings.outputs.leasing_cost.text(), "10146.43");
        assert_eq!(bindings.outputs.down_payment_amount.text(), "1000.00");
        assert_eq!(bindings.outputs.down_payment_percent.text(), "10.00");
        assert_eq!(bindings.outputs.periodic_installment.text(), "762.20");
        assert_eq!(bindings.outputs.interest_rate.text(), "2.99");
    }

    #[test]
    fn test_range_change_copies_to_field() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.bindings_mut().price_range.set_value("50000");

        let result = sync.handle(ControlEvent::PriceRangeChanged).unwrap();

        assert_eq!(price_pair(&sync), ("50000".to_string(), "50000".to_string()));
        assert_eq!(result.down_payment, Money::from_major(5_000));
    }

    #[test]
    fn test_field_change_copies_to_range() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.bindings_mut().price_field.set_value("25000");

        sync.handle(ControlEvent::PriceFieldChanged).unwrap();

        assert_eq!(price_pair(&sync), ("25000".to_string(), "25000".to_string()));
    }

    #[test]
    fn test_field_change_is_clamped_to_bounds() {
        let mut sync = synchronizer(CalculatorConfig::default());

        sync.bindings_mut().price_field.set_value("500000");
        let result = sync.handle(ControlEvent::PriceFieldChanged).unwrap();
        assert_eq!(price_pair(&sync), ("200000".to_string(), "200000".to_string()));
        assert_eq!(result.down_payment, Money::from_major(20_000));

        sync.bindings_mut().price_field.set_value("99");
        sync.handle(ControlEvent::PriceFieldChanged).unwrap();
        assert_eq!(price_pair(&sync), ("10000".to_string(), "10000".to_string()));

        let clamped: Vec<bool> = sync
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::PriceSynchronized { clamped, .. } => Some(*clamped),
                _ => None,
            })
            .collect();
        assert_eq!(clamped, vec![true, true]);
    }

    #[test]
    fn test_non_positive_price_is_lifted_to_lower_bound() {
        let mut sync = synchronizer(CalculatorConfig::default());

        for text in ["0", "-5"] {
            sync.bindings_mut().price_field.set_value(text);
            let result = sync.handle(ControlEvent::PriceFieldChanged).unwrap();
            assert_eq!(price_pair(&sync), ("10000".to_string(), "10000".to_string()));
            assert_eq!(result.down_payment, Money::from_major(1_000));
        }
    }

    #[test]
    fn test_unbounded_config_rejects_non_positive_price() {
        let mut sync = synchronizer(CalculatorConfig::unbounded());

        for text in ["0", "-5"] {
            sync.bindings_mut().price_field.set_value(text);
            let err = sync.handle(ControlEvent::PriceFieldChanged).unwrap_err();
            assert!(matches!(err, LeasingError::InvalidArgument { field: "price", .. }));
            assert_eq!(sync.bindings().price_range.value(), "10000");
        }
    }

    #[test]
    fn test_unbounded_config_does_not_clamp() {
        let mut sync = synchronizer(CalculatorConfig::unbounded());
        sync.bindings_mut().price_field.set_value("500000");

        sync.handle(ControlEvent::PriceFieldChanged).unwrap();

        assert_eq!(price_pair(&sync), ("500000".to_string(), "500000".to_string()));
    }

    #[test]
    fn test_down_payment_echo_is_one_way() {
        let mut sync = synchronizer(CalculatorConfig::default());

        sync.bindings_mut().down_payment_range.set_value("25");
        let result = sync.handle(ControlEvent::DownPaymentChanged).unwrap();
        assert_eq!(sync.bindings().down_payment_echo.value(), "25");
        assert_eq!(result.down_payment, Money::from_major(2_500));
        assert_eq!(sync.bindings().outputs.down_payment_percent.text(), "25.00");

        // editing the echo does not feed back into the slider or the result
        sync.bindings_mut().down_payment_echo.set_value("90");
        let result = sync.refresh().unwrap();
        assert_eq!(sync.bindings().down_payment_range.value(), "25");
        assert_eq!(result.down_payment, Money::from_major(2_500));
    }

    #[test]
    fn test_condition_and_term_changes_recompute() {
        let mut sync = synchronizer(CalculatorConfig::default());

        sync.bindings_mut().condition.set_value("used");
        let result = sync.handle(ControlEvent::ConditionChanged).unwrap();
        assert_eq!(result.annual_rate_percent, dec!(3.70));
        assert_eq!(sync.bindings().outputs.interest_rate.text(), "3.70");

        sync.bindings_mut().term.set_value("36");
        let result = sync.handle(ControlEvent::TermChanged).unwrap();
        assert_eq!(result.term_periods, 36);
    }

    #[test]
    fn test_malformed_price_reports_error_and_keeps_outputs() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.bindings_mut().price_field.set_value("12abc");

        let err = sync.handle(ControlEvent::PriceFieldChanged).unwrap_err();

        assert!(err.is_user_input());
        assert_eq!(sync.bindings().price_range.value(), "10000");
        assert_eq!(sync.bindings().outputs.leasing_cost.text(), "10146.43");
        let status = sync.bindings().outputs.status_text().unwrap();
        assert!(status.contains("price"), "status was {status:?}");

        // a valid value afterwards clears the status
        sync.bindings_mut().price_field.set_value("10000");
        sync.handle(ControlEvent::PriceFieldChanged).unwrap();
        assert_eq!(sync.bindings().outputs.status_text(), Some(String::new()));
    }

    #[test]
    fn test_invalid_term_is_rejected() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.bindings_mut().term.set_value("0");

        let err = sync.handle(ControlEvent::TermChanged).unwrap_err();

        assert!(matches!(err, LeasingError::InvalidArgument { field: "term", .. }));
        assert!(matches!(sync.events().last(), Some(Event::CalculationRejected { .. })));
    }

    #[test]
    fn test_unknown_condition_is_rejected() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.bindings_mut().condition.set_value("vintage");

        assert!(sync.handle(ControlEvent::ConditionChanged).is_err());
    }

    #[test]
    fn test_one_calculation_per_event_in_order() {
        let mut sync = synchronizer(CalculatorConfig::default());
        sync.take_events();

        let sequence = [
            ControlEvent::PriceRangeChanged,
            ControlEvent::TermChanged,
            ControlEvent::DownPaymentChanged,
            ControlEvent::ConditionChanged,
        ];
        for event in sequence {
            sync.handle(event).unwrap();
        }

        let triggers: Vec<ControlEvent> = sync
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::CalculationCompleted { trigger, .. } => *trigger,
                _ => None,
            })
            .collect();
        assert_eq!(triggers, sequence.to_vec());
    }

    #[test]
    fn test_events_use_configured_time() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut sync = InputSynchronizer::new(LeasingBindings::in_memory(), CalculatorConfig::default())
            .unwrap()
            .with_time(SafeTimeProvider::new(TimeSource::Test(start)));

        sync.initialize().unwrap();

        assert_eq!(sync.events().len(), 2);
        for event in sync.events() {
            assert_eq!(event.timestamp(), start);
        }
        match &sync.events()[0] {
            Event::SessionInitialized { session_id, .. } => assert_eq!(*session_id, sync.session_id()),
            other => panic!("unexpected first event {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig::default().with_price_bounds(PriceBounds {
            min: Some(Money::from_major(300_000)),
            max: Some(Money::from_major(100_000)),
        });

        assert!(InputSynchronizer::new(LeasingBindings::in_memory(), config).is_err());
    }

    #[test]
    fn test_synchronized_pair_always_agrees() {
        let mut sync = synchronizer(CalculatorConfig::default());
        let inputs = [
            (ControlEvent::PriceFieldChanged, "15000"),
            (ControlEvent::PriceRangeChanged, "180000"),
            (ControlEvent::PriceFieldChanged, "1,000,000"),
            (ControlEvent::PriceRangeChanged, "10000"),
            (ControlEvent::PriceFieldChanged, "42000.50"),
        ];

        for (event, value) in inputs {
            match event {
                ControlEvent::PriceRangeChanged => sync.bindings_mut().price_range.set_value(value),
                _ => sync.bindings_mut().price_field.set_value(value),
            }
            sync.handle(event).unwrap();

            let (range, field) = price_pair(&sync);
            assert_eq!(range, field);
            let price = parse_price(&field).unwrap();
            assert!(sync.config().price_bounds.contains(price));
        }
    }
}
