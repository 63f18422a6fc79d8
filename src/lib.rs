pub mod bindings;
pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod logging;
pub mod parsing;
pub mod presentation;
pub mod rates;
pub mod schedule;
pub mod synchronizer;
pub mod types;

// re-export key types
pub use bindings::{
    DisplayField, InputControl, LeasingBindings, MemoryControl, MemoryDisplay, OutputBindings,
};
pub use calculator::{
    compute, CalculationInput, CalculationInputBuilder, CalculationResult, LeasingCalculator,
    MAX_TERM_MONTHS,
};
pub use config::{CalculatorConfig, InputDefaults, PriceBounds};
pub use decimal::{Money, Rate};
pub use errors::{LeasingError, Result};
pub use events::{Event, EventStore};
pub use presentation::{Presenter, ResultView};
pub use rates::RateTable;
pub use schedule::{AmortizationSchedule, ScheduledPayment};
pub use synchronizer::InputSynchronizer;
pub use types::{Condition, ControlEvent, PriceSource, SessionId};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
