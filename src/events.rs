use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::CalculationResult;
use crate::decimal::Money;
use crate::types::{ControlEvent, PriceSource, SessionId};

/// all events that can be emitted by the synchronizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    SessionInitialized {
        session_id: SessionId,
        price: Money,
        term_periods: u32,
        down_payment_percent: Decimal,
        timestamp: DateTime<Utc>,
    },

    // synchronization events
    PriceSynchronized {
        session_id: SessionId,
        source: PriceSource,
        requested: Money,
        applied: Money,
        clamped: bool,
        timestamp: DateTime<Utc>,
    },
    DownPaymentEchoed {
        session_id: SessionId,
        percent: String,
        timestamp: DateTime<Utc>,
    },

    // calculation events
    CalculationCompleted {
        session_id: SessionId,
        trigger: Option<ControlEvent>,
        result: CalculationResult,
        timestamp: DateTime<Utc>,
    },
    CalculationRejected {
        session_id: SessionId,
        trigger: Option<ControlEvent>,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl Event {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::SessionInitialized { timestamp, .. }
            | Event::PriceSynchronized { timestamp, .. }
            | Event::DownPaymentEchoed { timestamp, .. }
            | Event::CalculationCompleted { timestamp, .. }
            | Event::CalculationRejected { timestamp, .. } => *timestamp,
        }
    }

    pub fn is_calculation(&self) -> bool {
        matches!(
            self,
            Event::CalculationCompleted { .. } | Event::CalculationRejected { .. }
        )
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}
