/// an input widget whose current value can be read and replaced
pub trait InputControl {
    /// current raw text of the control
    fn value(&self) -> String;

    /// replace the control's value
    fn set_value(&mut self, value: &str);
}

/// a display-only output element
pub trait DisplayField {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);
}

/// in-memory input control, for tests and headless hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryControl {
    value: String,
}

impl MemoryControl {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl InputControl for MemoryControl {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

/// in-memory display field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDisplay {
    text: String,
}

impl DisplayField for MemoryDisplay {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

/// output elements the presentation adapter writes to
pub struct OutputBindings {
    pub leasing_cost: Box<dyn DisplayField>,
    pub down_payment_amount: Box<dyn DisplayField>,
    pub down_payment_percent: Box<dyn DisplayField>,
    pub periodic_installment: Box<dyn DisplayField>,
    pub interest_rate: Box<dyn DisplayField>,
    /// user-visible error line; optional
    pub status: Option<Box<dyn DisplayField>>,
}

impl OutputBindings {
    pub fn in_memory() -> Self {
        Self {
            leasing_cost: Box::new(MemoryDisplay::default()),
            down_payment_amount: Box::new(MemoryDisplay::default()),
            down_payment_percent: Box::new(MemoryDisplay::default()),
            periodic_installment: Box::new(MemoryDisplay::default()),
            interest_rate: Box::new(MemoryDisplay::default()),
            status: Some(Box::new(MemoryDisplay::default())),
        }
    }

    pub fn status_text(&self) -> Option<String> {
        self.status.as_ref().map(|s| s.text())
    }
}

/// every control the synchronizer reads from or writes to
///
/// Built once by the host and handed to the synchronizer; nothing is looked up
/// by name at runtime.
pub struct LeasingBindings {
    pub condition: Box<dyn InputControl>,
    pub price_range: Box<dyn InputControl>,
    pub price_field: Box<dyn InputControl>,
    pub term: Box<dyn InputControl>,
    pub down_payment_range: Box<dyn InputControl>,
    /// display-only echo of the down payment slider
    pub down_payment_echo: Box<dyn InputControl>,
    pub outputs: OutputBindings,
}

impl LeasingBindings {
    /// bindings backed by in-memory controls, all empty
    pub fn in_memory() -> Self {
        Self {
            condition: Box::new(MemoryControl::default()),
            price_range: Box::new(MemoryControl::default()),
            price_field: Box::new(MemoryControl::default()),
            term: Box::new(MemoryControl::default()),
            down_payment_range: Box::new(MemoryControl::default()),
            down_payment_echo: Box::new(MemoryControl::default()),
            outputs: OutputBindings::in_memory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_control() {
        let mut control = MemoryControl::new("10000");
        assert_eq!(control.value(), "10000");
        control.set_value("25000");
        assert_eq!(control.value(), "25000");
    }

    #[test]
    fn test_in_memory_bindings_start_empty() {
        let bindings = LeasingBindings::in_memory();
        assert!(bindings.price_field.value().is_empty());
        assert!(bindings.outputs.leasing_cost.text().is_empty());
        assert_eq!(bindings.outputs.status_text(), Some(String::new()));
    }
}
