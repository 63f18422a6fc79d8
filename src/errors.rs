use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeasingError {
    #[error("invalid {field}: {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LeasingError {
    pub fn invalid_argument(field: &'static str, message: impl Into<String>) -> Self {
        LeasingError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// true for errors caused by what the user typed
    pub fn is_user_input(&self) -> bool {
        matches!(self, LeasingError::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, LeasingError>;
