use thiserror::Error;

use crate::models::NutritionField;

#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("Unknown nutrition field: {name}{}", suggestion_suffix(.suggestion))]
    UnknownField {
        name: String,
        suggestion: Option<&'static str>,
    },

    #[error("{} must be between 0 and {}, got {value}", .field.label(), .field.max())]
    OutOfRange { field: NutritionField, value: i64 },

    #[error("A recommendation request is already in progress")]
    RequestInProgress,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

fn suggestion_suffix(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, NutritionError>;
