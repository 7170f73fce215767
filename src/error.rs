use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Invalid date: {year}-{month}-{day} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Payment '{description}' has a frequency of 0 days")]
    InvalidFrequency { description: String },

    #[error("Payment '{description}' has a zero amount, cannot derive a color for it")]
    DegenerateAmount { description: String },

    #[error("Projection horizon of {months} months overflows the day count")]
    HorizonTooLong { months: u32 },

    #[error("Projection from {start} for {num_days} days runs outside the supported date range")]
    HorizonOutOfRange { start: chrono::NaiveDate, num_days: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
