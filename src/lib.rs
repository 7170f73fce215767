//! Day-by-day cash balance projection over a fixed horizon from a list of
//! recurring and one-time payments.

pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod payment;
pub mod report;
pub mod simulation;

pub use chart::{ChartData, HoverTolerance, Marker, Tooltip};
pub use config::{Config, PaymentConfig};
pub use error::{ForecastError, Result};
pub use payment::{OneTimePayment, Payment, RecurringPayment, Ymd};
pub use simulation::{DailyBalance, SimulationEvent, SimulationParams, SimulationResult, horizon_days, simulate};
