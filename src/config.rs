use std::fs;
use std::path::Path;

use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::Result;
use crate::payment::{OneTimePayment, Payment, RecurringPayment, Ymd, date_from_ymd};
use crate::simulation::{SimulationParams, horizon_days};

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Bank accounts minus credit card balances.
    #[serde(default)]
    pub starting_balance: Decimal,
    pub starting_date: Ymd,
    #[serde(default = "default_months")]
    pub months: u32,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default)]
    pub payments: Vec<PaymentConfig>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentConfig {
    Recurring {
        description: String,
        amount: Decimal,
        frequency: u32,
        start: Ymd,
        #[serde(default)]
        end: Option<Ymd>,
        #[serde(default)]
        color: Option<String>,
    },
    OneTime {
        description: String,
        amount: Decimal,
        date: Ymd,
        #[serde(default)]
        color: Option<String>,
    },
}

fn default_months() -> u32 {
    6
}

fn default_currency_symbol() -> String {
    "£".to_string()
}

impl PaymentConfig {
    pub fn build(self) -> Result<Payment> {
        Ok(match self {
            PaymentConfig::Recurring {
                description,
                amount,
                frequency,
                start,
                end,
                color,
            } => RecurringPayment::new(description, amount, frequency, start, end, color)?.into(),
            PaymentConfig::OneTime {
                description,
                amount,
                date,
                color,
            } => OneTimePayment::new(description, amount, date, color)?.into(),
        })
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Validate dates and build the engine parameters.
    pub fn into_params(self) -> Result<SimulationParams> {
        let payments = self
            .payments
            .into_iter()
            .map(PaymentConfig::build)
            .collect::<Result<Vec<_>>>()?;
        Ok(SimulationParams {
            payments,
            start_date: date_from_ymd(self.starting_date)?,
            start_balance: self.starting_balance,
            num_days: horizon_days(self.months)?,
        })
    }
}
