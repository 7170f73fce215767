use chrono::{Days, NaiveDate};
use log::{debug, info, trace};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::color::payment_color;
use crate::error::{ForecastError, Result};
use crate::payment::Payment;

/// Days simulated per month of horizon. Months are not calendar accurate.
pub const DAYS_PER_MONTH: u32 = 30;

pub fn horizon_days(months: u32) -> Result<u32> {
    DAYS_PER_MONTH
        .checked_mul(months)
        .ok_or(ForecastError::HorizonTooLong { months })
}

/// One payment firing during a simulation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationEvent {
    /// The day before the payment lands, so the chart step sits just ahead of the balance change.
    pub event_date: NaiveDate,
    /// Balance before this payment, including earlier payments on the same day.
    pub balance_before: Decimal,
    pub description: String,
    pub color: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    pub balances: Vec<DailyBalance>,
    pub events: Vec<SimulationEvent>,
}

impl SimulationResult {
    pub fn final_balance(&self) -> Option<Decimal> {
        self.balances.last().map(|b| b.balance)
    }

    /// The lowest end-of-day balance, earliest date first on ties.
    pub fn lowest_balance(&self) -> Option<DailyBalance> {
        self.balances
            .iter()
            .copied()
            .reduce(|low, b| if b.balance < low.balance { b } else { low })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub payments: Vec<Payment>,
    pub start_date: NaiveDate,
    pub start_balance: Decimal,
    pub num_days: u32,
}

impl SimulationParams {
    pub fn run(&self) -> Result<SimulationResult> {
        simulate(&self.payments, self.start_date, self.start_balance, self.num_days)
    }
}

fn step_day(
    payments: &[Payment],
    date: NaiveDate,
    balance: Decimal,
    events: &mut Vec<SimulationEvent>,
) -> Result<Decimal> {
    let mut next_balance = balance;
    for payment in payments.iter().filter(|p| p.occurs_on_day(date)) {
        let event = SimulationEvent {
            event_date: date.pred_opt().ok_or(ForecastError::HorizonOutOfRange {
                start: date,
                num_days: 1,
            })?,
            balance_before: next_balance,
            description: payment.description().to_string(),
            color: payment_color(payment)?,
            amount: payment.amount(),
        };
        debug!(
            "{date}: {} {} (balance before {})",
            event.description, event.amount, event.balance_before
        );
        events.push(event);
        next_balance += payment.amount();
    }
    Ok(next_balance)
}

/// Run the day-by-day projection starting on `start_date` (inclusive) for `num_days` days.
///
/// Payments due on the same day are applied in slice order.
pub fn simulate(
    payments: &[Payment],
    start_date: NaiveDate,
    start_balance: Decimal,
    num_days: u32,
) -> Result<SimulationResult> {
    info!(
        "Simulating {num_days} days from {start_date} with {} payments, starting balance {start_balance}",
        payments.len()
    );

    let out_of_range = || ForecastError::HorizonOutOfRange {
        start: start_date,
        num_days,
    };
    if num_days > 0 {
        start_date
            .checked_add_days(Days::new(u64::from(num_days) - 1))
            .ok_or_else(out_of_range)?;
    }

    let mut result = SimulationResult {
        balances: Vec::with_capacity(num_days as usize),
        events: Vec::new(),
    };
    let mut current_balance = start_balance;
    let mut current_date = start_date;

    for index in 0..num_days {
        if index > 0 {
            current_date = current_date.succ_opt().ok_or_else(out_of_range)?;
        }
        current_balance = step_day(payments, current_date, current_balance, &mut result.events)?;
        trace!("{current_date}: {current_balance}");
        result.balances.push(DailyBalance {
            date: current_date,
            balance: current_balance,
        });
    }

    info!(
        "Simulation finished with {} events, final balance {current_balance}",
        result.events.len()
    );
    Ok(result)
}
