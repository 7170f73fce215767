//! Data handed to the plotting surface: the balance line, one marker per
//! payment event, and the hover lookup that turns a pointer position into a
//! tooltip.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Result;
use crate::simulation::{DailyBalance, SimulationResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub color: String,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub line: Vec<DailyBalance>,
    pub markers: Vec<Marker>,
}

/// How far from a marker the pointer may be and still count as hovering it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTolerance {
    pub days: i64,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub date: NaiveDate,
    pub balance: Decimal,
    pub text: String,
    pub color: String,
}

impl ChartData {
    pub fn from_result(result: &SimulationResult) -> Self {
        let markers = result
            .events
            .iter()
            .map(|e| Marker {
                date: e.event_date,
                balance: e.balance_before,
                color: e.color.clone(),
                amount: e.amount,
                description: e.description.clone(),
            })
            .collect();
        Self {
            title: "budget".to_string(),
            line: result.balances.clone(),
            markers,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn markers_under(&self, date: NaiveDate, balance: Decimal, tolerance: HoverTolerance) -> Vec<&Marker> {
        self.markers
            .iter()
            .filter(|m| {
                (m.date - date).num_days().abs() <= tolerance.days
                    && (m.balance - balance).abs() <= tolerance.balance
            })
            .collect()
    }

    /// Tooltip for the pointer at (`date`, `balance`), if it is over any marker.
    ///
    /// Overlapping markers share one tooltip anchored on the first of them.
    pub fn hover(&self, date: NaiveDate, balance: Decimal, tolerance: HoverTolerance) -> Option<Tooltip> {
        let hits = self.markers_under(date, balance, tolerance);
        let anchor = hits.first()?;

        let amounts = hits.iter().map(|m| m.amount.to_string()).collect::<Vec<_>>();
        let labels = hits.iter().map(|m| m.description.as_str()).collect::<Vec<_>>();
        Some(Tooltip {
            date: anchor.date,
            balance: anchor.balance,
            text: format!("{}, {}", amounts.join(" "), labels.join(" ")),
            color: anchor.color.clone(),
        })
    }
}
